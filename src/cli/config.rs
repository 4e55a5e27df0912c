//! Config command - print the effective configuration

use leetcode_sync::config::{Config, default_config_path};
use leetcode_sync::error::Result;
use std::path::Path;

/// Print the configuration that a sync would use, as TOML
pub fn run_config(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    match config_path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) if path.is_file() => println!("# loaded from {}", path.display()),
        _ => println!("# built-in defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
