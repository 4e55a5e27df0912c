//! Judge language name to file extension table

/// Extension used when the judge reports a language missing from the table
pub const FALLBACK_EXTENSION: &str = "txt";

/// File extension for a judge language name, if known
pub fn extension_for(lang: &str) -> Option<&'static str> {
    let ext = match lang {
        "bash" => "sh",
        "c" => "c",
        "cpp" => "cpp",
        "csharp" => "cs",
        "dart" => "dart",
        "elixir" => "ex",
        "erlang" => "erl",
        "golang" => "go",
        "java" => "java",
        "javascript" => "js",
        "kotlin" => "kt",
        "mssql" | "mysql" | "oraclesql" | "postgresql" => "sql",
        "php" => "php",
        "python" | "python3" | "pythondata" => "py",
        "racket" => "rkt",
        "ruby" => "rb",
        "rust" => "rs",
        "scala" => "scala",
        "swift" => "swift",
        "typescript" => "ts",
        _ => return None,
    };
    Some(ext)
}
