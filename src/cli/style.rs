//! Terminal styling for sync output
//!
//! Each piece of text gets a [`Tone`]; color is only emitted when the target
//! stream supports it (`NO_COLOR`, `CLICOLOR_FORCE` and TTY checks are left
//! to `owo-colors`).

use indicatif::ProgressStyle;
pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::LazyLock;

/// What a piece of output means to the reader
#[derive(Clone, Copy, Debug)]
enum Tone {
    /// Problem titles, repository names, counts
    Accent,
    /// Committed submissions, finished runs
    Success,
    /// Page retries
    Warn,
    /// Languages, page details, hints
    Muted,
    /// Phase names and headings
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    // Retry warnings go to stderr next to the tracing output.
    const fn stream(self) -> Stream {
        match self {
            Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A value rendered in a [`Tone`]
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.tone.stream(), |v| v.style(style))
        )
    }
}

/// Tone helpers for anything printable
pub trait Stylize: Display {
    /// Cyan
    fn accent(&self) -> Styled<&Self> {
        Styled {
            value: self,
            tone: Tone::Accent,
        }
    }

    /// Green
    fn success(&self) -> Styled<&Self> {
        Styled {
            value: self,
            tone: Tone::Success,
        }
    }

    /// Yellow, on stderr
    fn warn(&self) -> Styled<&Self> {
        Styled {
            value: self,
            tone: Tone::Warn,
        }
    }

    /// Dim
    fn muted(&self) -> Styled<&Self> {
        Styled {
            value: self,
            tone: Tone::Muted,
        }
    }

    /// Bold
    fn emphasis(&self) -> Styled<&Self> {
        Styled {
            value: self,
            tone: Tone::Emphasis,
        }
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Mark for a committed submission or a finished run
pub const fn check() -> Styled<&'static str> {
    Styled {
        value: "✓",
        tone: Tone::Success,
    }
}

/// Bullet for a submission that passed the filter
pub const fn arrow() -> Styled<&'static str> {
    Styled {
        value: "→",
        tone: Tone::Accent,
    }
}

/// Commit URL as an OSC 8 link when the terminal supports it
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

static BACKOFF_SPINNER: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.yellow} {msg}")
        .expect("hardcoded spinner template is valid")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
});

/// Spinner shown while waiting out a page retry
pub fn spinner_style() -> ProgressStyle {
    BACKOFF_SPINNER.clone()
}
