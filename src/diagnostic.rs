//! Diagnostic rendering for parse failures
//!
//! A [`Diagnostic`] is the human-facing half of a parse error: an excerpt
//! of the source lines around the offending token, with the token itself
//! highlighted, plus the failure message and line number. Building the
//! excerpt is pure ([`Diagnostic::new`]); pushing it to an output channel
//! is separate ([`Diagnostic::emit`], [`Diagnostic::render`]), so the error
//! path is testable without capturing process output.

use std::fmt;

use serde::Serialize;

use crate::style;

/// Width of the separator bars around a rendered excerpt
const BAR_WIDTH: usize = 40;

/// How many lines of context to show around the offending line
const CONTEXT_LINES: usize = 1;

/// Output mode for rendering diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A rendered parse failure: message, line number, and source excerpt
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Human-readable failure description
    pub message: String,
    /// 1-based line number of the offending token
    pub line: usize,
    /// Gutter-numbered excerpt of the surrounding source lines, with the
    /// offending content highlighted
    pub excerpt: String,
}

impl Diagnostic {
    /// Build a diagnostic for `content` at byte offset `position` in `source`
    ///
    /// The excerpt spans one line before through one line after the line
    /// containing the offset, clamped to the source bounds. Each line is
    /// prefixed with a width-aligned `N | ` gutter.
    ///
    /// A span reaching past the end of the source (a concatenated token's
    /// content can outgrow its recorded span) is clamped, never an error.
    #[must_use]
    pub fn new(source: &str, position: usize, content: &str, message: impl Into<String>) -> Self {
        let prefix = source.get(..position).unwrap_or(source);
        let suffix = source.get(position + content.len()..).unwrap_or("");
        let line_index = prefix.matches('\n').count();

        // Splice the highlighted content into the source before slicing it
        // into lines, so a multi-line token stays highlighted throughout.
        let highlighted = format!("{prefix}{}{suffix}", style::highlight(content));

        let all_lines = style::lines(&highlighted);
        let start = line_index.saturating_sub(CONTEXT_LINES);
        let end = all_lines.len().min(line_index + CONTEXT_LINES + 1);

        let gutter_width = digits(end);
        let excerpt = all_lines[start..end]
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>gutter_width$} | {line}", i + start + 1))
            .collect::<Vec<_>>()
            .join("\n");

        Self { message: message.into(), line: line_index + 1, excerpt }
    }

    /// Emit this diagnostic on the error log
    ///
    /// The host application decides where the `log` facade's error channel
    /// goes; nothing is printed directly.
    pub fn emit(&self) {
        log::error!("{self}");
    }

    /// Render this diagnostic to stdout in the given mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{self}"),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = "=".repeat(BAR_WIDTH);
        write!(f, "{bar}\n{}\n{bar}\n{} (line {})", self.excerpt, self.message, self.line)
    }
}

/// Number of decimal digits in `n` (at least 1)
const fn digits(n: usize) -> usize {
    let mut n = n;
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
