//! Text formatting helpers for diagnostic rendering
//!
//! This module is the formatting collaborator of the error-reporting path:
//! line splitting, indenting, and ANSI styling primitives. The core calls
//! these only while building a human-readable source excerpt; nothing here
//! is behavior-bearing for parsing itself.

use colored::Colorize;

/// Split text into lines, stripping trailing carriage returns
///
/// Windows line endings (`\r\n`) are normalized so that excerpts never
/// carry a stray `\r` into the rendered output.
#[must_use]
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)).collect()
}

/// Indent every line of a block of text by four spaces
#[must_use]
pub fn indent(text: &str) -> String {
    lines(text).iter().map(|line| format!("    {line}")).collect::<Vec<_>>().join("\n")
}

/// Wrap text in a highlighted (red background) style
///
/// Used to mark the offending token inside a source excerpt. Rendering is
/// controlled by the `colored` crate, so `NO_COLOR` and non-tty output are
/// respected.
#[must_use]
pub fn highlight(text: &str) -> String {
    text.on_red().to_string()
}

/// Emphasize text (blue foreground)
///
/// Purely cosmetic; used when printing tokens for terminal diagnostics.
#[must_use]
pub fn emphasize(text: &str) -> String {
    text.blue().to_string()
}
