//! lexstream - a lexing toolkit for hand-written recursive-descent parsers
//!
//! This library turns raw source text into a stream of typed tokens and
//! provides a consumption API (lookahead, matching, error reporting,
//! balanced-delimiter scanning, delimited-list parsing) for building
//! parsers on top. It supplies the substrate only: the grammar and the
//! parser itself belong to the host application.
//!
//! # Examples
//!
//! ```
//! use lexstream::{Rule, TokenStreamBuilder};
//! use std::fmt;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind {
//!     Number,
//!     Plus,
//! }
//!
//! impl fmt::Display for Kind {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         match self {
//!             Self::Number => write!(f, "number"),
//!             Self::Plus => write!(f, "plus"),
//!         }
//!     }
//! }
//!
//! let rules = vec![
//!     Rule::new(r"\d+", Kind::Number)?,
//!     Rule::new(r"\+", Kind::Plus)?,
//! ];
//!
//! let mut stream = TokenStreamBuilder::tokenize("12 + 34", &rules)?;
//! assert_eq!(stream.next()?, "12");
//! assert_eq!(stream.expect("+")?, "+");
//! assert_eq!(stream.expect_kind(&Kind::Number)?, "34");
//! assert!(stream.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builder;
pub mod diagnostic;
pub mod stream;
pub mod style;
pub mod token;

pub use builder::{Rule, TokenStreamBuilder, TokenizeError};
pub use diagnostic::{Diagnostic, OutputMode};
pub use stream::{StreamError, TokenStream};
pub use token::{Token, TokenKind};
