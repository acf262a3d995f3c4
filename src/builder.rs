//! Tokenization: turning raw source text into a token stream
//!
//! A [`TokenStreamBuilder`] scans source text against an ordered slice of
//! [`Rule`]s (pattern → kind). Rules are tried in order and the first match
//! wins, so callers list higher-priority patterns first — `==` before `=`,
//! keywords before identifiers. The whole source is tokenized eagerly;
//! whitespace separates tokens and produces none of its own.
//!
//! # Examples
//!
//! ```
//! use lexstream::{Rule, TokenStreamBuilder};
//!
//! let rules = vec![
//!     Rule::new(r"\d+", "number")?,
//!     Rule::new(r"[+*/-]", "operator")?,
//! ];
//!
//! let stream = TokenStreamBuilder::tokenize("1 + 2 * 3", &rules)?;
//! assert_eq!(stream.len(), 5);
//! # Ok::<(), lexstream::TokenizeError>(())
//! ```

use std::sync::Arc;

use regex::Regex;
use thiserror::Error;

use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Errors raised while building a token stream from source text
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// A rule's pattern failed to compile
    #[error("invalid token pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// The underlying regex error
        source: regex::Error,
    },

    /// No rule matched the remaining input (a stuck scanner)
    #[error("no rule matched the remaining input at byte {position}: {remainder:?}")]
    NoMatch {
        /// Byte offset into the source where scanning stopped
        position: usize,
        /// The unscanned remainder of the source
        remainder: String,
    },

    /// Appended content does not occur at or after the search cursor
    #[error("content {content:?} does not occur at or after byte {cursor} in the source")]
    ContentNotFound {
        /// The content that was appended
        content: String,
        /// The cursor the search started from
        cursor: usize,
    },
}

/// A single tokenization rule: a pattern and the kind it produces
///
/// The pattern is compiled anchored to the current scan position, so a rule
/// can only ever match a prefix of the remaining text.
#[derive(Debug, Clone)]
pub struct Rule<K> {
    pattern: Regex,
    kind: K,
}

impl<K: TokenKind> Rule<K> {
    /// Compile a rule from a regex pattern and the kind it yields
    pub fn new(pattern: &str, kind: K) -> Result<Self, TokenizeError> {
        let anchored = format!("^(?:{pattern})");
        let compiled = Regex::new(&anchored).map_err(|source| TokenizeError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern: compiled, kind })
    }

    /// The kind this rule produces
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// Match this rule against the start of `text`
    ///
    /// A zero-length match counts as no match: a nullable pattern such as
    /// `\d*` would otherwise stall the scanner without consuming input.
    fn matched_prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .find(text)
            .map(|found| found.as_str())
            .filter(|content| !content.is_empty())
    }
}

/// Accumulates tokens while scanning source text, then yields the stream
///
/// The builder tracks a monotonically advancing search cursor into the
/// original source, so identical substrings occurring multiple times are
/// each resolved to their true occurrence, left to right, and recorded
/// positions are strictly increasing. The builder is transient: it is
/// consumed by [`TokenStreamBuilder::into_stream`].
#[derive(Debug)]
pub struct TokenStreamBuilder<K> {
    source: Arc<str>,
    cursor: usize,
    tokens: Vec<Token<K>>,
}

impl<K: TokenKind> TokenStreamBuilder<K> {
    /// Start building a stream over `source`
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { source: Arc::from(source), cursor: 0, tokens: Vec::new() }
    }

    /// Record a token, locating it by searching forward from the cursor
    ///
    /// The position recorded for the token is the first occurrence of
    /// `content` at or after the cursor; the cursor then advances past it.
    pub fn append(&mut self, content: &str, kind: K) -> Result<(), TokenizeError> {
        let offset = self.source[self.cursor..].find(content).ok_or_else(|| {
            TokenizeError::ContentNotFound { content: content.to_string(), cursor: self.cursor }
        })?;
        let position = self.cursor + offset;
        self.cursor = position + content.len();
        self.tokens.push(Token::with_source(content, kind, position, Arc::clone(&self.source)));
        Ok(())
    }

    /// Number of tokens recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether no tokens have been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Finish building and return the accumulated stream
    #[must_use]
    pub fn into_stream(self) -> TokenStream<K> {
        TokenStream::from_tokens(self.tokens)
    }

    /// Tokenize a whole source text against an ordered rule slice
    ///
    /// Repeatedly strips leading whitespace (which produces no token),
    /// tries each rule in order, and records the first match. Every match
    /// consumes at least one byte. Fails with [`TokenizeError::NoMatch`]
    /// when no rule matches the remaining text.
    pub fn tokenize(source: &str, rules: &[Rule<K>]) -> Result<TokenStream<K>, TokenizeError> {
        let mut builder = Self::new(source);
        let mut rest = source.trim_start();

        while !rest.is_empty() {
            let matched = rules.iter().find_map(|rule| {
                rule.matched_prefix(rest).map(|content| (content, rule.kind().clone()))
            });

            match matched {
                Some((content, kind)) => {
                    log::trace!("matched {content:?} as {kind}");
                    builder.append(content, kind)?;
                    rest = rest[content.len()..].trim_start();
                }
                None => {
                    return Err(TokenizeError::NoMatch {
                        position: source.len() - rest.len(),
                        remainder: rest.to_string(),
                    });
                }
            }
        }

        Ok(builder.into_stream())
    }
}
