//! A consumable, source-ordered stream of tokens
//!
//! [`TokenStream`] is the surface a hand-written recursive-descent parser
//! drives: lookahead ([`TokenStream::has`], [`TokenStream::get`]), consumption
//! ([`TokenStream::next`], [`TokenStream::expect`]), and structural scans
//! ([`TokenStream::until`], [`TokenStream::end_of`],
//! [`TokenStream::delimited_list`]). Tokens come out in exactly the order
//! they occur in the source.
//!
//! The backing store is a deque, so consuming from the front and pushing a
//! token back are both O(1); the internal representation is never exposed.
//! Cloning a stream yields an independent copy, which is the intended way
//! to run a trial parse and discard it on failure.
//!
//! # Examples
//!
//! ```
//! use lexstream::{Token, TokenStream};
//!
//! let mut stream: TokenStream<&str> = TokenStream::from_tokens(vec![
//!     Token::new("(", "punct"),
//!     Token::new("x", "ident"),
//!     Token::new(")", "punct"),
//! ]);
//!
//! assert!(stream.has("("));
//! assert_eq!(stream.expect("(")?, "(");
//! assert_eq!(stream.next()?, "x");
//! assert!(stream.optional(")"));
//! assert!(stream.is_empty());
//! # Ok::<(), lexstream::StreamError>(())
//! ```

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Errors raised while consuming a token stream
///
/// All of these are terminal for the parse in progress: there is no
/// internal retry or recovery, the error propagates to the caller.
#[derive(Debug, Error)]
pub enum StreamError {
    /// An operation that needs at least one remaining token was invoked on
    /// an empty stream
    #[error("cannot advance an empty stream")]
    Underflow,

    /// A lookahead index was requested beyond the current length
    #[error("token index {index} out of bounds (stream has {length} tokens)")]
    OutOfBounds {
        /// The requested lookahead offset
        index: usize,
        /// Number of tokens remaining at the time of the request
        length: usize,
    },

    /// An `expect` assertion failed on the consumed token
    #[error("{message} (line {line})")]
    UnexpectedToken {
        /// Human-readable mismatch description
        message: String,
        /// 1-based line of the offending token
        line: usize,
        /// Byte offset of the offending token in the source
        position: usize,
        /// Rendered source excerpt around the offending token
        excerpt: String,
    },

    /// A balanced `open`...`close` structure could not be extracted
    #[error("malformed `{open}`...`{close}` structure: {reason}")]
    MalformedStructure {
        /// The opening marker
        open: String,
        /// The closing marker
        close: String,
        /// What went wrong (marker never found, or input ran out)
        reason: String,
    },
}

/// An ordered sequence of tokens, consumed front to back
#[derive(Debug, Clone, Default)]
pub struct TokenStream<K> {
    tokens: VecDeque<Token<K>>,
}

impl<K: TokenKind> TokenStream<K> {
    /// Create an empty stream
    #[must_use]
    pub fn new() -> Self {
        Self { tokens: VecDeque::new() }
    }

    /// Create a stream from tokens in source order
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token<K>>) -> Self {
        Self { tokens: tokens.into() }
    }

    /// Number of unconsumed tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if every token has been consumed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Snapshot of the remaining tokens in source order; does not consume
    #[must_use]
    pub fn all(&self) -> Vec<Token<K>> {
        self.tokens.iter().cloned().collect()
    }

    /// Iterate over the remaining tokens without consuming them
    pub fn iter(&self) -> impl Iterator<Item = &Token<K>> {
        self.tokens.iter()
    }

    /// Push a token back to the front of the stream
    ///
    /// The prepended token becomes the next one [`TokenStream::next_token`]
    /// returns; this is the pushback primitive for backtracking parsers.
    pub fn prepend(&mut self, token: Token<K>) {
        self.tokens.push_front(token);
    }

    /// Look at the token at lookahead offset `index` without consuming
    ///
    /// Offset 0 is the next token to be consumed.
    #[must_use]
    pub fn peek(&self, index: usize) -> Option<&Token<K>> {
        self.tokens.get(index)
    }

    /// Check whether the next token's content equals `content`
    #[must_use]
    pub fn has(&self, content: &str) -> bool {
        self.has_at(content, 0)
    }

    /// Check the token at lookahead offset `index` by content
    ///
    /// Returns `false` (never an error) when `index` is out of range.
    #[must_use]
    pub fn has_at(&self, content: &str, index: usize) -> bool {
        self.peek(index).is_some_and(|token| token.content() == content)
    }

    /// Check whether the next token's kind equals `kind`
    #[must_use]
    pub fn has_kind(&self, kind: &K) -> bool {
        self.has_kind_at(kind, 0)
    }

    /// Check the token at lookahead offset `index` by kind
    ///
    /// Returns `false` (never an error) when `index` is out of range.
    #[must_use]
    pub fn has_kind_at(&self, kind: &K, index: usize) -> bool {
        self.peek(index).is_some_and(|token| token.kind() == kind)
    }

    /// Check whether the next token's content equals any of `options`
    ///
    /// Short-circuits on the first match.
    #[must_use]
    pub fn has_any(&self, options: &[&str]) -> bool {
        self.has_any_at(options, 0)
    }

    /// Check the token at lookahead offset `index` against any of `options`
    #[must_use]
    pub fn has_any_at(&self, options: &[&str], index: usize) -> bool {
        options.iter().any(|option| self.has_at(option, index))
    }

    /// Content of the token at lookahead offset `index`, without consuming
    pub fn get(&self, index: usize) -> Result<&str, StreamError> {
        self.get_token(index).map(Token::content)
    }

    /// The token at lookahead offset `index`, without consuming
    pub fn get_token(&self, index: usize) -> Result<&Token<K>, StreamError> {
        self.peek(index).ok_or(StreamError::OutOfBounds { index, length: self.tokens.len() })
    }

    /// Discard the next `n` tokens without inspecting them
    pub fn skip(&mut self, n: usize) -> Result<(), StreamError> {
        if n > self.tokens.len() {
            return Err(StreamError::Underflow);
        }
        self.tokens.drain(..n);
        Ok(())
    }

    /// Consume tokens while the next token's content equals `content`
    pub fn skip_all(&mut self, content: &str) {
        while self.has(content) {
            self.tokens.pop_front();
        }
    }

    /// Delete every remaining token whose content equals `content`
    ///
    /// Survivor order is preserved.
    pub fn remove_content(&mut self, content: &str) {
        self.tokens.retain(|token| token.content() != content);
    }

    /// Delete every remaining token whose kind equals `kind`
    ///
    /// Survivor order is preserved.
    pub fn remove_kind(&mut self, kind: &K) {
        self.tokens.retain(|token| token.kind() != kind);
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> Result<Token<K>, StreamError> {
        self.tokens.pop_front().ok_or(StreamError::Underflow)
    }

    /// Consume the next token and return its content
    ///
    /// Not an `Iterator`: exhaustion is an error here, not a `None`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<String, StreamError> {
        self.next_token().map(|token| token.content().to_string())
    }

    /// Consume the next token, asserting its content equals `content`
    ///
    /// On mismatch the consumed token reports a diagnostic and the parse
    /// fails with [`StreamError::UnexpectedToken`].
    pub fn expect(&mut self, content: &str) -> Result<String, StreamError> {
        let token = self.next_token()?;
        if token.content() == content {
            Ok(token.content().to_string())
        } else {
            Err(token.fail(format!(
                "Unexpected token '{}', expected '{content}'",
                token.content()
            )))
        }
    }

    /// Consume the next token, asserting its kind equals `kind`
    pub fn expect_kind(&mut self, kind: &K) -> Result<String, StreamError> {
        let token = self.next_token()?;
        if token.kind() == kind {
            Ok(token.content().to_string())
        } else {
            Err(token.fail(format!(
                "Unexpected token '{}', expected token of type '{kind}'",
                token.content()
            )))
        }
    }

    /// Consume the next token if its content equals `content`
    ///
    /// Returns `true` if a token was consumed; otherwise leaves the stream
    /// untouched and returns `false`.
    pub fn optional(&mut self, content: &str) -> bool {
        if self.has(content) {
            self.tokens.pop_front();
            true
        } else {
            false
        }
    }

    /// Consume and return every token before the first occurrence of `content`
    ///
    /// The delimiting token itself is left in place. If `content` never
    /// occurs, the entire remaining stream is consumed and returned — a
    /// deliberate "slice while absent" policy, not an error. Use
    /// [`TokenStream::end_of`] when an unterminated region should fail.
    #[must_use = "until() consumes tokens and returns them as a new stream"]
    pub fn until(&mut self, content: &str) -> Self {
        let mut result = Self::new();
        while !self.is_empty() && !self.has(content) {
            if let Some(token) = self.tokens.pop_front() {
                result.tokens.push_back(token);
            }
        }
        result
    }

    /// Extract the contents of the first balanced `open`...`close` region
    ///
    /// Everything up to and including the first `open` is consumed, then a
    /// balanced run follows: each further `open` deepens the nesting, each
    /// `close` closes one level. The `close` that balances the first `open`
    /// is consumed but excluded from the returned stream. The markers need
    /// not be single characters.
    ///
    /// Fails with [`StreamError::MalformedStructure`] when `open` never
    /// occurs, or when the stream runs out before the region balances.
    pub fn end_of(&mut self, open: &str, close: &str) -> Result<Self, StreamError> {
        let _ = self.until(open);
        if self.is_empty() {
            return Err(StreamError::MalformedStructure {
                open: open.to_string(),
                close: close.to_string(),
                reason: format!("opening token '{open}' never occurs"),
            });
        }
        self.tokens.pop_front();

        let mut result = Self::new();
        let mut depth = 1_usize;
        while let Some(token) = self.tokens.pop_front() {
            if token.content() == open {
                depth += 1;
            }
            if token.content() == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(result);
                }
            }
            result.tokens.push_back(token);
        }

        Err(StreamError::MalformedStructure {
            open: open.to_string(),
            close: close.to_string(),
            reason: format!("stream ended before '{close}' balanced the structure"),
        })
    }

    /// Parse a delimiter-separated list of items
    ///
    /// Repeatedly calls `parse_item` on this stream, then either stops
    /// (when `interrupt` is given and the next token's content equals it)
    /// or consumes one `delimiter` token before the next item. Terminates
    /// when the stream is exhausted. The interrupt token itself is left
    /// unconsumed — the standard "comma-separated list followed by a
    /// closing marker" pattern.
    pub fn delimited_list<T, E, F>(
        &mut self,
        mut parse_item: F,
        delimiter: &str,
        interrupt: Option<&str>,
    ) -> Result<Vec<T>, E>
    where
        F: FnMut(&mut Self) -> Result<T, E>,
        E: From<StreamError>,
    {
        let mut items = Vec::new();

        while !self.is_empty() {
            items.push(parse_item(self)?);

            if let Some(interrupt) = interrupt
                && self.has(interrupt)
            {
                break;
            }

            if !self.is_empty() {
                self.expect(delimiter)?;
            }
        }

        Ok(items)
    }
}

impl<K: TokenKind> From<Vec<Token<K>>> for TokenStream<K> {
    fn from(tokens: Vec<Token<K>>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl<K: TokenKind> FromIterator<Token<K>> for TokenStream<K> {
    fn from_iter<I: IntoIterator<Item = Token<K>>>(iter: I) -> Self {
        Self { tokens: iter.into_iter().collect() }
    }
}

impl<K: TokenKind> fmt::Display for TokenStream<K> {
    /// Prints the remaining tokens separated by spaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.tokens.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join(" "))
    }
}
