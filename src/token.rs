//! Tokens produced by the tokenizer and consumed by parsers
//!
//! A [`Token`] is an immutable (content, kind, position, source) tuple. The
//! source text is shared between every token derived from it and outlives
//! them all; the position is the byte offset of the token's content within
//! that source, which is what lets a failing token render an excerpt of the
//! surrounding lines.

use std::fmt;
use std::sync::Arc;

use crate::diagnostic::Diagnostic;
use crate::stream::StreamError;
use crate::style;

/// Bounds required of a token kind tag
///
/// A kind is a value from a finite, parser-defined tag set, compared by
/// value equality. Any cloneable, comparable, displayable type qualifies;
/// a small `enum` with a `Display` impl is the usual choice. Implemented
/// automatically for every type that meets the bounds.
pub trait TokenKind: Clone + PartialEq + fmt::Debug + fmt::Display {}

impl<T> TokenKind for T where T: Clone + PartialEq + fmt::Debug + fmt::Display {}

/// A single token: an exact substring of the source, tagged with a kind
///
/// Immutable after construction. Tokens built by the tokenizer satisfy
/// `source[position..position + content.len()] == content`; tokens merged
/// with [`Token::concat`] keep the left operand's position and source, so
/// the equality is not guaranteed for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<K> {
    content: String,
    kind: K,
    position: usize,
    source: Arc<str>,
}

impl<K: TokenKind> Token<K> {
    /// Create a detached token whose source is its own content
    ///
    /// Useful for synthetic tokens a parser injects (for example via
    /// `TokenStream::prepend`) that have no true location in the source.
    #[must_use]
    pub fn new(content: impl Into<String>, kind: K) -> Self {
        let content = content.into();
        let source = Arc::from(content.as_str());
        Self { content, kind, position: 0, source }
    }

    /// Create a token at a known byte offset within shared source text
    ///
    /// Debug builds assert that `source[position..]` actually starts with
    /// `content`.
    #[must_use]
    pub fn with_source(content: impl Into<String>, kind: K, position: usize, source: Arc<str>) -> Self {
        let content = content.into();
        debug_assert!(
            source.get(position..position + content.len()) == Some(content.as_str()),
            "token content {content:?} does not match source at byte {position}"
        );
        Self { content, kind, position, source }
    }

    /// The exact substring this token matched
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The token's kind tag
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }

    /// Byte offset of the content within the original source
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The full original source text this token was cut from
    #[must_use]
    pub const fn source(&self) -> &Arc<str> {
        &self.source
    }

    /// Length of the content in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the content is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// 1-based line number of this token within its source
    #[must_use]
    pub fn line(&self) -> usize {
        self.source[..self.position].matches('\n').count() + 1
    }

    /// Merge this token with another into a single logical token
    ///
    /// The result's content is the concatenation of both contents; its
    /// position and source are kept from `self`. Parsers use this to
    /// coalesce adjacent tokens (multi-part operators, for example) into
    /// one token of a new kind.
    #[must_use]
    pub fn concat(&self, other: &Self, kind: K) -> Self {
        Self {
            content: format!("{}{}", self.content, other.content),
            kind,
            position: self.position,
            source: Arc::clone(&self.source),
        }
    }

    /// Build the diagnostic for a failure at this token
    ///
    /// Pure excerpt computation; nothing is emitted. See [`Token::fail`]
    /// for the effectful path.
    #[must_use]
    pub fn diagnostic(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(&self.source, self.position, &self.content, message)
    }

    /// Report a parse failure at this token
    ///
    /// Renders a highlighted excerpt of the surrounding source lines, emits
    /// it on the error log, and returns the [`StreamError`] for the caller
    /// to propagate. Parsing does not continue past a failed token:
    ///
    /// ```
    /// # use lexstream::{Token, StreamError};
    /// let token = Token::new("@", "punct");
    /// let err = token.fail("Unexpected token '@'");
    /// assert!(matches!(err, StreamError::UnexpectedToken { .. }));
    /// ```
    #[must_use = "the returned error should be propagated to the caller"]
    pub fn fail(&self, message: impl Into<String>) -> StreamError {
        let message = message.into();
        let diagnostic = self.diagnostic(message.clone());
        diagnostic.emit();
        StreamError::UnexpectedToken {
            message,
            line: diagnostic.line,
            position: self.position,
            excerpt: diagnostic.excerpt,
        }
    }
}

impl<K: TokenKind> fmt::Display for Token<K> {
    /// Prints as `(kind: content)` with the content emphasized for
    /// terminal diagnostics
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {})", self.kind, style::emphasize(&self.content))
    }
}
