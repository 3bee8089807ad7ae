//! Error types for jCard stream parsing.
//!
//! Three classes of failure exist, and the distinction drives dialect
//! recovery (see [`crate::JCardReader`]):
//!
//! - **Structural errors** ([`Error::UnexpectedToken`],
//!   [`Error::UnexpectedValue`]): the bytes are valid JSON but the token
//!   sequence does not match the jCard grammar at the current position.
//!   These are the only errors the dialect engine catches internally while
//!   trying the next candidate shape.
//! - **Syntax errors** ([`Error::Syntax`], [`Error::UnexpectedEof`]): the
//!   underlying bytes are not valid JSON at all. Always fatal.
//! - **I/O errors** ([`Error::Io`]): the byte source itself failed. Always
//!   fatal.
//!
//! ## Examples
//!
//! ```rust
//! use jcard_stream::{events_from_str, Error};
//!
//! let result: Result<Vec<_>, Error> = events_from_str("[\"vcard\", [42").collect();
//! assert!(result.is_err());
//! ```

use crate::cursor::TokenKind;
use thiserror::Error;

/// Represents all possible errors that can occur while reading a jCard
/// stream.
///
/// Structural variants carry the expected-vs-actual token (and, where a
/// literal string was expected, the actual literal) plus the line number of
/// the underlying tokenizer for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while reading the underlying byte source.
    #[error("IO error: {0}")]
    Io(String),

    /// The underlying bytes are not valid JSON.
    #[error("JSON syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// The JSON text ended in the middle of a value.
    #[error("unexpected end of input at line {line}, column {col}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
    },

    /// The token sequence does not match the jCard grammar at this position.
    #[error("unexpected token at line {line}: expected {expected}, found {actual}")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
        line: usize,
    },

    /// A specific literal was expected but a different value was read.
    #[error("unexpected value at line {line}: expected {expected}, found \"{actual}\"")]
    UnexpectedValue {
        expected: String,
        actual: String,
        line: usize,
    },
}

impl Error {
    /// Creates an I/O error for failures reading the underlying byte source.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a JSON syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jcard_stream::Error;
    ///
    /// let err = Error::syntax(3, 7, "unexpected character '%'");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
        }
    }

    /// Creates a structural error for a token of the wrong kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jcard_stream::{Error, TokenKind};
    ///
    /// let err = Error::unexpected_token(TokenKind::StartArray, TokenKind::String, 1);
    /// assert!(err.is_structural());
    /// ```
    pub fn unexpected_token(expected: TokenKind, actual: TokenKind, line: usize) -> Self {
        Error::UnexpectedToken {
            expected,
            actual,
            line,
        }
    }

    /// Creates a structural error for a literal string that did not match.
    pub fn unexpected_value(expected: &str, actual: &str, line: usize) -> Self {
        Error::UnexpectedValue {
            expected: expected.to_string(),
            actual: actual.to_string(),
            line,
        }
    }

    /// Returns `true` if this is a structural mismatch the dialect engine may
    /// recover from by trying the next candidate shape.
    ///
    /// Syntax and I/O errors return `false`; they are always fatal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jcard_stream::{Error, TokenKind};
    ///
    /// assert!(Error::unexpected_value("vcard", "vCardArray", 1).is_structural());
    /// assert!(!Error::syntax(1, 1, "bad escape").is_structural());
    /// ```
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::UnexpectedToken { .. } | Error::UnexpectedValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
