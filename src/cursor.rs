//! Pull-based JSON tokenization.
//!
//! The dialect engine consumes tokens through the [`TokenCursor`] trait so
//! that any conformant JSON tokenizer can drive it. [`JsonCursor`] is the
//! built-in implementation: a single-pass, hand-rolled tokenizer over an
//! owned string with line/column tracking.
//!
//! Unlike a DOM parser, the cursor surfaces one token at a time and never
//! looks ahead, which is what makes the registrar-dialect recovery in
//! [`crate::JCardReader`] possible: the engine advances exactly as far as it
//! must to decide which malformed shape it is looking at.
//!
//! ## Examples
//!
//! ```rust
//! use jcard_stream::{JsonCursor, Token, TokenCursor};
//!
//! let mut cursor = JsonCursor::new(r#"{"a": [1, true]}"#);
//! assert_eq!(cursor.advance().unwrap(), Token::StartObject);
//! assert_eq!(cursor.advance().unwrap(), Token::FieldName("a".to_string()));
//! cursor.advance().unwrap(); // [
//! cursor.skip_subtree().unwrap();
//! assert_eq!(cursor.advance().unwrap(), Token::EndObject);
//! ```

use crate::error::{Error, Result};
use crate::value::Number;
use std::fmt;

/// One JSON token, carrying its scalar value where it has one.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    /// An object key. Only produced inside objects, in key position.
    FieldName(String),
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    /// End of the token stream. Returned repeatedly once reached.
    Eof,
}

/// The kind of a [`Token`], without its value. Used in structural error
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    String,
    Number,
    Bool,
    Null,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::StartObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::StartArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::FieldName => "field name",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Bool => "boolean",
            TokenKind::Null => "null",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{}", text)
    }
}

impl Token {
    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartObject => TokenKind::StartObject,
            Token::EndObject => TokenKind::EndObject,
            Token::StartArray => TokenKind::StartArray,
            Token::EndArray => TokenKind::EndArray,
            Token::FieldName(_) => TokenKind::FieldName,
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Bool(_) => TokenKind::Bool,
            Token::Null => TokenKind::Null,
            Token::Eof => TokenKind::Eof,
        }
    }

    /// If this token is a string or field name, returns its text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::String(s) | Token::FieldName(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces a scalar token to its string rendition.
    ///
    /// Strings and field names return their text, booleans and numbers their
    /// display form. Structural tokens, `null` and end-of-input return
    /// `None`. Registrars occasionally put bare numbers where strings
    /// belong; this is how those survive into parameter values.
    #[must_use]
    pub fn value_as_string(&self) -> Option<String> {
        match self {
            Token::String(s) | Token::FieldName(s) => Some(s.clone()),
            Token::Bool(b) => Some(b.to_string()),
            Token::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// A pull-based JSON token source.
///
/// This is the engine's only view of the input. The operation set is the
/// minimum dialect recovery needs: step forward one token, re-inspect the
/// token just read, skip a subtree wholesale, and report the current line
/// for diagnostics.
pub trait TokenCursor {
    /// Advances to the next token and returns it.
    ///
    /// Once the input is exhausted at top level, returns [`Token::Eof`]
    /// forever. Ending inside an unclosed array or object is a syntax error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`], [`Error::UnexpectedEof`] or [`Error::Io`]
    /// if the underlying bytes cannot be tokenized.
    fn advance(&mut self) -> Result<Token>;

    /// Returns the token most recently returned by [`advance`], or `None` if
    /// the cursor has not been advanced yet.
    ///
    /// [`advance`]: TokenCursor::advance
    fn current(&self) -> Option<&Token>;

    /// Current line number of the input, 1-based.
    fn line(&self) -> usize;

    /// If the current token opens an array or object, consumes tokens up to
    /// and including the matching close. Any other current token is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates tokenization errors from [`advance`].
    ///
    /// [`advance`]: TokenCursor::advance
    fn skip_subtree(&mut self) -> Result<()> {
        match self.current().map(Token::kind) {
            Some(TokenKind::StartArray | TokenKind::StartObject) => {}
            _ => return Ok(()),
        }
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance()? {
                Token::StartArray | Token::StartObject => depth += 1,
                Token::EndArray | Token::EndObject => depth -= 1,
                Token::Eof => {
                    return Err(Error::unexpected_eof(self.line(), 0, "closing bracket"))
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Tracks whether the next string inside an object is a key or a value.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Array,
    Object { awaiting_key: bool },
}

/// The built-in JSON tokenizer.
///
/// Owns its input and walks it byte by byte, producing [`Token`]s on demand.
/// Separators (`,` and `:`) and whitespace are consumed silently; escape
/// sequences, including `\uXXXX`, are decoded in string tokens. Integral
/// numbers become [`Number::Integer`], anything with a fraction or exponent
/// becomes [`Number::Float`].
///
/// # Examples
///
/// ```rust
/// use jcard_stream::{JsonCursor, Token, TokenCursor};
///
/// let mut cursor = JsonCursor::new("[\"fn\", -3.5]");
/// assert_eq!(cursor.advance().unwrap(), Token::StartArray);
/// assert_eq!(cursor.advance().unwrap(), Token::String("fn".to_string()));
/// ```
pub struct JsonCursor {
    input: String,
    position: usize,
    line: usize,
    column: usize,
    frames: Vec<Frame>,
    current: Option<Token>,
}

impl JsonCursor {
    /// Creates a cursor over the given JSON text.
    pub fn new(input: impl Into<String>) -> Self {
        JsonCursor {
            input: input.into(),
            position: 0,
            line: 1,
            column: 1,
            frames: Vec::new(),
            current: None,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes whitespace and the structural separators `,` and `:`.
    fn skip_separators(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || ch == ',' || ch == ':' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// A value just finished at the current nesting level; if we are inside
    /// an object, the next string there is a key again.
    fn end_of_value(&mut self) {
        if let Some(Frame::Object { awaiting_key }) = self.frames.last_mut() {
            *awaiting_key = true;
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_separators();
        let Some(ch) = self.peek_char() else {
            if self.frames.is_empty() {
                return Ok(Token::Eof);
            }
            return Err(Error::unexpected_eof(
                self.line,
                self.column,
                "closing bracket",
            ));
        };
        match ch {
            '[' => {
                self.next_char();
                self.end_of_value();
                self.frames.push(Frame::Array);
                Ok(Token::StartArray)
            }
            ']' => {
                self.next_char();
                match self.frames.pop() {
                    Some(Frame::Array) => Ok(Token::EndArray),
                    _ => Err(Error::syntax(self.line, self.column, "mismatched ']'")),
                }
            }
            '{' => {
                self.next_char();
                self.end_of_value();
                self.frames.push(Frame::Object { awaiting_key: true });
                Ok(Token::StartObject)
            }
            '}' => {
                self.next_char();
                match self.frames.pop() {
                    Some(Frame::Object { .. }) => Ok(Token::EndObject),
                    _ => Err(Error::syntax(self.line, self.column, "mismatched '}'")),
                }
            }
            '"' => {
                let text = self.read_string()?;
                if let Some(Frame::Object { awaiting_key }) = self.frames.last_mut() {
                    if *awaiting_key {
                        *awaiting_key = false;
                        return Ok(Token::FieldName(text));
                    }
                    *awaiting_key = true;
                }
                Ok(Token::String(text))
            }
            '-' | '0'..='9' => {
                let number = self.read_number()?;
                self.end_of_value();
                Ok(Token::Number(number))
            }
            't' | 'f' => {
                let value = self.read_bool()?;
                self.end_of_value();
                Ok(Token::Bool(value))
            }
            'n' => {
                self.read_null()?;
                self.end_of_value();
                Ok(Token::Null)
            }
            other => Err(Error::syntax(
                self.line,
                self.column,
                &format!("unexpected character '{}'", other),
            )),
        }
    }

    fn read_string(&mut self) -> Result<String> {
        self.next_char(); // consume opening quote
        let mut result = String::new();
        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('/') => result.push('/'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('u') => {
                        let mut hex = String::new();
                        for _ in 0..4 {
                            match self.next_char() {
                                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                                _ => {
                                    return Err(Error::syntax(
                                        self.line,
                                        self.column,
                                        "invalid unicode escape sequence (expected 4 hex digits)",
                                    ))
                                }
                            }
                        }
                        let code_point = u32::from_str_radix(&hex, 16).map_err(|_| {
                            Error::syntax(self.line, self.column, "invalid hex in unicode escape")
                        })?;
                        let ch = char::from_u32(code_point).ok_or_else(|| {
                            Error::syntax(self.line, self.column, "invalid unicode code point")
                        })?;
                        result.push(ch);
                    }
                    Some(other) => {
                        // Unknown escape - preserve literally (lenient parsing)
                        result.push('\\');
                        result.push(other);
                    }
                    None => {
                        return Err(Error::unexpected_eof(
                            self.line,
                            self.column,
                            "string escape",
                        ))
                    }
                },
                other => result.push(other),
            }
        }
        Err(Error::unexpected_eof(self.line, self.column, "closing '\"'"))
    }

    fn read_number(&mut self) -> Result<Number> {
        let start = self.position;
        if self.peek_char() == Some('-') {
            self.next_char();
        }
        let mut is_float = false;
        while let Some(ch) = self.peek_char() {
            match ch {
                '0'..='9' => {
                    self.next_char();
                }
                '.' | 'e' | 'E' => {
                    is_float = true;
                    self.next_char();
                    if let Some(sign) = self.peek_char() {
                        if sign == '+' || sign == '-' {
                            self.next_char();
                        }
                    }
                }
                _ => break,
            }
        }
        let text = &self.input[start..self.position];
        if is_float {
            text.parse::<f64>()
                .map(Number::Float)
                .map_err(|_| Error::syntax(self.line, self.column, "invalid number"))
        } else {
            text.parse::<i64>()
                .map(Number::Integer)
                .or_else(|_| text.parse::<f64>().map(Number::Float))
                .map_err(|_| Error::syntax(self.line, self.column, "invalid number"))
        }
    }

    fn read_bool(&mut self) -> Result<bool> {
        if self.input[self.position..].starts_with("true") {
            for _ in 0..4 {
                self.next_char();
            }
            Ok(true)
        } else if self.input[self.position..].starts_with("false") {
            for _ in 0..5 {
                self.next_char();
            }
            Ok(false)
        } else {
            Err(Error::syntax(self.line, self.column, "expected boolean"))
        }
    }

    fn read_null(&mut self) -> Result<()> {
        if self.input[self.position..].starts_with("null") {
            for _ in 0..4 {
                self.next_char();
            }
            Ok(())
        } else {
            Err(Error::syntax(self.line, self.column, "expected null"))
        }
    }
}

impl TokenCursor for JsonCursor {
    fn advance(&mut self) -> Result<Token> {
        let token = self.next_token()?;
        self.current = Some(token.clone());
        Ok(token)
    }

    fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn line(&self) -> usize {
        self.line
    }
}
