//! Source code representation and error management.

use std::ops::Range;
use thiserror::Error;

/// Byte range of a lexeme inside [`Source::content`].
pub type Span = Range<usize>;

/// Represents source code.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Name shown in diagnostics (a file path or `<repl>`).
    pub name: &'a str,
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `name` and `content`.
    pub fn new(name: &'a str, content: &'a str) -> Self {
        Self { name, content }
    }

    /// Returns the 1-based `(line, column)` of the byte offset `pos`.
    /// Offsets past the end are clamped to the end of the content.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.content.len());
        let before = &self.content.as_bytes()[..pos];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let col = self
            .content
            .get(line_start..pos)
            .map_or(pos - line_start, |line| line.chars().count())
            + 1;
        (line, col)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new("<input>", content)
    }
}

/// A malformed or unrecognized lexeme.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unrecognized character {ch:?}")]
    UnrecognizedChar { ch: char, span: Span },
    #[error("malformed number literal `{text}`")]
    MalformedNumber { text: String, span: Span },
    #[error("malformed identifier `{text}`")]
    MalformedIdentifier { text: String, span: Span },
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedChar { span, .. }
            | LexError::MalformedNumber { span, .. }
            | LexError::MalformedIdentifier { span, .. }
            | LexError::UnterminatedString { span } => span.clone(),
        }
    }
}

/// A grammar violation. `found` is the literal text of the offending token
/// (empty at end of input).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unclosed parenthesis, found `{found}`")]
    UnclosedParen { found: String, span: Span },
    #[error("invalid token `{found}` in expression position")]
    InvalidExpression { found: String, span: Span },
    #[error("unknown operator `{found}`")]
    UnknownOperator { found: String, span: Span },
    #[error("invalid statement starting with `{found}`")]
    InvalidStatement { found: String, span: Span },
    #[error("delimiter `;` required after {after}, found `{found}`")]
    DelimiterRequired {
        after: &'static str,
        found: String,
        span: Span,
    },
    #[error("invalid assignment at `{found}`")]
    InvalidAssignment { found: String, span: Span },
    #[error("duplicate parameter `{ident}`")]
    DuplicateParameter { ident: String, span: Span },
    #[error("block has no tail expression, found `{found}`")]
    MissingTail { found: String, span: Span },
    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntegerOverflow { text: String, span: Span },
    #[error("nesting deeper than {limit} levels")]
    TooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnclosedParen { span, .. }
            | ParseError::InvalidExpression { span, .. }
            | ParseError::UnknownOperator { span, .. }
            | ParseError::InvalidStatement { span, .. }
            | ParseError::DelimiterRequired { span, .. }
            | ParseError::InvalidAssignment { span, .. }
            | ParseError::DuplicateParameter { span, .. }
            | ParseError::MissingTail { span, .. }
            | ParseError::IntegerOverflow { span, .. }
            | ParseError::TooDeep { span, .. } => span.clone(),
        }
    }
}

/// Represents a syntax error (compile time error).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Byte span of the offending token.
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span(),
            SyntaxError::Parse(err) => err.span(),
        }
    }
}
