use rsl_eval::InterpreterError;
use rsl_source::{LexError, ParseError, Span, SyntaxError};
use thiserror::Error;

/// A classified failure of one run. Every run stops at the first error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lexer(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}

impl Error {
    /// Short name of the error class, used by the error reporter.
    pub fn class(&self) -> &'static str {
        match self {
            Error::Lexer(_) => "lexer",
            Error::Parse(_) => "parse",
            Error::Interpreter(_) => "interpreter",
        }
    }

    /// Byte span of the offending token. Interpreter errors carry no position.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lexer(err) => Some(err.span()),
            Error::Parse(err) => Some(err.span()),
            Error::Interpreter(_) => None,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::Lex(err) => Error::Lexer(err),
            SyntaxError::Parse(err) => Error::Parse(err),
        }
    }
}
