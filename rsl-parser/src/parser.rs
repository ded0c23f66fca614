use crate::ast::Program;
use crate::lexer::{lex, Token, TokenKind};
use rsl_source::{ParseError, Source, SyntaxError};
use tracing::trace;

mod expr;
mod stmt;

/// Default limit for nested expressions and blocks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A parsed node together with the byte offset immediately after it.
pub type ParseResult<T> = Result<(T, usize), SyntaxError>;

/// Recursive descent parser threading explicit byte offsets through [`lex`].
///
/// The parser never caches tokens, so every method is a function of the offset it receives.
pub struct Parser<'a> {
    /// Source code
    source: Source<'a>,
    /// Current nesting of guarded parse calls.
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: Source<'a>) -> Self {
        Self {
            source,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting of expressions and blocks.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl<'a> Parser<'a> {
    /// Parses every statement until the end of input.
    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let mut stmts = Vec::new();
        let mut pos = 0;
        loop {
            let (token, _) = self.lex(pos)?;
            if token.kind == TokenKind::Eof {
                break;
            }
            let (stmt, next) = self.parse_stmt(pos)?;
            trace!(?stmt, "parsed statement");
            stmts.push(stmt);
            pos = next;
        }
        Ok(Program { stmts })
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn lex(&self, pos: usize) -> Result<(Token<'a>, usize), SyntaxError> {
        Ok(lex(self.source.content, pos)?)
    }

    /// Requires a token of `kind` at `pos` and returns the offset after it.
    /// Otherwise returns the error built by `err` from the token actually found.
    fn expect(
        &self,
        kind: TokenKind,
        pos: usize,
        err: impl FnOnce(Token<'a>) -> ParseError,
    ) -> Result<usize, SyntaxError> {
        let (token, next) = self.lex(pos)?;
        if token.kind == kind {
            Ok(next)
        } else {
            Err(err(token).into())
        }
    }

    /// Runs `f` one nesting level deeper, failing once the depth limit is reached.
    fn nested<T>(
        &mut self,
        pos: usize,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.max_depth,
                span: pos..pos,
            }
            .into());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
