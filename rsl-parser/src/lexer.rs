use logos::Logos;
use rsl_source::{LexError, Span};

#[derive(Debug, Logos, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // literals
    #[regex("[0-9]+")]
    Integer,
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    String,

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // binary operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Asterisk,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("=")]
    Equals,
    #[token(";")]
    Semi,

    // keywords
    #[token("let")]
    Let,
    #[token("print")]
    Print,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated by [`lex`] when the underlying lexer is exhausted.
    Eof,
}

impl TokenKind {
    /// Returns the left binding power used by the expression parser.
    /// Statement delimiters and end of input return `-1` so that they never continue an expression.
    pub fn left_binding_power(self) -> i8 {
        match self {
            TokenKind::Asterisk => 3,
            TokenKind::Plus | TokenKind::Minus => 2,
            TokenKind::Eof | TokenKind::Semi => -1,
            _ => 0,
        }
    }

    /// Returns `true` if a token of this kind can start an expression.
    pub fn can_begin_expr(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::String
                | TokenKind::Float
                | TokenKind::Integer
                | TokenKind::OpenParen
        )
    }

    /// Returns `true` if a token of this kind can start a statement.
    pub fn can_begin_stmt(self) -> bool {
        matches!(self, TokenKind::Let | TokenKind::Print) || self.can_begin_expr()
    }
}

/// A classified lexeme borrowed from the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Literal text of the token (including the quotes of a string literal).
    pub text: &'a str,
    /// Absolute byte span inside the source text.
    pub span: Span,
}

/// Returns the token starting at (or after the whitespace following) byte offset `pos`
/// and the offset immediately after it.
///
/// The function does not keep any state between calls: lexing the same `(text, pos)` twice
/// returns the same token, which lets the parser peek and backtrack freely.
pub fn lex(text: &str, pos: usize) -> Result<(Token<'_>, usize), LexError> {
    let mut lexer = TokenKind::lexer(&text[pos..]);
    let kind = match lexer.next() {
        Some(kind) => kind,
        None => {
            let end = text.len();
            let eof = Token {
                kind: TokenKind::Eof,
                text: "",
                span: end..end,
            };
            return Ok((eof, end));
        }
    };
    let span = pos + lexer.span().start..pos + lexer.span().end;

    match kind {
        TokenKind::Error => return Err(unrecognized(text, span.start)),
        TokenKind::Integer | TokenKind::Float => {
            if next_char(text, span.end).map_or(false, is_number_tail) {
                let end = scan_while(text, span.end, is_number_tail);
                return Err(LexError::MalformedNumber {
                    text: text[span.start..end].to_string(),
                    span: span.start..end,
                });
            }
        }
        TokenKind::Identifier | TokenKind::Let | TokenKind::Print => {
            if next_char(text, span.end).map_or(false, |ch| !is_separator(ch)) {
                let end = scan_while(text, span.end, |ch| !is_separator(ch));
                return Err(LexError::MalformedIdentifier {
                    text: text[span.start..end].to_string(),
                    span: span.start..end,
                });
            }
        }
        _ => {}
    }

    let token = Token {
        kind,
        text: &text[span.clone()],
        span: span.clone(),
    };
    Ok((token, span.end))
}

fn unrecognized(text: &str, start: usize) -> LexError {
    match next_char(text, start) {
        Some(quote @ ('"' | '\'')) => LexError::UnterminatedString {
            span: start..start + quote.len_utf8(),
        },
        Some(ch) => LexError::UnrecognizedChar {
            ch,
            span: start..start + ch.len_utf8(),
        },
        // logos never reports an error on an empty remainder
        None => LexError::UnrecognizedChar {
            ch: '\0',
            span: start..start,
        },
    }
}

fn next_char(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().next()
}

fn scan_while(text: &str, pos: usize, pred: impl Fn(char) -> bool) -> usize {
    text[pos..]
        .char_indices()
        .find(|&(_, ch)| !pred(ch))
        .map_or(text.len(), |(i, _)| pos + i)
}

fn is_number_tail(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

/// Characters that may directly follow an identifier.
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '+' | '-' | '*' | '=' | ';' | '/')
}
