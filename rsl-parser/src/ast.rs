use std::fmt;
use std::rc::Rc;

use crate::lexer::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mult,
}

impl BinOp {
    /// Returns the operator for an infix token or `None` if `kind` is not a binary operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Asterisk => Some(BinOp::Mult),
            _ => None,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mult => "*",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLit(i64),
    FloatLit(f64),
    /// A string literal without its quotes.
    StringLit(String),
    /// A variable reference (e.g. `x`) or an invocation with arguments (e.g. `f 1 x`).
    VariableRef { ident: String, args: Vec<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Returns the identifier if `self` is a variable reference without arguments.
    pub fn as_bare_ref(&self) -> Option<&str> {
        match self {
            Expr::VariableRef { ident, args } if args.is_empty() => Some(ident),
            _ => None,
        }
    }
}

/// The right-hand side of a `let`: parameters, nested statements and the tail expression
/// that produces the block's value.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub tail: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let ident params* = block;`
    /// The block is reference counted because bindings outlive the statement that created them.
    Let { ident: String, block: Rc<Block> },
    Print(Expr),
    ExprStmt(Expr),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}
