use rsl_parser::ast::BinOp;
use thiserror::Error;

/// A failure while evaluating a parsed program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    #[error("unbound variable `{ident}`")]
    UnboundVariable { ident: String },
    #[error("`{ident}` expects {expected} argument(s), got {got}")]
    Arity {
        ident: String,
        expected: usize,
        got: usize,
    },
    #[error("type mismatch: cannot apply `{op}` to {lhs} and {rhs}")]
    Type {
        op: BinOp,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit { limit: usize },
}
