//! Lexer, AST and parser for rsl.

pub mod ast;
pub mod lexer;
pub mod parser;
