//! Tree-walking evaluator for rsl programs.

pub mod binary;
mod error;
pub mod evaluator;
pub mod output;
pub mod scope;
pub mod value;

pub use error::InterpreterError;
pub use evaluator::Evaluator;
pub use output::{OutputSink, Stdout};
pub use value::Value;
