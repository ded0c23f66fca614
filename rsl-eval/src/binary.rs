//! Operand unification for binary operators.

use rsl_parser::ast::BinOp;

use crate::{InterpreterError, Value};

/// Applies `op` after unifying the operand types.
///
/// * `Int op Int` and `Float op Float` stay in their type. Integer arithmetic wraps.
/// * Mixed `Int`/`Float` operands promote the `Int` to `Float`.
/// * `Str + Str` concatenates. Any other operation involving a `Str` is a type error.
pub fn eval_binary(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, InterpreterError> {
    /// Generate the arithmetic for one pair of numeric operands.
    macro_rules! gen_num_binary_op {
        (int $op: expr, $a: expr, $b: expr) => {{
            let (a, b): (i64, i64) = ($a, $b);
            Ok(Value::Int(match $op {
                BinOp::Add => a.wrapping_add(b),
                BinOp::Sub => a.wrapping_sub(b),
                BinOp::Mult => a.wrapping_mul(b),
            }))
        }};
        (float $op: expr, $a: expr, $b: expr) => {{
            let (a, b): (f64, f64) = ($a, $b);
            Ok(Value::Float(match $op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mult => a * b,
            }))
        }};
    }

    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => gen_num_binary_op!(int op, a, b),
        (Value::Float(a), Value::Float(b)) => gen_num_binary_op!(float op, a, b),
        (Value::Int(a), Value::Float(b)) => gen_num_binary_op!(float op, a as f64, b),
        (Value::Float(a), Value::Int(b)) => gen_num_binary_op!(float op, a, b as f64),
        (Value::Str(mut a), Value::Str(b)) if op == BinOp::Add => {
            a.push_str(&b);
            Ok(Value::Str(a))
        }
        (lhs, rhs) => Err(InterpreterError::Type {
            op,
            lhs: lhs.type_name(),
            rhs: rhs.type_name(),
        }),
    }
}
