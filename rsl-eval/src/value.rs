use std::fmt;

/// A fully evaluated value. There is no boolean variant: the language has no boolean literal
/// or comparison operator, so no operation can produce one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Name of the value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(val) => write!(f, "{}", val),
            // `{:?}` always keeps the fractional part (`2.0`, not `2`)
            Value::Float(val) => write!(f, "{:?}", val),
            Value::Str(val) => f.write_str(val),
        }
    }
}
