use serde::Serialize;

/// A literal value carried by a query term or range bound.
///
/// Numbers keep the type they were written with, so `a:[1 TO 2.5]` renders
/// `1` as an integer and `2.5` as a float in the target document.
///
/// # Examples
///
/// ```
/// use lucene_dsl::Value;
///
/// let integer = Value::from(42);
/// let float = Value::from(2.5);
/// let text = Value::from("elastic");
///
/// assert_eq!(integer.as_string(), "42");
/// assert_eq!(float.as_string(), "2.5");
/// assert_eq!(text.as_string(), "elastic");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Term text, phrase quotes and escapes included
    String(String),
}

impl Value {
    /// Text form used inside query strings.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
        }
    }

    /// Arithmetic negation, used for `-5` style range bounds.
    pub fn negate(self) -> Option<Value> {
        match self {
            Value::Integer(n) => n.checked_neg().map(Value::Integer),
            Value::Float(n) => Some(Value::Float(-n)),
            Value::String(_) => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Float(n) => write!(f, "{}", n),
            Value::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
