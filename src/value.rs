use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// A single scalar cell of a tabular dataset.
///
/// Cells arrive from the ingestion adapters dynamically typed: a CSV field
/// that parses as a number becomes `Number`, everything else stays `Text`,
/// and empty fields become `Null`. The analytics code never assumes a
/// column is homogeneous; each component applies its own documented
/// coercion policy via [`Value::to_number`] and [`Value::label`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A missing cell (`null` in JSON, empty field in CSV).
    Null,
    /// A boolean cell.
    Bool(bool),
    /// A numeric cell.
    Number(f64),
    /// A textual cell.
    Text(String),
}

impl Value {
    /// Whether this cell counts as missing: null or the empty string.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Permissive numeric coercion.
    ///
    /// Numbers pass through if finite, booleans map to 1/0, text is trimmed
    /// and parsed as `f64`. Null, empty text, unparsable text, and
    /// non-finite results all coerce to `None`; the caller decides whether
    /// that means "substitute zero" (correlation) or "exclude" (chart
    /// aggregation).
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Number(_) => None,
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            Value::Null => None,
        }
    }

    /// The textual payload, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// String representation used for grouping labels and frequency counts.
    ///
    /// Whole numbers render without a trailing `.0` so that a column typed
    /// numerically by the ingestion adapter still groups under the label a
    /// user expects (`"3"`, not `"3.0"`).
    pub fn label(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// Distinctness follows set semantics over raw cells: 1 and "1" are
// different values, NaN equals NaN, and 0.0 equals -0.0.
fn number_bits(n: f64) -> u64 {
    if n == 0.0 {
        0
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => number_bits(*a) == number_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Number(n) => {
                state.write_u8(2);
                state.write_u64(number_bits(*n));
            }
            Value::Text(s) => {
                state.write_u8(3);
                s.hash(state);
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_to_number_coercion() {
        assert_eq!(Value::Number(3.5).to_number(), Some(3.5));
        assert_eq!(Value::from("  42 ").to_number(), Some(42.0));
        assert_eq!(Value::from("1e3").to_number(), Some(1000.0));
        assert_eq!(Value::Bool(true).to_number(), Some(1.0));
        assert_eq!(Value::from("abc").to_number(), None);
        assert_eq!(Value::from("").to_number(), None);
        assert_eq!(Value::Null.to_number(), None);
        // Non-finite results are rejected, not propagated
        assert_eq!(Value::from("inf").to_number(), None);
        assert_eq!(Value::Number(f64::NAN).to_number(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Value::Number(3.0).label(), "3");
        assert_eq!(Value::Number(3.5).label(), "3.5");
        assert_eq!(Value::Null.label(), "null");
        assert_eq!(Value::Bool(false).label(), "false");
        assert_eq!(Value::from("x").label(), "x");
    }

    #[test]
    fn test_set_distinctness() {
        let mut set = HashSet::new();
        set.insert(Value::Number(1.0));
        set.insert(Value::from("1"));
        set.insert(Value::Null);
        set.insert(Value::Null);
        set.insert(Value::Number(-0.0));
        set.insert(Value::Number(0.0));
        // 1 vs "1" distinct, nulls collapse, signed zeros collapse
        assert_eq!(set.len(), 4);
    }
}
