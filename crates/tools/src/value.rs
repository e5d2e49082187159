//! Loose value type for data that crosses an untyped boundary.

/// Largest magnitude at which every integer is still exactly representable
/// in an `f64`. Numbers beyond it fail the [`Value::is_number`] check.
pub(crate) const MAX_SAFE_NUMBER: f64 = 9_007_199_254_740_991.0;

/// A dynamically typed value.
///
/// Maps keep their insertion order; batch setters that iterate a map apply
/// its entries in exactly this order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// NaN and values outside the safe-integer magnitude do not count.
    pub fn is_number(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_nan() && n.abs() <= MAX_SAFE_NUMBER,
            _ => false,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Seq(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_primitive(&self) -> bool {
        self.is_null() || self.is_boolean() || self.is_number() || self.is_string()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Builds a sequence value from anything convertible.
    pub fn seq<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Value {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Builds a map value, preserving the order of `pairs`.
    pub fn map<K: Into<String>, V: Into<Value>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Value {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Number(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}
