//! Raw request parameters and the values they carry.
//!
//! Request parameters arrive loosely typed: a page number may be the integer
//! `3` or the string `"3"`. [`FilterValue`] keeps the value as it came in and
//! [`FilterValue::as_int`] applies the lenient numeric policy used for page
//! and size parameters.
//!
//! ```rust
//! use pager_query::{FilterArgs, FilterValue};
//!
//! let args = FilterArgs::new()
//!     .arg("status", "active")
//!     .arg("page", 2);
//!
//! assert_eq!(args.get("page"), Some(&FilterValue::Int(2)));
//! assert_eq!(FilterValue::from("3").as_int(), Some(3));
//! assert_eq!(FilterValue::from("three").as_int(), None);
//! ```

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar request parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read the value as an integer.
    ///
    /// Native integers are returned as-is and strings are parsed as base-10
    /// `i64` without trimming. Anything else, including floats and strings
    /// that do not parse, yields `None` so the caller keeps its default.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::String(s) => s.parse::<i64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<&serde_json::Value> for FilterValue {
    /// Scalars map directly; arrays and objects are kept as their JSON text.
    fn from(v: &serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::String(s.clone()),
            other => Self::String(other.to_string()),
        }
    }
}

/// The request parameters for one list call.
///
/// Iteration follows insertion order. Inserting an existing key replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterArgs {
    args: IndexMap<String, FilterValue>,
}

impl FilterArgs {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Option<FilterValue> {
        self.args.insert(key.into(), value.into())
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.args.get(key)
    }

    /// Check whether a parameter is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reorder keys lexicographically.
    ///
    /// Use this when the parameters came from an unordered source and the
    /// generated clause text must be reproducible.
    pub fn sorted(mut self) -> Self {
        self.args.sort_keys();
        self
    }

    /// Build from a decoded query string.
    ///
    /// `HashMap` iteration order is random, so the keys are sorted.
    pub fn from_query_map(map: &HashMap<String, String>) -> Self {
        map.iter()
            .map(|(k, v)| (k.clone(), FilterValue::String(v.clone())))
            .collect::<Self>()
            .sorted()
    }

    /// Build from a JSON object in the object's iteration order.
    ///
    /// Non-object values produce an empty set.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value.as_object() {
            Some(object) => object
                .iter()
                .map(|(k, v)| (k.clone(), FilterValue::from(v)))
                .collect(),
            None => Self::new(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FilterArgs
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

impl<'a> IntoIterator for &'a FilterArgs {
    type Item = (&'a String, &'a FilterValue);
    type IntoIter = indexmap::map::Iter<'a, String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}
