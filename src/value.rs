//! Values a decision can take.
//!
//! Domains are made of booleans or short string enum members. Values
//! serialize as literal JSON booleans and quoted strings, which is the
//! format of exported snapshots and shared links.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single admissible value of a decision.
///
/// # Examples
///
/// ```
/// use tweaklab::Value;
///
/// let flag = Value::Bool(true);
/// let kind = Value::text("object");
///
/// assert!(flag.is_true());
/// assert_eq!(kind.as_text(), Some("object"));
/// assert_eq!(serde_json::to_string(&kind).unwrap(), "\"object\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Text(String),
}

impl Value {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            Self::Bool(_) => None,
        }
    }

    /// True only for `Bool(true)`.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// True when this is a text value equal to `text`.
    #[must_use]
    pub fn is_text(&self, text: &str) -> bool {
        self.as_text() == Some(text)
    }

    /// Converts an arbitrary JSON value, if it is representable.
    ///
    /// Numbers, nulls, arrays and objects can never be members of a domain
    /// and yield `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Displays the value in its JSON literal form (`true`, `"object"`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display_matches_json_literal() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::text("box").to_string(), "\"box\"");
    }

    #[test]
    fn test_value_deserializes_untagged() {
        let b: Value = serde_json::from_str("true").unwrap();
        let t: Value = serde_json::from_str("\"tuple\"").unwrap();
        assert_eq!(b, Value::Bool(true));
        assert_eq!(t, Value::text("tuple"));
    }

    #[test]
    fn test_value_from_json_rejects_non_domain_shapes() {
        assert_eq!(Value::from_json(&serde_json::json!(1)), None);
        assert_eq!(Value::from_json(&serde_json::json!(null)), None);
        assert_eq!(Value::from_json(&serde_json::json!([true])), None);
        assert_eq!(Value::from_json(&serde_json::json!("x")), Some(Value::text("x")));
    }

    #[test]
    fn test_truthiness_is_strict() {
        assert!(Value::Bool(true).is_true());
        assert!(!Value::Bool(false).is_true());
        assert!(!Value::text("true").is_true());
        assert!(Value::text("object").is_text("object"));
        assert!(!Value::Bool(true).is_text("true"));
    }
}
