//! Failpoint args value object
//!
//! Caller-supplied data attached to a failpoint configuration and handed to
//! predicates and fire-handlers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// Immutable key/value payload of a failpoint
///
/// A configured payload always has at least one key. The empty payload
/// ([`FailpointArgs::empty`]) stands in for "no args configured" when a
/// caller explicitly asks for args.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FailpointArgs(Map<String, Value>);

impl FailpointArgs {
    /// Validate a JSON value as failpoint args
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidArgs` unless the value is an object
    /// with at least one key.
    pub fn new(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) if !map.is_empty() => Ok(Self(map)),
            other => Err(ValidationError::InvalidArgs(other.to_string())),
        }
    }

    /// The empty payload returned for failpoints without args
    #[must_use]
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// Look up a single argument
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up an argument as an i64
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    /// Look up an argument as a string slice
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// True when no args are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of args
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FailpointArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

impl<'de> Deserialize<'de> for FailpointArgs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_object_with_keys() {
        let args = FailpointArgs::new(json!({"userId": 456})).unwrap();
        assert_eq!(args.get_i64("userId"), Some(456));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn rejects_string() {
        let err = FailpointArgs::new(json!("args")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidArgs("\"args\"".to_string()));
    }

    #[test]
    fn rejects_empty_object() {
        assert!(FailpointArgs::new(json!({})).is_err());
    }

    #[test]
    fn rejects_null_and_arrays() {
        assert!(FailpointArgs::new(Value::Null).is_err());
        assert!(FailpointArgs::new(json!([1, 2])).is_err());
    }

    #[test]
    fn empty_has_no_keys() {
        let args = FailpointArgs::empty();
        assert!(args.is_empty());
        assert!(args.get("anything").is_none());
    }

    #[test]
    fn string_lookup() {
        let args = FailpointArgs::new(json!({"my": "args"})).unwrap();
        assert_eq!(args.get_str("my"), Some("args"));
        assert_eq!(args.get_i64("my"), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let args = FailpointArgs::new(json!({"my": "args"})).unwrap();
        assert_eq!(serde_json::to_value(&args).unwrap(), json!({"my": "args"}));
        assert_eq!(args.to_string(), r#"{"my":"args"}"#);
    }
}
