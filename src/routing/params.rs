//! Typed named-parameter store.
//!
//! Named captures (`(id:num)`) land here instead of in the handler's
//! positional argument list. `num` captures are stored as integers.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// A value captured by a named pattern token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            ParamValue::Int(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

/// Per-request store of named captures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypedParams {
    values: HashMap<String, ParamValue>,
}

impl TypedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let mut params = TypedParams::new();
        params.set("id", ParamValue::Int(7));
        params.set("slug", ParamValue::Str("hello".into()));

        assert_eq!(params.int("id"), Some(7));
        assert_eq!(params.str("id"), None);
        assert_eq!(params.str("slug"), Some("hello"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_later_capture_overwrites() {
        let mut params = TypedParams::new();
        params.set("id", ParamValue::Int(1));
        params.set("id", ParamValue::Int(2));
        assert_eq!(params.int("id"), Some(2));
    }
}
