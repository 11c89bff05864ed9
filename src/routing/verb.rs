//! HTTP verbs a route declaration can be bound to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Verb of a route declaration.
///
/// `Any` matches every request method. Request methods themselves are kept
/// as plain uppercase strings on the context, since a request may carry a
/// method no declaration names (e.g. `PATCH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Any,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Any => "ANY",
        }
    }

    /// Returns true if `name` is a verb-scoped controller method such as
    /// `POSTjoin`. Those are reachable only through the request's own verb.
    pub fn is_scoped_method(name: &str) -> bool {
        [Verb::Get, Verb::Post, Verb::Put, Verb::Delete]
            .iter()
            .any(|verb| name.starts_with(verb.as_str()))
    }

    /// Returns true if a request with `method` may be handled by this verb.
    pub fn accepts(&self, method: &str) -> bool {
        match self {
            Verb::Any => true,
            verb => verb.as_str().eq_ignore_ascii_case(method),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verb `{0}` (expected get, post, put, delete or any)")]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "post" => Ok(Verb::Post),
            "put" => Ok(Verb::Put),
            "delete" => Ok(Verb::Delete),
            "any" => Ok(Verb::Any),
            _ => Err(UnknownVerb(s.to_string())),
        }
    }
}
