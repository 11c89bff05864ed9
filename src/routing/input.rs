//! Request input container.
//!
//! Holds what the front door parsed out of the query string and body.
//! Handlers read it; the router never looks at it.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Input {
    query: HashMap<String, String>,
    post: HashMap<String, String>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL query string (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut input = Self::new();
        input.query.extend(
            url::form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
        input
    }

    /// Merge an `application/x-www-form-urlencoded` body into the POST data.
    pub fn extend_post_form(&mut self, body: &[u8]) {
        self.post.extend(
            url::form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_post(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post.insert(key.into(), value.into());
        self
    }

    pub fn set_post(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.post.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn get_or<'s>(&'s self, key: &str, default: &'s str) -> &'s str {
        self.get(key).unwrap_or(default)
    }

    pub fn post(&self, key: &str) -> Option<&str> {
        self.post.get(key).map(String::as_str)
    }

    pub fn post_or<'s>(&'s self, key: &str, default: &'s str) -> &'s str {
        self.post(key).unwrap_or(default)
    }
}
