//! Leaf route declarations.

use crate::routing::handler::Handler;
use crate::routing::verb::Verb;

/// One leaf declaration: verb, description and what to run on a match.
#[derive(Debug, Clone)]
pub struct Route {
    verb: Verb,
    description: String,
    handler: Handler,
    method: Option<String>,
    early_ack: bool,
}

impl Route {
    pub fn new(verb: Verb, description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        Self {
            verb,
            description: description.into(),
            handler: handler.into(),
            method: None,
            early_ack: false,
        }
    }

    pub fn get(description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        Self::new(Verb::Get, description, handler)
    }

    pub fn post(description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        Self::new(Verb::Post, description, handler)
    }

    pub fn put(description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        Self::new(Verb::Put, description, handler)
    }

    pub fn delete(description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        Self::new(Verb::Delete, description, handler)
    }

    pub fn any(description: impl Into<String>, handler: impl Into<Handler>) -> Self {
        Self::new(Verb::Any, description, handler)
    }

    /// Controller method to invoke instead of `index`.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.method = Some(name.into());
        self
    }

    /// Mark the handler as time-consuming; it may acknowledge early.
    pub fn early_ack(mut self) -> Self {
        self.early_ack = true;
        self
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn is_early_ack(&self) -> bool {
        self.early_ack
    }
}
