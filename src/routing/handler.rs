//! Handlers, replies and the per-invocation call view.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::context::RequestContext;
use crate::routing::controller::Controller;
use crate::routing::error::BoxError;
use crate::routing::input::Input;
use crate::routing::params::{ParamValue, TypedParams};

/// What a handler returns. The router stores it; the HTTP layer renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Json(serde_json::Value),
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<serde_json::Value> for Reply {
    fn from(value: serde_json::Value) -> Self {
        Reply::Json(value)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Text(text) => f.write_str(text),
            Reply::Json(value) => write!(f, "{}", value),
        }
    }
}

pub type HandlerResult = Result<Reply, BoxError>;

pub type InlineFn = Arc<dyn Fn(&Call<'_, '_>) -> HandlerResult + Send + Sync>;

/// The target of a route declaration.
#[derive(Clone)]
pub enum Handler {
    /// A closure invoked directly.
    Inline(InlineFn),
    /// A controller looked up by name through the application's loader.
    ControllerRef(String),
    /// A controller already in hand, e.g. `self` inside `resolve`.
    ControllerInstance(Arc<dyn Controller>),
}

impl Handler {
    pub fn inline<F>(f: F) -> Self
    where
        F: Fn(&Call<'_, '_>) -> HandlerResult + Send + Sync + 'static,
    {
        Handler::Inline(Arc::new(f))
    }

    pub fn controller(name: impl Into<String>) -> Self {
        Handler::ControllerRef(name.into())
    }

    pub fn instance(controller: Arc<dyn Controller>) -> Self {
        Handler::ControllerInstance(controller)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Inline(_) => f.write_str("Inline"),
            Handler::ControllerRef(name) => f.debug_tuple("ControllerRef").field(name).finish(),
            Handler::ControllerInstance(controller) => f
                .debug_tuple("ControllerInstance")
                .field(&controller.name())
                .finish(),
        }
    }
}

impl From<&str> for Handler {
    fn from(name: &str) -> Self {
        Handler::ControllerRef(name.to_string())
    }
}

impl From<String> for Handler {
    fn from(name: String) -> Self {
        Handler::ControllerRef(name)
    }
}

impl From<Arc<dyn Controller>> for Handler {
    fn from(controller: Arc<dyn Controller>) -> Self {
        Handler::ControllerInstance(controller)
    }
}

/// Everything a handler may look at while it runs.
pub struct Call<'c, 'a> {
    ctx: &'c RequestContext<'a>,
    args: Vec<String>,
    early_ack: bool,
}

impl<'c, 'a> Call<'c, 'a> {
    pub(crate) fn new(ctx: &'c RequestContext<'a>, args: Vec<String>, early_ack: bool) -> Self {
        Self {
            ctx,
            args,
            early_ack,
        }
    }

    /// Positional arguments: unnamed captures for leaf routes, trailing
    /// path segments for controller methods.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn params(&self) -> &TypedParams {
        self.ctx.params()
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.ctx.params().get(name)
    }

    pub fn input(&self) -> &Input {
        self.ctx.input()
    }

    pub fn method(&self) -> &str {
        self.ctx.method()
    }

    pub fn uri(&self) -> &str {
        self.ctx.uri()
    }

    /// Set for time-consuming routes that asked to acknowledge early.
    pub fn early_ack(&self) -> bool {
        self.early_ack
    }
}

impl fmt::Debug for Call<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("method", &self.method())
            .field("uri", &self.uri())
            .field("args", &self.args)
            .field("early_ack", &self.early_ack)
            .finish()
    }
}
