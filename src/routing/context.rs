//! Per-request routing state and the declaration API.
//!
//! One `RequestContext` is created per request and threaded by `&mut`
//! through every declaration. Declarations come in three shapes:
//! - leaf routes (`route`, `get`, `post`, ...) match the whole remaining URI
//! - controllers consume a prefix and pick a method from the next segment
//! - groups consume a prefix and run a nested block that may `back()` out

use std::sync::Arc;

use serde::Serialize;

use crate::routing::cache::PatternCache;
use crate::routing::controller::{Controller, ControllerLoader};
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::handler::{Call, Handler, Reply};
use crate::routing::input::Input;
use crate::routing::params::{ParamValue, TypedParams};
use crate::routing::pattern::trim_trailing_slash;
use crate::routing::route::Route;
use crate::routing::settlement::Settlement;
use crate::routing::uri::UriStack;
use crate::routing::verb::Verb;

/// Final outcome of routing one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "reply", rename_all = "lowercase")]
pub enum Resolution {
    /// A declaration settled with a reply.
    Reply(Reply),
    /// A group or controller claimed the request without producing a reply.
    Empty,
    /// Nothing settled. The route table lacks a catch-all.
    Unsettled,
}

/// A nested block opened by a group or a controller's `resolve`.
#[derive(Debug, Clone, Copy)]
struct Scope {
    /// URI stack depth before this scope consumed its prefix.
    base: usize,
    given_back: bool,
}

pub struct RequestContext<'a> {
    method: String,
    uri: UriStack,
    settlement: Settlement,
    params: TypedParams,
    scopes: Vec<Scope>,
    input: &'a Input,
    loader: &'a dyn ControllerLoader,
    patterns: &'a PatternCache,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        method: &str,
        path: &str,
        input: &'a Input,
        loader: &'a dyn ControllerLoader,
        patterns: &'a PatternCache,
    ) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            uri: UriStack::new(path),
            settlement: Settlement::Unsettled,
            params: TypedParams::new(),
            scopes: Vec::new(),
            input,
            loader,
            patterns,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The part of the path not yet consumed by a controller or group.
    pub fn uri(&self) -> &str {
        self.uri.current()
    }

    /// Number of prefixes currently consumed.
    pub fn uri_depth(&self) -> usize {
        self.uri.depth()
    }

    pub fn params(&self) -> &TypedParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn input(&self) -> &'a Input {
        self.input
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn is_settled(&self) -> bool {
        self.settlement.is_settled()
    }

    pub fn result(&self) -> Option<&Reply> {
        self.settlement.reply()
    }

    pub fn into_resolution(self) -> Resolution {
        match self.settlement {
            Settlement::Settled {
                reply: Some(reply), ..
            } => Resolution::Reply(reply),
            Settlement::Settled { reply: None, .. } => Resolution::Empty,
            Settlement::Unsettled | Settlement::PendingCancel => Resolution::Unsettled,
        }
    }

    pub fn get(&mut self, description: &str, handler: impl Into<Handler>) -> RouteResult<bool> {
        self.declare(Verb::Get, description, handler)
    }

    pub fn post(&mut self, description: &str, handler: impl Into<Handler>) -> RouteResult<bool> {
        self.declare(Verb::Post, description, handler)
    }

    pub fn put(&mut self, description: &str, handler: impl Into<Handler>) -> RouteResult<bool> {
        self.declare(Verb::Put, description, handler)
    }

    pub fn delete(&mut self, description: &str, handler: impl Into<Handler>) -> RouteResult<bool> {
        self.declare(Verb::Delete, description, handler)
    }

    pub fn any(&mut self, description: &str, handler: impl Into<Handler>) -> RouteResult<bool> {
        self.declare(Verb::Any, description, handler)
    }

    fn declare(
        &mut self,
        verb: Verb,
        description: &str,
        handler: impl Into<Handler>,
    ) -> RouteResult<bool> {
        if !self.accepts(verb) {
            return Ok(false);
        }
        self.fit_general(verb, description, &handler.into(), None, false)
    }

    /// Evaluate a leaf declaration. Returns whether it matched.
    pub fn route(&mut self, route: &Route) -> RouteResult<bool> {
        if !self.accepts(route.verb()) {
            return Ok(false);
        }
        self.fit_general(
            route.verb(),
            route.description(),
            route.handler(),
            route.method_name(),
            route.is_early_ack(),
        )
    }

    fn accepts(&self, verb: Verb) -> bool {
        self.settlement.is_open() && verb.accepts(&self.method)
    }

    fn fit_general(
        &mut self,
        verb: Verb,
        description: &str,
        handler: &Handler,
        method: Option<&str>,
        early_ack: bool,
    ) -> RouteResult<bool> {
        let pattern = self.patterns.get_or_compile(description)?;
        let Some(captured) = pattern.matches(trim_trailing_slash(self.uri.current())) else {
            return Ok(false);
        };

        for (name, value) in captured.named {
            self.params.set(name, value);
        }

        tracing::trace!(
            verb = %verb,
            description,
            uri = %self.uri.current(),
            "route matched"
        );

        let reply = {
            let call = Call::new(self, captured.args, early_ack);
            match handler {
                Handler::Inline(f) => {
                    if let Some(method) = method {
                        return Err(RouteError::InlineMethod(method.to_string()));
                    }
                    f(&call).map_err(RouteError::Handler)?
                }
                Handler::ControllerRef(name) => {
                    let controller = self.loader.load(name)?;
                    invoke(controller.as_ref(), method.unwrap_or("index"), &call)?
                }
                Handler::ControllerInstance(controller) => {
                    invoke(controller.as_ref(), method.unwrap_or("index"), &call)?
                }
            }
        };

        self.end(Some(reply));
        Ok(true)
    }

    /// Mount a controller under a literal prefix.
    ///
    /// The method is picked from the first remaining segment, trying
    /// `<VERB><segment>`, then `<segment>`, then `resolve`. A segment that
    /// already names a verb-scoped method (`POSTjoin`) is never called
    /// directly. When none
    /// exists the prefix is put back and the declaration does not match.
    pub fn controller(&mut self, prefix: &str, handler: impl Into<Handler>) -> RouteResult<bool> {
        if !self.settlement.is_open() {
            return Ok(false);
        }
        self.fit_controller(prefix, &handler.into())
    }

    pub(crate) fn fit_controller(&mut self, prefix: &str, handler: &Handler) -> RouteResult<bool> {
        if !self.settlement.is_open() || !self.uri.strip_prefix(prefix) {
            return Ok(false);
        }

        let controller = match self.load_controller(prefix, handler) {
            Ok(controller) => controller,
            Err(e) => {
                self.uri.pop();
                return Err(e);
            }
        };

        let (segment, args) = split_action(self.uri.current());
        let verb_method = format!("{}{}", self.method, segment);

        let found = {
            let call = Call::new(self, args, false);
            controller.call(&verb_method, &call).or_else(|| {
                if Verb::is_scoped_method(&segment) {
                    None
                } else {
                    controller.call(&segment, &call)
                }
            })
        };

        if let Some(result) = found {
            tracing::trace!(prefix, method = %segment, "controller method resolved");
            let reply = result.map_err(RouteError::Handler)?;
            self.end(Some(reply));
            return Ok(true);
        }

        if controller.resolves() {
            tracing::trace!(prefix, uri = %self.uri.current(), "controller resolving");
            self.open_scope();
            let result = controller.resolve(self);
            self.scopes.pop();
            let reply = result?;
            self.end(reply);
            return Ok(!self.settlement.is_open());
        }

        self.uri.pop();
        tracing::trace!(prefix, method = %segment, "controller declined");
        Ok(false)
    }

    fn load_controller(&self, prefix: &str, handler: &Handler) -> RouteResult<Arc<dyn Controller>> {
        match handler {
            Handler::ControllerRef(name) => self.loader.load(name),
            Handler::ControllerInstance(controller) => Ok(Arc::clone(controller)),
            Handler::Inline(_) => Err(RouteError::InlineController(prefix.to_string())),
        }
    }

    /// Run `block` against the URI with `prefix` consumed.
    ///
    /// Unless the block calls [`back`](Self::back), entering the group
    /// claims the request: if nothing inside settled, the request settles
    /// with no reply.
    pub fn group<F>(&mut self, prefix: &str, block: F) -> RouteResult<bool>
    where
        F: FnOnce(&mut Self) -> RouteResult<()>,
    {
        if !self.settlement.is_open() || !self.uri.strip_prefix(prefix) {
            return Ok(false);
        }
        tracing::trace!(prefix, uri = %self.uri.current(), "group entered");

        self.open_scope();
        let result = block(self);
        self.scopes.pop();
        result?;

        self.end(None);
        Ok(!self.settlement.is_open())
    }

    /// Give the current scope's prefix back.
    ///
    /// Restores the URI to what it was before the enclosing group or
    /// controller consumed its prefix, and revokes anything settled inside
    /// that scope. Later declarations in the scope become no-ops and the
    /// enclosing declaration does not match. Fails outside a scope, when
    /// called twice in one scope, or when an outer declaration settled.
    pub fn back(&mut self) -> bool {
        let depth = self.scopes.len();
        let Some(scope) = self.scopes.last_mut() else {
            return false;
        };
        if scope.given_back || !self.settlement.cancel(depth) {
            return false;
        }
        scope.given_back = true;
        self.uri.restore_to(scope.base);

        tracing::debug!(uri = %self.uri.current(), "scope given back");
        true
    }

    /// Give the current scope's prefix back only if nothing inside it
    /// settled.
    pub fn fallthrough(&mut self) -> bool {
        if self.settlement.is_settled() {
            return false;
        }
        self.back()
    }

    fn open_scope(&mut self) {
        self.scopes.push(Scope {
            base: self.uri.depth().saturating_sub(1),
            given_back: false,
        });
    }

    fn end(&mut self, reply: Option<Reply>) -> bool {
        self.settlement.end(reply, self.scopes.len())
    }
}

fn invoke(controller: &dyn Controller, method: &str, call: &Call<'_, '_>) -> RouteResult<Reply> {
    match controller.call(method, call) {
        Some(result) => result.map_err(RouteError::Handler),
        None => Err(RouteError::MissingMethod {
            controller: controller.name().to_string(),
            method: method.to_string(),
        }),
    }
}

/// Split a controller-relative URI into a method name and its arguments.
///
/// The method is the first segment, `index` when empty. Arguments are the
/// remaining non-empty segments.
fn split_action(uri: &str) -> (String, Vec<String>) {
    let mut segments = uri.strip_prefix('/').unwrap_or(uri).split('/');
    let segment = match segments.next() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "index".to_string(),
    };
    let args = segments
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (segment, args)
}
