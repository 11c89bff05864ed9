//! Controller contract and the loader collaborator.

use std::sync::Arc;

use crate::routing::context::RequestContext;
use crate::routing::error::RouteResult;
use crate::routing::handler::{Call, HandlerResult, Reply};

/// A named bundle of request methods.
///
/// Method lookup is by name at request time. A controller does not
/// declare up front which shapes it supports; the resolver tries
/// `<VERB><method>`, then `<method>`, then `resolve`.
pub trait Controller: Send + Sync {
    /// Invoke method `name`, or return `None` if there is no such method.
    ///
    /// Must not have side effects when returning `None`.
    fn call(&self, name: &str, call: &Call<'_, '_>) -> Option<HandlerResult>;

    /// Whether this controller implements [`Controller::resolve`].
    fn resolves(&self) -> bool {
        false
    }

    /// Route the rest of the URI from inside the controller.
    ///
    /// Runs as a nested scope: declarations made on `ctx` see the URI with
    /// the controller prefix consumed, and `ctx.back()` hands the request
    /// back to the enclosing declarations.
    fn resolve(self: Arc<Self>, ctx: &mut RequestContext<'_>) -> RouteResult<Option<Reply>> {
        let _ = ctx;
        Ok(None)
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Maps controller names to instances.
pub trait ControllerLoader: Send + Sync {
    /// Unknown names are configuration errors, never a 404.
    fn load(&self, name: &str) -> RouteResult<Arc<dyn Controller>>;
}
