//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route table (built once at startup):
//!     Route / Controller / Group / Back entries
//!     → table.rs validate (compile patterns, check controllers, detect collisions)
//!     → frozen inside App
//!
//! Incoming request (method, path, input):
//!     → context.rs RequestContext::new
//!     → table.rs dispatch, entry by entry:
//!         leaf:       pattern.rs match on the remaining URI → handler → end
//!         controller: uri.rs strip prefix → method from next segment → end or pop
//!         group:      uri.rs strip prefix → nested entries → end or back
//!     → settlement.rs decides what is committed
//!     → Resolution (reply, empty, or unsettled)
//! ```
//!
//! # Design Decisions
//! - First match wins; there is no best-match scoring
//! - Leaf routes never consume the URI; controllers and groups do
//! - `back()` is the only way to un-consume a prefix that matched
//! - A declaration that does not apply returns `Ok(false)`; malformed
//!   descriptions and unknown controllers are errors

pub mod cache;
pub mod context;
pub mod controller;
pub mod error;
pub mod handler;
pub mod input;
pub mod params;
pub mod pattern;
pub mod route;
pub mod settlement;
pub mod table;
pub mod uri;
pub mod verb;

pub use cache::PatternCache;
pub use context::{RequestContext, Resolution};
pub use controller::{Controller, ControllerLoader};
pub use error::{BoxError, RouteError, RouteResult};
pub use handler::{Call, Handler, HandlerResult, Reply};
pub use input::Input;
pub use params::{ParamValue, TypedParams};
pub use pattern::{CompiledPattern, PatternError};
pub use route::Route;
pub use table::RouteTable;
pub use verb::Verb;
