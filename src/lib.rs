//! Switchyard: a request router for small web applications.
//!
//! Routes are plain declarations evaluated in order against the request's
//! remaining URI. Leaf routes match a whole URI, controllers and groups
//! consume a prefix and route the rest, and `back()` hands a prefix back
//! when nothing inside claimed the request.

pub mod app;
pub mod config;
pub mod demo;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use app::{App, AppBuilder, Input};
pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{
    Controller, Handler, Reply, RequestContext, Resolution, Route, RouteError, RouteTable, Verb,
};
