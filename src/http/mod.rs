//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, limits, timeout)
//!     → request.rs (query + body → Input)
//!     → App::handle on the blocking pool (routing subsystem decides the handler)
//!     → response.rs (Resolution → status + body, metrics)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::HttpServer;
