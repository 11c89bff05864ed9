//! Routing error taxonomy.
//!
//! A declaration that does not apply is not an error: it is `Ok(false)`.
//! Everything here is either a configuration mistake, which is fatal, or
//! a failure from inside a handler, which is passed through untouched.

use thiserror::Error;

use crate::routing::pattern::PatternError;
use crate::routing::verb::Verb;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("ambiguous routes for `{description}`: `{first}` and `{second}` cannot be told apart")]
    Ambiguous {
        description: String,
        first: Verb,
        second: Verb,
    },

    #[error("unknown controller `{0}`")]
    UnknownController(String),

    #[error("controller `{controller}` has no method `{method}`")]
    MissingMethod { controller: String, method: String },

    #[error("inline handler cannot dispatch to method `{0}`")]
    InlineMethod(String),

    #[error("inline handler mounted as a controller at `{0}`")]
    InlineController(String),

    /// Raised by a handler. Never wrapped or inspected by the router.
    #[error(transparent)]
    Handler(BoxError),
}

impl RouteError {
    pub fn is_configuration(&self) -> bool {
        !matches!(self, RouteError::Handler(_))
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
