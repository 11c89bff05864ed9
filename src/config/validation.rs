//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Compile every config-declared route description
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Whether a named controller exists is checked later, when the route
//!   table is validated against the registry

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AppConfig, RouteKind};
use crate::routing::CompiledPattern;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address `{value}`")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("observability.log_level: unknown level `{0}`")]
    UnknownLogLevel(String),

    #[error("routes[{index}]: {message}")]
    Route { index: usize, message: String },
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (index, route) in config.routes.iter().enumerate() {
        if route.controller.trim().is_empty() {
            errors.push(ValidationError::Route {
                index,
                message: "controller must not be empty".to_string(),
            });
        }
        match route.kind {
            RouteKind::Leaf => {
                if let Err(e) = CompiledPattern::compile(&route.path) {
                    errors.push(ValidationError::Route {
                        index,
                        message: e.to_string(),
                    });
                }
            }
            RouteKind::Controller => {
                if route.path.contains('(') {
                    errors.push(ValidationError::Route {
                        index,
                        message: format!("controller prefix `{}` must be literal", route.path),
                    });
                }
                if route.method.is_some() {
                    errors.push(ValidationError::Route {
                        index,
                        message: "controller mounts pick their method from the URI".to_string(),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::schema::RouteConfig;
    use crate::routing::Verb;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();
        config.routes.push(RouteConfig {
            kind: RouteKind::Leaf,
            verb: Verb::Get,
            path: "/(id:int)".into(),
            controller: "Project".into(),
            method: None,
        });
        config.routes.push(RouteConfig {
            kind: RouteKind::Controller,
            verb: Verb::Any,
            path: "/about/(num)".into(),
            controller: "".into(),
            method: None,
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_secs")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Route { index: 0, .. })));
    }
}
