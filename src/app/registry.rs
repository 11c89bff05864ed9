//! Name → controller registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::routing::{Controller, ControllerLoader, RouteError, RouteResult};

/// The application's controller loader. Immutable once the app is built.
#[derive(Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Arc<dyn Controller>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `controller` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, controller: Arc<dyn Controller>) {
        self.controllers.insert(name.into(), controller);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl ControllerLoader for ControllerRegistry {
    fn load(&self, name: &str) -> RouteResult<Arc<dyn Controller>> {
        self.controllers
            .get(name)
            .cloned()
            .ok_or_else(|| RouteError::UnknownController(name.to_string()))
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.controllers.keys()).finish()
    }
}
