//! Shared memo of compiled route descriptions.

use std::sync::Arc;

use dashmap::DashMap;

use crate::routing::pattern::{CompiledPattern, PatternError};

/// Concurrent cache keyed by the raw description string.
///
/// Compilation is pure, so a racing double compile is harmless; the first
/// insert wins and both callers see an equivalent pattern.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<String, Arc<CompiledPattern>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compile(&self, description: &str) -> Result<Arc<CompiledPattern>, PatternError> {
        if let Some(pattern) = self.patterns.get(description) {
            return Ok(Arc::clone(pattern.value()));
        }

        let pattern = Arc::new(CompiledPattern::compile(description)?);
        let entry = self
            .patterns
            .entry(description.to_string())
            .or_insert(pattern);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
