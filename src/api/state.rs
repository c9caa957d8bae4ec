//! Application state for the shift pay engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::Worker;

use super::request::WorkerRequest;

/// Shared application state.
///
/// Holds the loaded rate table and worker defaults. Request handlers only
/// read from it, so it is shared without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Resolves the worker described by a request against the loaded defaults.
    pub fn resolve_worker(&self, worker: &WorkerRequest) -> EngineResult<Worker> {
        let settings = worker.settings.clone().unwrap_or_default();
        self.config.resolve_worker(&worker.id, worker.grade, &settings)
    }
}
