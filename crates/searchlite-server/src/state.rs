//! Searchlite Server State
//!
//! Application state shared across request handlers: the server
//! configuration and the index registry. Constructed once at process start
//! and injected into handlers, torn down at shutdown.
//!
//! @version 0.1.0
//! @author Searchlite Development Team

use crate::config::ServerConfig;
use searchlite_common::Result;
use searchlite_store::{load_replicas, IndexRegistry};
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub registry: Arc<IndexRegistry>,
}

impl AppState {
    /// Create new application state with the given configuration, loading
    /// the replica mapping once for the process lifetime.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let replicas = match &config.replicas_file {
            Some(path) => load_replicas(path)?,
            None => HashMap::new(),
        };
        if !replicas.is_empty() {
            tracing::info!("Loaded {} replica alias(es)", replicas.len());
        }

        let registry = IndexRegistry::new(config.data_dir.clone(), replicas);

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
