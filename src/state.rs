//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the bouquet registry behind a trait object so the memory and file
//! backends are interchangeable, plus the parsed server config.

use std::sync::Arc;

use crate::config::Config;
use crate::registry::{MemoryRegistry, Registry};

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn Registry>,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: Arc<dyn Registry>, config: Config) -> Self {
        Self { registry, config: Arc::new(config) }
    }

    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let registry = config.build_registry();
        Self::new(registry, config)
    }

    /// In-memory state with default config.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRegistry::new()), Config::default())
    }
}
