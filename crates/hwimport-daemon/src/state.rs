//! Application state management

use hwimport_core::{find_discoverer, Discoverer, DiscovererId};
use std::sync::Arc;

use crate::config::Config;

/// Shared application state
pub struct AppState {
    /// Configuration
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self { config })
    }

    /// Discoverer catalog in display order
    pub fn discoverers(&self) -> &[Discoverer] {
        &self.config.discoverers
    }

    pub fn get_discoverer(&self, id: &str) -> Option<&Discoverer> {
        find_discoverer(self.discoverers(), &DiscovererId::from(id))
    }
}
