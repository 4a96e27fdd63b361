//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ChartService;
use crate::config::Settings;
use crate::infrastructure::traits::{CsvTableReader, TableReader};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Table reader abstraction
    pub reader: Arc<dyn TableReader>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(CsvTableReader::new()))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, reader: Arc<dyn TableReader>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, reader }
    }

    pub fn chart_service(&self) -> ChartService {
        ChartService::new(self.reader.clone(), self.settings.clone())
    }
}
