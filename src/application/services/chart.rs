//! Chart service
//!
//! Loads an employee table and turns it into an [`OrgChart`]. Every load is
//! a full rebuild; nothing is cached between calls.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::ingest::records_from_table;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{ChartOptions, OrgChart};
use crate::infrastructure::traits::TableReader;

/// Service for loading datasets into charts.
pub struct ChartService {
    reader: Arc<dyn TableReader>,
    settings: Arc<Settings>,
}

impl ChartService {
    /// Create a new chart service.
    pub fn new(reader: Arc<dyn TableReader>, settings: Arc<Settings>) -> Self {
        Self { reader, settings }
    }

    fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            company_name: self.settings.company_name.clone(),
            unassigned_group: self.settings.unassigned_group.clone(),
        }
    }

    /// Read, normalize and classify a table into a chart.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<OrgChart> {
        let table = self
            .reader
            .read_table(path)
            .with_path_context("read table", path)?;
        debug!(
            "load: {} headers, {} rows",
            table.headers.len(),
            table.rows.len()
        );

        let records = records_from_table(&table, path)?;
        let chart = OrgChart::from_records(&records, self.chart_options());
        info!(
            "Loaded {} nodes ({} roots) from {}",
            chart.employees().len(),
            chart.reporting_forest().len(),
            path.display()
        );
        Ok(chart)
    }
}
