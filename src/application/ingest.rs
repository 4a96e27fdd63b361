//! Ingestion normalization: arbitrary table headers to a fixed employee schema.
//!
//! Header matching ignores surrounding whitespace and letter case. Values are
//! trimmed once here so the domain never sees untrimmed text.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::EmployeeRecord;

/// Header row and data rows of a table, as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Recognized input columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    EmployeeId,
    Name,
    Position,
    SupervisorId,
    Company,
    Unit,
    Department,
    Division,
    Group,
    CorporateTitle,
    OfficeEmail,
    ServiceDate,
    Location,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::EmployeeId,
        Column::Name,
        Column::Position,
        Column::SupervisorId,
        Column::Company,
        Column::Unit,
        Column::Department,
        Column::Division,
        Column::Group,
        Column::CorporateTitle,
        Column::OfficeEmail,
        Column::ServiceDate,
        Column::Location,
    ];

    /// Canonical header text.
    pub fn header(&self) -> &'static str {
        match self {
            Column::EmployeeId => "Employee ID CardX",
            Column::Name => "Name (EN)",
            Column::Position => "Position",
            Column::SupervisorId => "Supervisor ID",
            Column::Company => "Company",
            Column::Unit => "Unit",
            Column::Department => "Department",
            Column::Division => "Division",
            Column::Group => "Group",
            Column::CorporateTitle => "Corporate Title",
            Column::OfficeEmail => "Office Email",
            Column::ServiceDate => "Service Date",
            Column::Location => "Location",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        let wanted = clean_header(header);
        Column::ALL
            .into_iter()
            .find(|c| c.header().to_lowercase() == wanted)
    }
}

fn clean_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
}

/// Column positions resolved from one header row.
#[derive(Debug, Clone, Default)]
pub struct HeaderSchema {
    positions: HashMap<Column, usize>,
}

impl HeaderSchema {
    /// First occurrence of a column wins; unknown headers are ignored.
    pub fn resolve(headers: &[String]) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                positions.entry(column).or_insert(i);
            }
        }
        debug!("resolve: {} of {} headers recognized", positions.len(), headers.len());
        Self { positions }
    }

    pub fn has(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    fn value(&self, row: &[String], column: Column) -> String {
        self.positions
            .get(&column)
            .and_then(|&i| row.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Typed record for one data row; missing cells become empty strings.
    pub fn record(&self, row: &[String]) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: self.value(row, Column::EmployeeId),
            name: self.value(row, Column::Name),
            position: self.value(row, Column::Position),
            supervisor_id: self.value(row, Column::SupervisorId),
            company: self.value(row, Column::Company),
            unit: self.value(row, Column::Unit),
            department: self.value(row, Column::Department),
            division: self.value(row, Column::Division),
            group: self.value(row, Column::Group),
            corporate_title: self.value(row, Column::CorporateTitle),
            office_email: self.value(row, Column::OfficeEmail),
            service_date: self.value(row, Column::ServiceDate),
            location: self.value(row, Column::Location),
        }
    }
}

/// Convert a raw table into typed records.
///
/// Rejects tables without an employee id column. Every data row yields a
/// record, blank ones included, so row positions match the source table;
/// the classifier skips rows without name and position.
pub fn records_from_table(table: &RawTable, source: &Path) -> ApplicationResult<Vec<EmployeeRecord>> {
    let schema = HeaderSchema::resolve(&table.headers);
    if !schema.has(Column::EmployeeId) {
        return Err(ApplicationError::MissingColumn {
            path: source.to_path_buf(),
            column: Column::EmployeeId.header().to_string(),
        });
    }

    let records: Vec<EmployeeRecord> = table
        .rows
        .iter()
        .map(|row| schema.record(row))
        .collect();
    debug!(
        "records_from_table: {} rows from {}",
        records.len(),
        source.display()
    );
    Ok(records)
}
