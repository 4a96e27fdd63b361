//! Row classification: one typed employee record to one node.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::entities::{EmployeeRecord, OrgNode, OrgType};
use crate::domain::ordering::is_ceo_title;

/// Company name used when a row carries none.
pub const DEFAULT_COMPANY: &str = "CardX";

/// Classifies records into nodes, keeping ids unique across one dataset.
///
/// A classifier is single-use per dataset: ids seen so far are remembered
/// so later collisions get a `-DUP-{row}` suffix.
pub struct RecordClassifier {
    company_default: String,
    used_ids: HashSet<String>,
}

impl Default for RecordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_COMPANY)
    }
}

impl RecordClassifier {
    pub fn new(company_default: impl Into<String>) -> Self {
        Self {
            company_default: company_default.into(),
            used_ids: HashSet::new(),
        }
    }

    /// Classify a whole dataset; `row_index` is the zero-based position in `records`.
    pub fn classify_all(&mut self, records: &[EmployeeRecord]) -> Vec<OrgNode> {
        let nodes: Vec<OrgNode> = records
            .iter()
            .enumerate()
            .filter_map(|(row_index, record)| self.classify(record, row_index))
            .collect();
        debug!(
            "classify_all: {} rows -> {} nodes",
            records.len(),
            nodes.len()
        );
        nodes
    }

    /// Classify one row. Returns `None` for filler rows without name and position.
    pub fn classify(&mut self, record: &EmployeeRecord, row_index: usize) -> Option<OrgNode> {
        if record.name.is_empty() && record.position.is_empty() {
            trace!("classify: skipping blank row {}", row_index);
            return None;
        }

        let row_marker = row_index + 1;
        let is_vacant = record.employee_id.is_empty();
        let manager_id = (!record.supervisor_id.is_empty()).then(|| record.supervisor_id.clone());

        let mut id = if is_vacant {
            format!(
                "VACANT-{}-{}",
                row_marker,
                manager_id.as_deref().unwrap_or("ROOT")
            )
        } else {
            record.employee_id.clone()
        };
        while self.used_ids.contains(&id) {
            debug!("classify: id collision on {} at row {}", id, row_marker);
            id = format!("{}-DUP-{}", id, row_marker);
        }
        self.used_ids.insert(id.clone());

        let (org_type, org_name) = self.classify_org(record);

        let corporate_title = if !record.corporate_title.is_empty() {
            record.corporate_title.clone()
        } else if is_vacant {
            "Vacant".to_string()
        } else {
            "Not Specified".to_string()
        };

        Some(OrgNode {
            id,
            employee_id: record.employee_id.clone(),
            is_vacant,
            is_org_node: false,
            name: non_empty_or(&record.name, "Vacant"),
            position: non_empty_or(&record.position, "Vacant Position"),
            corporate_title,
            org_type,
            org_name,
            group_name: record.group.clone(),
            division_name: record.division.clone(),
            department_name: record.department.clone(),
            unit_name: record.unit.clone(),
            email: non_empty_or(&record.office_email, "-"),
            hire_date: if is_vacant {
                String::new()
            } else {
                record.service_date.clone()
            },
            location: record.location.clone(),
            manager_id,
            children: Vec::new(),
        })
    }

    /// Priority ladder; the first matching rule wins.
    fn classify_org(&self, record: &EmployeeRecord) -> (OrgType, String) {
        let company = non_empty_or(&record.company, &self.company_default);
        let position = record.position.to_lowercase();
        let corporate_title = record.corporate_title.to_lowercase();

        if is_ceo_title(&record.position) {
            return (OrgType::Company, company);
        }

        if position.contains("chief") || corporate_title.contains("chief") {
            let deepest = [
                (OrgType::Unit, &record.unit),
                (OrgType::Department, &record.department),
                (OrgType::Division, &record.division),
                (OrgType::Group, &record.group),
            ]
            .into_iter()
            .find(|(_, value)| !value.is_empty());
            return match deepest {
                Some((org_type, value)) => (org_type, value.clone()),
                None => (OrgType::Company, company),
            };
        }

        if !record.unit.is_empty() {
            (OrgType::Unit, record.unit.clone())
        } else if !record.department.is_empty() {
            (OrgType::Department, record.department.clone())
        } else if record.division.to_lowercase().contains("cpo office") && !record.group.is_empty()
        {
            (OrgType::Group, record.group.clone())
        } else if !record.division.is_empty() {
            (OrgType::Division, record.division.clone())
        } else if !record.group.is_empty() {
            (OrgType::Group, record.group.clone())
        } else {
            (OrgType::Company, company)
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
