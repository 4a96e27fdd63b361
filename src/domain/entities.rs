//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One employee row after header normalization.
///
/// Every field is already trimmed; an empty string means the column was
/// absent or blank on the source row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    pub position: String,
    pub supervisor_id: String,
    pub company: String,
    pub unit: String,
    pub department: String,
    pub division: String,
    pub group: String,
    pub corporate_title: String,
    pub office_email: String,
    pub service_date: String,
    pub location: String,
}

/// Organizational level a node belongs to, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgType {
    Company,
    Group,
    Division,
    Department,
    Unit,
}

impl OrgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgType::Company => "Company",
            OrgType::Group => "Group",
            OrgType::Division => "Division",
            OrgType::Department => "Department",
            OrgType::Unit => "Unit",
        }
    }
}

impl fmt::Display for OrgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node of a produced forest: either an employee (possibly a vacant slot)
/// or a synthetic organizational container (`is_org_node`).
///
/// A node exclusively owns its `children`. Forests are rebuilt, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    pub id: String,
    pub employee_id: String,
    pub is_vacant: bool,
    pub is_org_node: bool,
    pub name: String,
    pub position: String,
    pub corporate_title: String,
    pub org_type: OrgType,
    pub org_name: String,
    pub group_name: String,
    pub division_name: String,
    pub department_name: String,
    pub unit_name: String,
    pub email: String,
    pub hire_date: String,
    pub location: String,
    pub manager_id: Option<String>,
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    /// Synthetic container for one organizational level.
    pub fn container(id: String, label: &str, org_type: OrgType, path: &OrgPath) -> Self {
        let kind = format!("{} Node", org_type);
        Self {
            id,
            employee_id: String::new(),
            is_vacant: false,
            is_org_node: true,
            name: label.to_string(),
            position: kind.clone(),
            corporate_title: kind,
            org_type,
            org_name: label.to_string(),
            group_name: path.group.clone(),
            division_name: path.division.clone(),
            department_name: path.department.clone(),
            unit_name: path.unit.clone(),
            email: "-".to_string(),
            hire_date: String::new(),
            location: String::new(),
            manager_id: None,
            children: Vec::new(),
        }
    }

    /// Label used when ordering and collapsing containers.
    pub fn label(&self) -> &str {
        if self.org_name.is_empty() {
            &self.name
        } else {
            &self.org_name
        }
    }

    /// Copy of this node without its subtree.
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }
}

/// Ancestor names of a container, coarsest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgPath {
    pub group: String,
    pub division: String,
    pub department: String,
    pub unit: String,
}

/// Which hierarchy a forest is built as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Manager / direct-report tree
    #[default]
    Reporting,
    /// Group > Division > Department > Unit containment tree
    Organization,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Reporting => f.write_str("reporting"),
            ViewMode::Organization => f.write_str("organization"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reporting" => Ok(ViewMode::Reporting),
            "organization" | "organisation" => Ok(ViewMode::Organization),
            other => Err(DomainError::UnknownViewMode(other.to_string())),
        }
    }
}

/// Depth-first, pre-order copy of every node in the forest, detached from children.
pub fn flatten(forest: &[OrgNode]) -> Vec<OrgNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&OrgNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node.detached());
        stack.extend(node.children.iter().rev());
    }
    out
}
