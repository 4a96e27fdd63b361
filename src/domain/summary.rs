//! Filter options, headcount summaries and the filter caption.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::domain::entities::{OrgNode, ViewMode};
use crate::domain::ordering::{compare_corporate_title, compare_names, title_rank};
use crate::domain::search::StructuralFilter;

const NOT_SPECIFIED: &str = "Not Specified";

/// Values offered for each structural constraint.
///
/// Lower levels are scoped by the levels selected above them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub groups: Vec<String>,
    pub divisions: Vec<String>,
    pub departments: Vec<String>,
    pub units: Vec<String>,
    pub corporate_titles: Vec<String>,
}

fn unique_sorted<'n>(
    employees: impl Iterator<Item = &'n OrgNode>,
    field: fn(&OrgNode) -> &str,
    compare: fn(&str, &str) -> std::cmp::Ordering,
) -> Vec<String> {
    employees
        .map(|e| field(e).trim())
        .filter(|v| !v.is_empty())
        .unique()
        .sorted_by(|a, b| compare(a, b))
        .map(str::to_string)
        .collect()
}

fn selected(constraint: &Option<String>, value: &str) -> bool {
    constraint.as_deref().map_or(true, |s| s == value)
}

impl FilterOptions {
    pub fn collect(employees: &[OrgNode], filter: &StructuralFilter) -> Self {
        let people = || employees.iter().filter(|e| !e.is_org_node);

        let in_group = |e: &&OrgNode| selected(&filter.group, &e.group_name);
        let in_division = |e: &&OrgNode| selected(&filter.division, &e.division_name);
        let in_department = |e: &&OrgNode| selected(&filter.department, &e.department_name);

        Self {
            groups: unique_sorted(people(), |e| e.group_name.as_str(), compare_names),
            divisions: unique_sorted(
                people().filter(in_group),
                |e| e.division_name.as_str(),
                compare_names,
            ),
            departments: unique_sorted(
                people().filter(in_group).filter(in_division),
                |e| e.department_name.as_str(),
                compare_names,
            ),
            units: unique_sorted(
                people()
                    .filter(in_group)
                    .filter(in_division)
                    .filter(in_department),
                |e| e.unit_name.as_str(),
                compare_names,
            ),
            corporate_titles: unique_sorted(
                people(),
                |e| e.corporate_title.as_str(),
                compare_corporate_title,
            ),
        }
    }
}

fn is_stale(constraint: &Option<String>, scoped: &[String], known: &[String]) -> bool {
    constraint
        .as_ref()
        .is_some_and(|v| known.contains(v) && !scoped.contains(v))
}

impl StructuralFilter {
    /// Reset the coarsest division/department/unit selection that exists in
    /// the dataset but is not offered under the levels selected above it.
    /// Returns whether a selection was reset.
    ///
    /// `scoped` must be collected for this filter, `known` for no filter.
    /// Values absent from the dataset are kept so the resulting view is
    /// empty. Groups and corporate titles are never scoped and never go stale.
    pub fn reconcile(&mut self, scoped: &FilterOptions, known: &FilterOptions) -> bool {
        let levels = [
            (&mut self.division, &scoped.divisions, &known.divisions),
            (&mut self.department, &scoped.departments, &known.departments),
            (&mut self.unit, &scoped.units, &known.units),
        ];
        for (constraint, offered, all) in levels {
            if is_stale(constraint, offered, all) {
                *constraint = None;
                return true;
            }
        }
        false
    }
}

/// Count of nodes carrying one corporate title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleCount {
    pub title: String,
    pub total: usize,
}

/// Headcount figures over a flat employee list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// All positions, vacant included
    pub manpower: usize,
    /// Filled positions
    pub headcount: usize,
    pub vacant: usize,
    pub by_title: Vec<TitleCount>,
    pub vacant_by_title: Vec<TitleCount>,
}

fn count_titles<'n>(employees: impl Iterator<Item = &'n OrgNode>) -> Vec<TitleCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for employee in employees {
        let title = employee.corporate_title.trim();
        let title = if title.is_empty() { NOT_SPECIFIED } else { title };
        *counts.entry(title.to_string()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(title, total)| TitleCount { title, total })
        .sorted_by(|a, b| {
            title_rank(&a.title)
                .cmp(&title_rank(&b.title))
                .then_with(|| b.total.cmp(&a.total))
                .then_with(|| compare_names(&a.title, &b.title))
        })
        .collect()
}

impl Summary {
    pub fn compute(employees: &[OrgNode]) -> Self {
        let people = || employees.iter().filter(|e| !e.is_org_node);
        let manpower = people().count();
        let headcount = people().filter(|e| !e.is_vacant).count();
        Self {
            manpower,
            headcount,
            vacant: manpower - headcount,
            by_title: count_titles(people()),
            vacant_by_title: count_titles(people().filter(|e| e.is_vacant)),
        }
    }
}

/// Caption describing the active view and its most specific constraint.
pub fn describe_filters(view: ViewMode, filter: &StructuralFilter, query: &str) -> String {
    let view_label = match view {
        ViewMode::Organization => "Organization Hierarchy (Group > Division > Department > Unit)",
        ViewMode::Reporting => "Reporting Line",
    };
    let scope = filter
        .corporate_title
        .as_deref()
        .or(filter.unit.as_deref())
        .or(filter.department.as_deref())
        .or(filter.division.as_deref())
        .or(filter.group.as_deref())
        .unwrap_or("All Organizations");
    let query = query.trim();
    if query.is_empty() {
        format!("{} | {}", view_label, scope)
    } else {
        format!("{} | {} | Search: {}", view_label, scope, query)
    }
}
