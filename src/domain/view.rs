//! Full pipeline: classify rows, build the reporting forest, derive views.

use tracing::{debug, instrument};

use crate::domain::classifier::{RecordClassifier, DEFAULT_COMPANY};
use crate::domain::entities::{flatten, EmployeeRecord, OrgNode, ViewMode};
use crate::domain::organization::{OrganizationTreeBuilder, UNASSIGNED_GROUP};
use crate::domain::reporting::ReportingTreeBuilder;
use crate::domain::search::{management_chain, matches_tokens, tokens, SearchFilter, StructuralFilter};
use crate::domain::summary::{FilterOptions, Summary};

/// Naming defaults applied while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub company_name: String,
    pub unassigned_group: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY.to_string(),
            unassigned_group: UNASSIGNED_GROUP.to_string(),
        }
    }
}

/// One loaded dataset: the reporting forest plus its flat node list.
///
/// Immutable once built; a new upload builds a new chart.
#[derive(Debug, Clone)]
pub struct OrgChart {
    forest: Vec<OrgNode>,
    employees: Vec<OrgNode>,
    options: ChartOptions,
}

impl OrgChart {
    #[instrument(level = "debug", skip(records, options), fields(rows = records.len()))]
    pub fn from_records(records: &[EmployeeRecord], options: ChartOptions) -> Self {
        let nodes = RecordClassifier::new(options.company_name.clone()).classify_all(records);
        let forest = ReportingTreeBuilder::new().build(nodes);
        let employees = flatten(&forest);
        debug!(
            "from_records: {} nodes in {} reporting roots",
            employees.len(),
            forest.len()
        );
        Self {
            forest,
            employees,
            options,
        }
    }

    pub fn reporting_forest(&self) -> &[OrgNode] {
        &self.forest
    }

    /// Every node, pre-order, without children.
    pub fn employees(&self) -> &[OrgNode] {
        &self.employees
    }

    /// Flat employees passing both the structural filter and the search query.
    pub fn scoped_employees(&self, filter: &StructuralFilter, query: &str) -> Vec<OrgNode> {
        let tokens = tokens(query);
        self.employees
            .iter()
            .filter(|e| filter.matches(e) && matches_tokens(e, &tokens))
            .cloned()
            .collect()
    }

    /// The forest to hand to rendering or export for the given view state.
    pub fn view(&self, mode: ViewMode, filter: &StructuralFilter, query: &str) -> Vec<OrgNode> {
        match mode {
            ViewMode::Reporting => {
                SearchFilter::new(filter, query, &self.employees).filter_forest(&self.forest)
            }
            ViewMode::Organization => {
                let scoped = self.scoped_employees(filter, query);
                OrganizationTreeBuilder::new(self.options.unassigned_group.clone()).build(&scoped)
            }
        }
    }

    pub fn summary(&self, filter: &StructuralFilter, query: &str) -> Summary {
        Summary::compute(&self.scoped_employees(filter, query))
    }

    pub fn filter_options(&self, filter: &StructuralFilter) -> FilterOptions {
        FilterOptions::collect(&self.employees, filter)
    }

    /// `filter` with stale lower-level selections reset.
    ///
    /// One level per pass, since a reset division rescopes departments and units.
    pub fn reconcile_filter(&self, filter: &StructuralFilter) -> StructuralFilter {
        let known = self.filter_options(&StructuralFilter::default());
        let mut reconciled = filter.clone();
        loop {
            let scoped = self.filter_options(&reconciled);
            if !reconciled.reconcile(&scoped, &known) {
                return reconciled;
            }
        }
    }

    /// `id` and its managers, nearest first.
    pub fn chain(&self, id: &str) -> Vec<&OrgNode> {
        management_chain(&self.employees, id)
    }
}
