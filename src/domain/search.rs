//! Search and structural filtering over a built forest.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::domain::entities::{flatten, OrgNode};
use crate::domain::ordering::is_ceo;

/// Runs of characters outside latin lowercase, digits and the Thai block.
static NON_SEARCHABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\x{0E01}-\x{0E59}]+").unwrap());

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Lowercase, decompose, drop diacritics, collapse everything else to single spaces.
pub fn normalize(text: &str) -> String {
    let decomposed: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect();
    NON_SEARCHABLE
        .replace_all(&decomposed, " ")
        .trim()
        .to_string()
}

/// Query tokens; an empty list matches everything.
pub fn tokens(query: &str) -> Vec<String> {
    normalize(query)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn search_blob(node: &OrgNode) -> String {
    let id = if node.employee_id.is_empty() {
        &node.id
    } else {
        &node.employee_id
    };
    normalize(
        &[
            id.as_str(),
            &node.name,
            &node.position,
            &node.corporate_title,
            &node.org_name,
            &node.group_name,
            &node.division_name,
            &node.department_name,
            &node.unit_name,
        ]
        .join(" "),
    )
}

/// Every token must occur somewhere in the node's searchable text.
pub fn matches_tokens(node: &OrgNode, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let blob = search_blob(node);
    tokens.iter().all(|t| blob.contains(t.as_str()))
}

pub fn node_matches(node: &OrgNode, query: &str) -> bool {
    matches_tokens(node, &tokens(query))
}

/// Independent equality constraints; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralFilter {
    pub group: Option<String>,
    pub division: Option<String>,
    pub department: Option<String>,
    pub unit: Option<String>,
    pub corporate_title: Option<String>,
}

fn holds(constraint: &Option<String>, value: &str) -> bool {
    constraint.as_deref().map_or(true, |expected| expected == value)
}

impl StructuralFilter {
    /// Any group/division/department/unit constraint active.
    pub fn has_structure(&self) -> bool {
        self.group.is_some()
            || self.division.is_some()
            || self.department.is_some()
            || self.unit.is_some()
    }

    /// Any constraint at all, corporate title included.
    pub fn is_active(&self) -> bool {
        self.has_structure() || self.corporate_title.is_some()
    }

    /// Group/division/department/unit constraints only.
    pub fn matches_structure(&self, node: &OrgNode) -> bool {
        holds(&self.group, &node.group_name)
            && holds(&self.division, &node.division_name)
            && holds(&self.department, &node.department_name)
            && holds(&self.unit, &node.unit_name)
    }

    pub fn matches(&self, node: &OrgNode) -> bool {
        self.matches_structure(node) && holds(&self.corporate_title, &node.corporate_title)
    }
}

/// Search and filter state applied to one forest.
pub struct SearchFilter<'a> {
    filter: &'a StructuralFilter,
    tokens: Vec<String>,
    ceo_ids: HashSet<String>,
    suppress_ceo: bool,
}

impl<'a> SearchFilter<'a> {
    /// `employees` is the full flat dataset; it decides CEO suppression.
    pub fn new(filter: &'a StructuralFilter, query: &str, employees: &[OrgNode]) -> Self {
        let ceo_ids: HashSet<String> = employees
            .iter()
            .filter(|e| !e.is_org_node && is_ceo(e))
            .map(|e| e.id.clone())
            .collect();
        let show_ceo = !filter.has_structure()
            || ceo_ids.is_empty()
            || employees.iter().any(|e| {
                filter.matches_structure(e)
                    && e.manager_id
                        .as_deref()
                        .map(str::trim)
                        .is_some_and(|m| !m.is_empty() && ceo_ids.contains(m))
            });
        Self {
            filter,
            tokens: tokens(query),
            ceo_ids,
            suppress_ceo: !show_ceo,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.tokens.is_empty() && !self.filter.is_active()
    }

    /// Search and structural filter on one node, ignoring its subtree.
    pub fn accepts(&self, node: &OrgNode) -> bool {
        matches_tokens(node, &self.tokens) && self.filter.matches(node)
    }

    /// Keep matching nodes and the ancestors of matching nodes; splice the
    /// kept children of dropped nodes into their place.
    pub fn filter_forest(&self, forest: &[OrgNode]) -> Vec<OrgNode> {
        if self.is_noop() {
            return forest.to_vec();
        }
        let filtered = self.filter_nodes(forest);
        debug!(
            "filter_forest: {} roots -> {} roots (suppress_ceo={})",
            forest.len(),
            filtered.len(),
            self.suppress_ceo
        );
        filtered
    }

    fn filter_nodes(&self, nodes: &[OrgNode]) -> Vec<OrgNode> {
        let mut out = Vec::new();
        for node in nodes {
            let children = self.filter_nodes(&node.children);
            if !self.accepts(node) && children.is_empty() {
                continue;
            }
            if self.suppress_ceo && self.ceo_ids.contains(&node.id) {
                out.extend(children);
            } else {
                let mut kept = node.detached();
                kept.children = children;
                out.push(kept);
            }
        }
        out
    }
}

/// Convenience wrapper: filter `forest` with its own nodes as the dataset.
pub fn filter_forest(forest: &[OrgNode], filter: &StructuralFilter, query: &str) -> Vec<OrgNode> {
    let employees = flatten(forest);
    SearchFilter::new(filter, query, &employees).filter_forest(forest)
}

/// First ancestor of `node` (following `manager_id`) whose id is in `parent_ids`.
///
/// Manager chains can contain cycles; the walk stops on a revisited id.
pub fn resolve_nearest_parent_id(
    node: &OrgNode,
    parent_ids: &HashSet<String>,
    index: &HashMap<String, &OrgNode>,
) -> Option<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cursor = node.manager_id.as_deref();
    while let Some(id) = cursor {
        if id.is_empty() || !visited.insert(id) {
            return None;
        }
        if parent_ids.contains(id) {
            return Some(id.to_string());
        }
        cursor = index.get(id).and_then(|n| n.manager_id.as_deref());
    }
    None
}

/// `id` followed by its managers, nearest first. Stops on an unknown
/// manager or a revisited id.
pub fn management_chain<'n>(employees: &'n [OrgNode], id: &str) -> Vec<&'n OrgNode> {
    let index: HashMap<&str, &OrgNode> = employees.iter().map(|e| (e.id.as_str(), e)).collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut chain = Vec::new();
    let mut cursor = index.get(id).copied();
    while let Some(node) = cursor {
        if !visited.insert(node.id.as_str()) {
            break;
        }
        chain.push(node);
        cursor = node
            .manager_id
            .as_deref()
            .and_then(|m| index.get(m).copied());
    }
    chain
}
