//! Organization view: Group > Division > Department > Unit containment forest.
//!
//! Built in four passes:
//! 1. synthesis of containers keyed by their full ancestor path,
//! 2. ordering (containers before employees),
//! 3. bottom-up pruning (chain collapse, lift-on-empty, group-wrapper drop,
//!    dead-branch removal),
//! 4. anchoring under the primary CEO when one is present.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::NodeArena;
use crate::domain::entities::{OrgNode, OrgPath, OrgType};
use crate::domain::ordering::{compare_report_order, compare_siblings, is_ceo, sort_forest};

/// Label of the container collecting employees without a group.
pub const UNASSIGNED_GROUP: &str = "Unassigned Group";

const KEY_SEPARATOR: &str = "|||";
const NO_DIVISION: &str = "__NO_DIVISION__";
const NO_DEPARTMENT: &str = "__NO_DEPARTMENT__";

/// Builds the organization forest from an already scoped employee list.
pub struct OrganizationTreeBuilder {
    unassigned_group: String,
}

impl Default for OrganizationTreeBuilder {
    fn default() -> Self {
        Self::new(UNASSIGNED_GROUP)
    }
}

impl OrganizationTreeBuilder {
    pub fn new(unassigned_group: impl Into<String>) -> Self {
        Self {
            unassigned_group: unassigned_group.into(),
        }
    }

    /// Employees are used as leaves; their own children are ignored.
    #[instrument(level = "debug", skip(self, employees), fields(n = employees.len()))]
    pub fn build(&self, employees: &[OrgNode]) -> Vec<OrgNode> {
        let employees: Vec<&OrgNode> = employees.iter().filter(|e| !e.is_org_node).collect();
        if employees.is_empty() {
            return Vec::new();
        }

        let synthesized = self.synthesize(&employees);
        let mut forest = prune(synthesized);
        sort_forest(&mut forest, compare_siblings);

        let forest = anchor_under_ceo(forest, &employees);
        debug!("build: {} roots", forest.len());
        forest
    }

    /// Phases 1 and 2: containers keyed by full path, employees attached under
    /// the deepest level their row specifies, every sibling list sorted.
    fn synthesize(&self, employees: &[&OrgNode]) -> Vec<OrgNode> {
        let mut arena = NodeArena::new();
        let mut containers: HashMap<String, Index> = HashMap::new();

        for employee in employees {
            let group = non_empty_or(&employee.group_name, &self.unassigned_group);
            let division = employee.division_name.trim();
            let department = employee.department_name.trim();
            let unit = employee.unit_name.trim();

            let mut path = OrgPath {
                group: group.clone(),
                ..OrgPath::default()
            };
            let group_key = group.clone();
            let mut attach_to = get_or_create(
                &mut arena,
                &mut containers,
                ContainerSpec {
                    prefix: "GROUP",
                    key: &group_key,
                    label: &group,
                    org_type: OrgType::Group,
                    path: &path,
                },
                None,
            );

            let division_key = join_key(&[&group, division]);
            if !division.is_empty() {
                path.division = division.to_string();
                attach_to = get_or_create(
                    &mut arena,
                    &mut containers,
                    ContainerSpec {
                        prefix: "DIV",
                        key: &division_key,
                        label: division,
                        org_type: OrgType::Division,
                        path: &path,
                    },
                    Some(attach_to),
                );
            }

            let parent_division_key = if division.is_empty() {
                NO_DIVISION
            } else {
                division_key.as_str()
            };
            let department_key = join_key(&[&group, parent_division_key, department]);
            if !department.is_empty() {
                path.department = department.to_string();
                attach_to = get_or_create(
                    &mut arena,
                    &mut containers,
                    ContainerSpec {
                        prefix: "DEPT",
                        key: &department_key,
                        label: department,
                        org_type: OrgType::Department,
                        path: &path,
                    },
                    Some(attach_to),
                );
            }

            if !unit.is_empty() {
                let parent_department_key = if department.is_empty() {
                    NO_DEPARTMENT
                } else {
                    department_key.as_str()
                };
                let unit_key = join_key(&[&group, parent_department_key, unit]);
                path.unit = unit.to_string();
                attach_to = get_or_create(
                    &mut arena,
                    &mut containers,
                    ContainerSpec {
                        prefix: "UNIT",
                        key: &unit_key,
                        label: unit,
                        org_type: OrgType::Unit,
                        path: &path,
                    },
                    Some(attach_to),
                );
            }

            let leaf = arena.insert_node(employee.detached());
            arena.attach(leaf, attach_to);
        }

        debug!(
            "synthesize: {} containers for {} employees",
            containers.len(),
            employees.len()
        );
        arena.into_forest(compare_siblings)
    }
}

struct ContainerSpec<'a> {
    prefix: &'static str,
    key: &'a str,
    label: &'a str,
    org_type: OrgType,
    path: &'a OrgPath,
}

fn get_or_create(
    arena: &mut NodeArena,
    containers: &mut HashMap<String, Index>,
    spec: ContainerSpec<'_>,
    parent: Option<Index>,
) -> Index {
    let map_key = format!("{}{}{}", spec.prefix, KEY_SEPARATOR, spec.key);
    if let Some(&idx) = containers.get(&map_key) {
        return idx;
    }
    let node = OrgNode::container(
        container_id(spec.prefix, spec.key),
        spec.label,
        spec.org_type,
        spec.path,
    );
    let idx = arena.insert_node(node);
    if let Some(parent) = parent {
        arena.attach(idx, parent);
    }
    containers.insert(map_key, idx);
    idx
}

/// `ORG-{prefix}-{url-encoded path}`; an empty path becomes `UNASSIGNED`.
fn container_id(prefix: &str, path: &str) -> String {
    let path = path.trim();
    let path = if path.is_empty() { "UNASSIGNED" } else { path };
    format!("ORG-{}-{}", prefix, urlencoding::encode(path))
}

fn join_key(parts: &[&str]) -> String {
    parts.join(KEY_SEPARATOR)
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

fn has_real_employee(node: &OrgNode) -> bool {
    !node.is_org_node || node.children.iter().any(has_real_employee)
}

/// Phase 3: post-order rebuild of the forest.
fn prune(nodes: Vec<OrgNode>) -> Vec<OrgNode> {
    let mut out = Vec::with_capacity(nodes.len());

    for mut node in nodes {
        node.children = prune(std::mem::take(&mut node.children));
        if !node.is_org_node {
            out.push(node);
            continue;
        }

        // a. chain collapse
        while matches!(
            node.children.as_slice(),
            [only] if only.is_org_node && normalize_label(only.label()) == normalize_label(node.label())
        ) {
            let only = node.children.remove(0);
            node.children = only.children;
        }

        let people = node.children.iter().filter(|c| !c.is_org_node).count();
        let sub_containers = node.children.len() - people;

        // b. lift-on-empty
        if node.org_type != OrgType::Group && people == 0 && sub_containers > 0 {
            out.extend(node.children.into_iter().filter(|c| c.is_org_node));
            continue;
        }

        // c. group-wrapper drop
        let only_company_level = people > 0
            && node
                .children
                .iter()
                .filter(|c| !c.is_org_node)
                .all(|c| c.org_type == OrgType::Company || is_ceo(c));
        if node.org_type == OrgType::Group && sub_containers == 0 && only_company_level {
            out.extend(node.children.into_iter().filter(|c| !c.is_org_node));
            continue;
        }

        // d. dead-branch removal
        if !has_real_employee(&node) {
            continue;
        }

        out.push(node);
    }

    out
}

/// Phase 4: the primary CEO becomes the only root; every CEO node is
/// removed from inside the forest, its children spliced up in its place.
fn anchor_under_ceo(forest: Vec<OrgNode>, employees: &[&OrgNode]) -> Vec<OrgNode> {
    let candidates: Vec<&OrgNode> = employees.iter().copied().filter(|e| is_ceo(e)).collect();
    let Some(primary) = candidates
        .iter()
        .copied()
        .min_by(|a, b| compare_report_order(a, b))
    else {
        return forest;
    };

    let ceo_ids: HashSet<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    let mut cleaned = strip_employees(forest, &ceo_ids);
    sort_forest(&mut cleaned, compare_siblings);

    debug!(
        "anchor_under_ceo: primary {} out of {} candidates",
        primary.id,
        candidates.len()
    );
    let mut root = primary.detached();
    root.children = cleaned;
    vec![root]
}

fn strip_employees(nodes: Vec<OrgNode>, excluded: &HashSet<&str>) -> Vec<OrgNode> {
    let mut out = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        let children = strip_employees(std::mem::take(&mut node.children), excluded);
        if !node.is_org_node && excluded.contains(node.id.as_str()) {
            out.extend(children);
        } else {
            node.children = children;
            out.push(node);
        }
    }
    out
}
