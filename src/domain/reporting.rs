//! Reporting-line forest: employees linked to their managers.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::debug;

use crate::domain::arena::NodeArena;
use crate::domain::entities::OrgNode;
use crate::domain::ordering::compare_report_order;

/// Links classified nodes by `manager_id` into a forest.
#[derive(Debug, Default)]
pub struct ReportingTreeBuilder;

impl ReportingTreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Every input node appears exactly once in the result.
    ///
    /// A node whose manager is unknown becomes a root. A link that would
    /// close a manager cycle is refused and that node becomes a root too.
    pub fn build(&self, nodes: Vec<OrgNode>) -> Vec<OrgNode> {
        let mut arena = NodeArena::with_capacity(nodes.len());
        let mut index: HashMap<String, Index> = HashMap::with_capacity(nodes.len());
        let mut links: Vec<(Index, String)> = Vec::new();

        for mut node in nodes {
            node.children.clear();
            let manager = node.manager_id.clone();
            let id = node.id.clone();
            let idx = arena.insert_node(node);
            index.insert(id, idx);
            if let Some(manager) = manager {
                links.push((idx, manager));
            }
        }

        for (child, manager_id) in links {
            let Some(&parent) = index.get(&manager_id) else {
                continue;
            };
            if !arena.attach(child, parent) {
                debug!(
                    "build: refused link to {} (cycle or self reference), node stays a root",
                    manager_id
                );
            }
        }

        let total = arena.len();
        let forest = arena.into_forest(compare_report_order);
        debug!("build: {} nodes in {} roots", total, forest.len());
        forest
    }
}
