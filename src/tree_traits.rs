use termtree::Tree;
use tracing::instrument;

use crate::domain::OrgNode;

/// Rendering of hierarchies as `termtree` trees.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// One-line label: containers as `[Type] Name`, people as `Name | Position | Title [id]`.
pub fn node_label(node: &OrgNode) -> String {
    if node.is_org_node {
        return format!("[{}] {}", node.org_type, node.label());
    }
    let mut label = format!("{} | {}", node.name, node.position);
    if !node.corporate_title.is_empty() {
        label.push_str(" | ");
        label.push_str(&node.corporate_title);
    }
    label.push_str(&format!(" [{}]", node.id));
    label
}

impl TreeNodeConvert for OrgNode {
    #[instrument(level = "trace", skip(self), fields(id = %self.id))]
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(node_label(self)).with_leaves(leaves)
    }
}

/// A forest renders as one tree per root.
impl TreeNodeConvert for [OrgNode] {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            [] => Tree::new("(empty)".to_string()),
            [root] => root.to_tree_string(),
            roots => Tree::new(format!("{} roots", roots.len()))
                .with_leaves(roots.iter().map(|r| r.to_tree_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrgPath, OrgType};

    #[test]
    fn test_container_label_shows_type() {
        let node = OrgNode::container("ORG-GROUP-Tech".into(), "Tech", OrgType::Group, &OrgPath::default());
        assert_eq!(node_label(&node), "[Group] Tech");
    }

    #[test]
    fn test_empty_forest_renders_placeholder() {
        let forest: Vec<OrgNode> = Vec::new();
        assert_eq!(forest.as_slice().to_tree_string().to_string().trim(), "(empty)");
    }
}
