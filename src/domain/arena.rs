use std::cmp::Ordering;
use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::OrgNode;

/// Slot in the arena: a node payload plus its links.
///
/// The payload's own `children` stay empty while it lives in the arena;
/// structure is carried by the index links until the forest is materialized.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: OrgNode,
    pub parent: Option<Index>,
    pub children: Vec<Index>,
}

/// Arena-backed forest under construction.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Turned into an owned `Vec<OrgNode>` forest by [`NodeArena::into_forest`].
#[derive(Debug)]
pub struct NodeArena {
    arena: Arena<ArenaNode>,
    order: Vec<Index>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            order: Vec::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            order: Vec::with_capacity(n),
        }
    }

    /// Insert a detached node; it is a root until attached.
    #[instrument(level = "trace", skip(self, data), fields(id = %data.id))]
    pub fn insert_node(&mut self, data: OrgNode) -> Index {
        let idx = self.arena.insert(ArenaNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        self.order.push(idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// True if `candidate` is `node` itself or one of its ancestors.
    ///
    /// Walks parent links with a visited set, so a corrupted chain cannot loop.
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor_or_self(&self, candidate: Index, node: Index) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = Some(node);
        while let Some(idx) = cursor {
            if idx == candidate {
                return true;
            }
            if !visited.insert(idx) {
                return false;
            }
            cursor = self.arena.get(idx).and_then(|n| n.parent);
        }
        false
    }

    /// Link `child` under `parent`. Refuses (returns false) when the link
    /// would close a cycle or either index is stale.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, child: Index, parent: Index) -> bool {
        if !self.arena.contains(child) || !self.arena.contains(parent) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            return false;
        }
        if let Some(old_parent) = self.arena.get(child).and_then(|n| n.parent) {
            if let Some(old) = self.arena.get_mut(old_parent) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(p) = self.arena.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.arena.get_mut(child) {
            c.parent = Some(parent);
        }
        true
    }

    /// Root indices in insertion order.
    pub fn roots(&self) -> Vec<Index> {
        self.order
            .iter()
            .copied()
            .filter(|&idx| self.arena.get(idx).is_some_and(|n| n.parent.is_none()))
            .collect()
    }

    /// Consume the arena into an owned forest, sorting every sibling list.
    #[instrument(level = "debug", skip(self, compare))]
    pub fn into_forest(mut self, compare: fn(&OrgNode, &OrgNode) -> Ordering) -> Vec<OrgNode> {
        let roots = self.roots();
        let mut forest: Vec<OrgNode> = roots
            .into_iter()
            .filter_map(|idx| self.take_subtree(idx, compare))
            .collect();
        forest.sort_by(compare);
        forest
    }

    fn take_subtree(
        &mut self,
        idx: Index,
        compare: fn(&OrgNode, &OrgNode) -> Ordering,
    ) -> Option<OrgNode> {
        let slot = self.arena.remove(idx)?;
        let mut node = slot.data;
        node.children = slot
            .children
            .into_iter()
            .filter_map(|child| self.take_subtree(child, compare))
            .collect();
        node.children.sort_by(compare);
        Some(node)
    }
}
