//! Per-node presentation flags.
//!
//! Hover and collapse state belong to whoever renders the tree. They live in
//! a side table keyed by node id and never enter the persisted [`Node`].

use std::collections::{HashMap, HashSet};

use mindplan_model::{collect_ids, Node};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeViewFlags {
    pub collapsed: bool,
    pub hovered: bool,
}

#[derive(Debug, Default)]
pub struct ViewState {
    flags: HashMap<String, NodeViewFlags>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self, node_id: &str) -> NodeViewFlags {
        self.flags.get(node_id).copied().unwrap_or_default()
    }

    pub fn is_collapsed(&self, node_id: &str) -> bool {
        self.flags(node_id).collapsed
    }

    /// Flip collapse state, returning the new value
    pub fn toggle_collapsed(&mut self, node_id: &str) -> bool {
        let entry = self.flags.entry(node_id.to_string()).or_default();
        entry.collapsed = !entry.collapsed;
        entry.collapsed
    }

    pub fn set_hovered(&mut self, node_id: &str, hovered: bool) {
        self.flags.entry(node_id.to_string()).or_default().hovered = hovered;
    }

    /// Forget flags for nodes no longer in the tree
    pub fn retain_existing(&mut self, root: &Node) {
        let live: HashSet<String> = collect_ids(root).into_iter().collect();
        self.flags.retain(|id, _| live.contains(id));
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
