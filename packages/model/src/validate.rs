use std::collections::HashSet;

use crate::{ModelError, ModelResult, Node};

/// Check the invariants a document must satisfy before it is edited.
///
/// Acyclicity and single parenthood hold by construction for an owned tree,
/// so only id presence and uniqueness are checked.
pub fn validate_tree(root: &Node) -> ModelResult<()> {
    let mut seen = HashSet::new();
    validate_node(root, &mut seen)
}

fn validate_node<'a>(node: &'a Node, seen: &mut HashSet<&'a str>) -> ModelResult<()> {
    if node.id.is_empty() {
        return Err(ModelError::EmptyId {
            label: node.label.clone(),
        });
    }
    if !seen.insert(node.id.as_str()) {
        return Err(ModelError::DuplicateId(node.id.clone()));
    }
    for child in &node.children {
        validate_node(child, seen)?;
    }
    Ok(())
}

/// Every node id in the subtree, depth-first pre-order
pub fn collect_ids(root: &Node) -> Vec<String> {
    let mut out = Vec::with_capacity(root.subtree_size());
    collect_into(root, &mut out);
    out
}

fn collect_into(node: &Node, out: &mut Vec<String>) {
    out.push(node.id.clone());
    for child in &node.children {
        collect_into(child, out);
    }
}

/// Depth of `id` below `root` (root is 0), or `None` if absent
pub fn depth_of(root: &Node, id: &str) -> Option<usize> {
    if root.id == id {
        return Some(0);
    }
    root.children
        .iter()
        .find_map(|child| depth_of(child, id).map(|d| d + 1))
}
