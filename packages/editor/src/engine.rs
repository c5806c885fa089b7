//! # Tree Engine
//!
//! Pure copy-on-write operations over an immutable outline tree.
//!
//! Every function takes the current root and returns a new root. The input is
//! never modified: the nodes on the path from the root to the edited node are
//! rebuilt, every other subtree is shared with the input by `Arc`.
//!
//! ## Not-found policy
//!
//! An id that is not in the tree is never an error. The operation returns
//! the input root unchanged (`Arc::ptr_eq` with the argument), so callers can
//! detect "nothing happened" without a separate status value.
//!
//! Structural violations (touching the root, cycles) are the only failures.

use std::sync::Arc;

use mindplan_model::{Node, NodePatch};
use serde::{Deserialize, Serialize};

use crate::mutations::MutationError;

/// Direction for [`reorder_sibling`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingDirection {
    Previous,
    Next,
}

/// Depth-first search for `id`
pub fn locate<'a>(root: &'a Arc<Node>, id: &str) -> Option<&'a Arc<Node>> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| locate(child, id))
}

/// Node whose children contain `id`. `None` for the root or a missing id.
pub fn parent_of<'a>(root: &'a Arc<Node>, id: &str) -> Option<&'a Arc<Node>> {
    if root.children.iter().any(|c| c.id == id) {
        return Some(root);
    }
    root.children.iter().find_map(|child| parent_of(child, id))
}

/// Rebuild the path to `id`, replacing that node with `f(node)`
pub fn update<F>(root: &Arc<Node>, id: &str, f: F) -> Arc<Node>
where
    F: Fn(&Node) -> Node,
{
    rewrite(root, id, &f).unwrap_or_else(|| Arc::clone(root))
}

fn rewrite<F>(node: &Arc<Node>, id: &str, f: &F) -> Option<Arc<Node>>
where
    F: Fn(&Node) -> Node,
{
    if node.id == id {
        return Some(Arc::new(f(node)));
    }

    for (index, child) in node.children.iter().enumerate() {
        if let Some(new_child) = rewrite(child, id, f) {
            let mut next = Node::clone(node);
            next.children[index] = new_child;
            return Some(Arc::new(next));
        }
    }

    None
}

/// Merge `patch` into the node `id`
pub fn patch(root: &Arc<Node>, id: &str, patch: &NodePatch) -> Arc<Node> {
    if patch.is_empty() {
        return Arc::clone(root);
    }
    update(root, id, |node| node.merged(patch))
}

/// Append a fresh default child to `parent_id`
pub fn insert_child(root: &Arc<Node>, parent_id: &str, child_id: &str, label: &str) -> Arc<Node> {
    insert_subtree(root, parent_id, Arc::new(Node::new(child_id, label)))
}

/// Append `subtree` as the last child of `parent_id`.
///
/// The exact `Arc` passed in is attached, so a relocated subtree keeps its
/// identity.
pub fn insert_subtree(root: &Arc<Node>, parent_id: &str, subtree: Arc<Node>) -> Arc<Node> {
    update(root, parent_id, |parent| {
        let mut next = parent.clone();
        next.children.push(Arc::clone(&subtree));
        next
    })
}

/// Detach `id` from its parent.
///
/// Returns the new root together with the removed subtree, or `None` when
/// `id` is absent or is the root itself.
pub fn remove_subtree(root: &Arc<Node>, id: &str) -> Option<(Arc<Node>, Arc<Node>)> {
    if let Some(pos) = root.children.iter().position(|c| c.id == id) {
        let mut next = Node::clone(root);
        let removed = next.children.remove(pos);
        return Some((Arc::new(next), removed));
    }

    for (index, child) in root.children.iter().enumerate() {
        if let Some((new_child, removed)) = remove_subtree(child, id) {
            let mut next = Node::clone(root);
            next.children[index] = new_child;
            return Some((Arc::new(next), removed));
        }
    }

    None
}

/// Delete `id` and all of its descendants
pub fn delete_subtree(root: &Arc<Node>, id: &str) -> Result<Arc<Node>, MutationError> {
    if root.id == id {
        return Err(MutationError::RootLocked);
    }

    Ok(remove_subtree(root, id)
        .map(|(next, _)| next)
        .unwrap_or_else(|| Arc::clone(root)))
}

/// Swap `id` with its neighbour in `direction`. Boundaries are a no-op.
pub fn reorder_sibling(root: &Arc<Node>, id: &str, direction: SiblingDirection) -> Arc<Node> {
    let Some(parent) = parent_of(root, id) else {
        return Arc::clone(root);
    };
    let Some(index) = parent.children.iter().position(|c| c.id == id) else {
        return Arc::clone(root);
    };

    let neighbour = match direction {
        SiblingDirection::Previous if index > 0 => index - 1,
        SiblingDirection::Next if index + 1 < parent.children.len() => index + 1,
        _ => return Arc::clone(root),
    };

    update(root, &parent.id, |p| {
        let mut next = p.clone();
        next.children.swap(index, neighbour);
        next
    })
}

/// True when `candidate_id` is `ancestor_id` or lies anywhere beneath it
pub fn is_descendant(root: &Arc<Node>, ancestor_id: &str, candidate_id: &str) -> bool {
    if ancestor_id == candidate_id {
        return true;
    }
    match locate(root, ancestor_id) {
        Some(ancestor) => locate(ancestor, candidate_id).is_some(),
        None => false,
    }
}

/// Move `source_id` (with its subtree) to the end of `target_id`'s children.
///
/// The target is looked up in the tree produced by removing the source, so the
/// attach step always sees the same intermediate tree the detach step built.
pub fn reparent(
    root: &Arc<Node>,
    source_id: &str,
    target_id: &str,
) -> Result<Arc<Node>, MutationError> {
    if root.id == source_id {
        return Err(MutationError::RootLocked);
    }
    if source_id == target_id {
        return Ok(Arc::clone(root));
    }
    if is_descendant(root, source_id, target_id) {
        return Err(MutationError::CycleDetected {
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
        });
    }

    let Some((detached, moved)) = remove_subtree(root, source_id) else {
        return Ok(Arc::clone(root));
    };
    if locate(&detached, target_id).is_none() {
        return Ok(Arc::clone(root));
    }

    Ok(insert_subtree(&detached, target_id, moved))
}
