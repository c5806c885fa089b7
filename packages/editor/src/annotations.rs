//! Annotation (sticky note) operations, layered on [`engine::patch`].
//!
//! Each operation reads the node's comment list, builds a new list and writes
//! the whole list back. New notes are appended; edits keep position and id.

use std::sync::Arc;

use mindplan_model::{Annotation, Node, NodePatch};

use crate::engine;

/// Comments of `node_id`, empty when the node or its list is absent
pub fn annotations_of<'a>(root: &'a Arc<Node>, node_id: &str) -> &'a [Annotation] {
    engine::locate(root, node_id)
        .map(|node| node.comments())
        .unwrap_or(&[])
}

pub fn add_annotation(root: &Arc<Node>, node_id: &str, annotation: Annotation) -> Arc<Node> {
    let Some(node) = engine::locate(root, node_id) else {
        return Arc::clone(root);
    };

    let mut comments = node.comments().to_vec();
    comments.push(annotation);
    engine::patch(root, node_id, &NodePatch::comments(comments))
}

/// Replace the content (and optionally the color) of one annotation
pub fn edit_annotation(
    root: &Arc<Node>,
    node_id: &str,
    annotation_id: &str,
    content: &str,
    background_color: Option<&str>,
) -> Arc<Node> {
    let Some(node) = engine::locate(root, node_id) else {
        return Arc::clone(root);
    };
    if !node.comments().iter().any(|c| c.id == annotation_id) {
        return Arc::clone(root);
    }

    let comments = node
        .comments()
        .iter()
        .map(|c| {
            if c.id != annotation_id {
                return c.clone();
            }
            let mut edited = c.clone();
            edited.content = content.to_string();
            if let Some(color) = background_color {
                edited.background_color = color.to_string();
            }
            edited
        })
        .collect();

    engine::patch(root, node_id, &NodePatch::comments(comments))
}

pub fn delete_annotation(root: &Arc<Node>, node_id: &str, annotation_id: &str) -> Arc<Node> {
    let Some(node) = engine::locate(root, node_id) else {
        return Arc::clone(root);
    };
    if !node.comments().iter().any(|c| c.id == annotation_id) {
        return Arc::clone(root);
    }

    let comments = node
        .comments()
        .iter()
        .filter(|c| c.id != annotation_id)
        .cloned()
        .collect();

    engine::patch(root, node_id, &NodePatch::comments(comments))
}
