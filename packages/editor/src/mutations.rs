//! # Outline Mutations
//!
//! High-level semantic operations on a mindplan document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one user action
//! 2. **Validated**: Root protection and cycle checks run before applying
//! 3. **Pure**: Applying returns a new root; the input tree is untouched
//! 4. **Forgiving**: Unknown node or annotation ids are no-ops, not errors
//!
//! ## Mutation Semantics
//!
//! ### Reparent
//! - Atomic relocation of a node and its subtree to the end of a new parent
//! - Fails if the source is the root
//! - Fails if the target lies inside the source (would create cycle)
//!
//! ### SetLabel
//! - Atomic replacement of the label (not a character diff)
//!
//! ### DeleteSubtree
//! - Removes the node and all descendants
//! - Fails for the root

use std::collections::HashSet;
use std::sync::Arc;

use mindplan_model::{
    collect_ids, Annotation, Attachment, ImagePosition, Node, NodeColor, NodePatch,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{self, SiblingDirection};
use crate::{annotations, attachments, EditorConfig};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Replace a node's label
    SetLabel { node_id: String, label: String },

    /// Set or clear a node's explicit color
    SetColor {
        node_id: String,
        color: Option<NodeColor>,
    },

    /// Append a fresh, empty child
    InsertChild {
        parent_id: String,
        child_id: String,
        label: String,
    },

    /// Append a prepared subtree (imported content)
    InsertSubtree { parent_id: String, node: Node },

    /// Remove a node and its descendants
    DeleteSubtree { node_id: String },

    /// Swap a node with its previous or next sibling
    Reorder {
        node_id: String,
        direction: SiblingDirection,
    },

    /// Move a node under a new parent
    Reparent { source_id: String, target_id: String },

    AddAnnotation {
        node_id: String,
        annotation: Annotation,
    },

    EditAnnotation {
        node_id: String,
        annotation_id: String,
        content: String,
        background_color: Option<String>,
    },

    DeleteAnnotation {
        node_id: String,
        annotation_id: String,
    },

    /// Replace the whole image of a node
    SetImage { node_id: String, image: Attachment },

    SetImagePosition {
        node_id: String,
        position: ImagePosition,
    },

    SetImageScale { node_id: String, scale: f64 },

    RemoveImage { node_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("The root node cannot be deleted or moved")]
    RootLocked,

    #[error("Would create cycle: {target_id} is inside {source_id}")]
    CycleDetected { source_id: String, target_id: String },

    #[error("Node id already in use: {0}")]
    DuplicateId(String),
}

impl Mutation {
    /// Apply mutation to the tree with validation
    pub fn apply(
        &self,
        root: &Arc<Node>,
        config: &EditorConfig,
    ) -> Result<Arc<Node>, MutationError> {
        self.validate(root)?;

        let next = match self {
            Mutation::SetLabel { node_id, label } => {
                engine::patch(root, node_id, &NodePatch::label(label.clone()))
            }

            Mutation::SetColor { node_id, color } => {
                engine::patch(root, node_id, &NodePatch::color(color.clone()))
            }

            Mutation::InsertChild {
                parent_id,
                child_id,
                label,
            } => engine::insert_child(root, parent_id, child_id, label),

            Mutation::InsertSubtree { parent_id, node } => {
                engine::insert_subtree(root, parent_id, Arc::new(node.clone()))
            }

            Mutation::DeleteSubtree { node_id } => engine::delete_subtree(root, node_id)?,

            Mutation::Reorder { node_id, direction } => {
                engine::reorder_sibling(root, node_id, *direction)
            }

            Mutation::Reparent {
                source_id,
                target_id,
            } => engine::reparent(root, source_id, target_id)?,

            Mutation::AddAnnotation {
                node_id,
                annotation,
            } => annotations::add_annotation(root, node_id, annotation.clone()),

            Mutation::EditAnnotation {
                node_id,
                annotation_id,
                content,
                background_color,
            } => annotations::edit_annotation(
                root,
                node_id,
                annotation_id,
                content,
                background_color.as_deref(),
            ),

            Mutation::DeleteAnnotation {
                node_id,
                annotation_id,
            } => annotations::delete_annotation(root, node_id, annotation_id),

            Mutation::SetImage { node_id, image } => {
                attachments::set_image(root, node_id, image.clone(), config.scale_range)
            }

            Mutation::SetImagePosition { node_id, position } => {
                attachments::set_image_position(root, node_id, *position)
            }

            Mutation::SetImageScale { node_id, scale } => {
                attachments::set_image_scale(root, node_id, *scale, config.scale_range)
            }

            Mutation::RemoveImage { node_id } => attachments::remove_image(root, node_id),
        };

        Ok(next)
    }

    /// Validate without applying
    pub fn validate(&self, root: &Arc<Node>) -> Result<(), MutationError> {
        match self {
            Mutation::DeleteSubtree { node_id } if *node_id == root.id => {
                Err(MutationError::RootLocked)
            }

            Mutation::Reparent {
                source_id,
                target_id,
            } => {
                if *source_id == root.id {
                    return Err(MutationError::RootLocked);
                }
                if source_id != target_id && engine::is_descendant(root, source_id, target_id) {
                    return Err(MutationError::CycleDetected {
                        source_id: source_id.clone(),
                        target_id: target_id.clone(),
                    });
                }
                Ok(())
            }

            Mutation::InsertChild { child_id, .. } => {
                if engine::locate(root, child_id).is_some() {
                    return Err(MutationError::DuplicateId(child_id.clone()));
                }
                Ok(())
            }

            Mutation::InsertSubtree { node, .. } => {
                let existing: HashSet<String> = collect_ids(root).into_iter().collect();
                let mut incoming = HashSet::new();
                for id in collect_ids(node) {
                    if existing.contains(&id) || !incoming.insert(id.clone()) {
                        return Err(MutationError::DuplicateId(id));
                    }
                }
                Ok(())
            }

            _ => Ok(()),
        }
    }

    /// Primary node this mutation targets
    pub fn node_id(&self) -> &str {
        match self {
            Mutation::SetLabel { node_id, .. }
            | Mutation::SetColor { node_id, .. }
            | Mutation::DeleteSubtree { node_id }
            | Mutation::Reorder { node_id, .. }
            | Mutation::AddAnnotation { node_id, .. }
            | Mutation::EditAnnotation { node_id, .. }
            | Mutation::DeleteAnnotation { node_id, .. }
            | Mutation::SetImage { node_id, .. }
            | Mutation::SetImagePosition { node_id, .. }
            | Mutation::SetImageScale { node_id, .. }
            | Mutation::RemoveImage { node_id } => node_id,
            Mutation::InsertChild { parent_id, .. }
            | Mutation::InsertSubtree { parent_id, .. } => parent_id,
            Mutation::Reparent { source_id, .. } => source_id,
        }
    }

    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetLabel { .. } => "set_label",
            Mutation::SetColor { .. } => "set_color",
            Mutation::InsertChild { .. } => "insert_child",
            Mutation::InsertSubtree { .. } => "insert_subtree",
            Mutation::DeleteSubtree { .. } => "delete_subtree",
            Mutation::Reorder { .. } => "reorder",
            Mutation::Reparent { .. } => "reparent",
            Mutation::AddAnnotation { .. } => "add_annotation",
            Mutation::EditAnnotation { .. } => "edit_annotation",
            Mutation::DeleteAnnotation { .. } => "delete_annotation",
            Mutation::SetImage { .. } => "set_image",
            Mutation::SetImagePosition { .. } => "set_image_position",
            Mutation::SetImageScale { .. } => "set_image_scale",
            Mutation::RemoveImage { .. } => "remove_image",
        }
    }
}

/// Result of applying a mutation to a document
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// False when the mutation was a no-op (unknown id, boundary reorder, ...)
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<Node> {
        Arc::new(
            Node::new("R", "root")
                .with_child(Node::new("A", "a").with_child(Node::new("A1", "a1")))
                .with_child(Node::new("B", "b")),
        )
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::Reparent {
            source_id: "A".to_string(),
            target_id: "B".to_string(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert!(json.contains("\"type\":\"reparent\""));
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_validation_rejects_root_removal() {
        let root = sample();
        let mutation = Mutation::DeleteSubtree {
            node_id: "R".to_string(),
        };

        assert_eq!(mutation.validate(&root), Err(MutationError::RootLocked));
        assert_eq!(
            mutation.apply(&root, &EditorConfig::default()),
            Err(MutationError::RootLocked)
        );
    }

    #[test]
    fn test_insert_child_rejects_duplicate_id() {
        let root = sample();
        let mutation = Mutation::InsertChild {
            parent_id: "B".to_string(),
            child_id: "A1".to_string(),
            label: String::new(),
        };

        assert_eq!(mutation.validate(&root), Err(MutationError::DuplicateId("A1".into())));
    }

    #[test]
    fn test_insert_subtree_rejects_internal_duplicates() {
        let root = sample();
        let node = Node::new("X", "x").with_child(Node::new("X", "again"));
        let mutation = Mutation::InsertSubtree {
            parent_id: "B".to_string(),
            node,
        };

        assert_eq!(mutation.validate(&root), Err(MutationError::DuplicateId("X".into())));
    }

    #[test]
    fn test_set_label_on_missing_node_is_noop() {
        let root = sample();
        let mutation = Mutation::SetLabel {
            node_id: "ghost".to_string(),
            label: "boo".to_string(),
        };

        let next = mutation.apply(&root, &EditorConfig::default()).unwrap();
        assert!(Arc::ptr_eq(&root, &next));
    }
}
