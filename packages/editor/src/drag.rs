//! Drag-to-reparent interaction.
//!
//! A drag carries one node id from pointer-down to drop. Nothing touches the
//! document until a drop lands on a node, so aborting leaves no state behind.

use tracing::{debug, warn};

use crate::{Document, Mutation, MutationError};

/// Outcome of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The carried node now lives under the target
    Moved { version: u64 },

    /// The move was refused; the tree is unchanged and the caller should
    /// show a notice
    Rejected(MutationError),

    /// No drag in progress, dropped on itself, or an id vanished
    Ignored,
}

#[derive(Debug, Default)]
pub struct DragSession {
    carried: Option<String>,
    hover: Option<String>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down-and-hold on a node handle. The root cannot be dragged.
    pub fn begin(&mut self, document: &Document, node_id: &str) -> bool {
        if document.is_root(node_id) {
            debug!(node_id, "Root refuses to start a drag");
            return false;
        }
        if document.locate(node_id).is_none() {
            return false;
        }
        self.carried = Some(node_id.to_string());
        self.hover = None;
        true
    }

    pub fn carried(&self) -> Option<&str> {
        self.carried.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.carried.is_some()
    }

    /// Pointer entered a candidate target
    pub fn hover(&mut self, node_id: &str) {
        if self.carried.as_deref().is_some_and(|c| c != node_id) {
            self.hover = Some(node_id.to_string());
        }
    }

    /// Pointer left a candidate target
    pub fn leave(&mut self, node_id: &str) {
        if self.hover.as_deref() == Some(node_id) {
            self.hover = None;
        }
    }

    /// Whether `node_id` should render as accepting the drop
    pub fn is_drop_target(&self, node_id: &str) -> bool {
        self.hover.as_deref() == Some(node_id)
    }

    /// Release over `target_id`. Ends the drag whatever the outcome.
    pub fn drop_on(&mut self, document: &mut Document, target_id: &str) -> DropOutcome {
        self.hover = None;
        let Some(source_id) = self.carried.take() else {
            return DropOutcome::Ignored;
        };
        if source_id == target_id {
            return DropOutcome::Ignored;
        }

        let mutation = Mutation::Reparent {
            source_id: source_id.clone(),
            target_id: target_id.to_string(),
        };
        match document.apply(mutation) {
            Ok(result) if result.changed => {
                debug!(source_id = %source_id, target_id, version = result.version, "Node moved");
                DropOutcome::Moved {
                    version: result.version,
                }
            }
            Ok(_) => DropOutcome::Ignored,
            Err(e) => {
                warn!(source_id = %source_id, target_id, error = %e, "Drop rejected");
                DropOutcome::Rejected(e)
            }
        }
    }

    /// Release outside any target
    pub fn abort(&mut self) {
        self.carried = None;
        self.hover = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditorConfig;
    use mindplan_model::Node;
    use std::path::PathBuf;

    fn doc() -> Document {
        let root = Node::new("R", "root")
            .with_child(Node::new("A", "a").with_child(Node::new("A1", "a1")))
            .with_child(Node::new("B", "b"));
        Document::from_root(PathBuf::from("drag.json"), root, EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_root_cannot_be_dragged() {
        let doc = doc();
        let mut drag = DragSession::new();
        assert!(!drag.begin(&doc, "R"));
        assert!(!drag.is_active());
    }

    #[test]
    fn test_hover_marks_only_other_nodes() {
        let doc = doc();
        let mut drag = DragSession::new();
        drag.begin(&doc, "A");

        drag.hover("A");
        assert!(!drag.is_drop_target("A"));
        drag.hover("B");
        assert!(drag.is_drop_target("B"));
        drag.leave("B");
        assert!(!drag.is_drop_target("B"));
    }

    #[test]
    fn test_drop_moves_node() {
        let mut doc = doc();
        let mut drag = DragSession::new();
        drag.begin(&doc, "A");

        assert_eq!(drag.drop_on(&mut doc, "B"), DropOutcome::Moved { version: 1 });
        assert_eq!(doc.locate("B").unwrap().child_ids(), vec!["A"]);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_drop_into_own_subtree_is_rejected() {
        let mut doc = doc();
        let mut drag = DragSession::new();
        drag.begin(&doc, "A");

        assert!(matches!(
            drag.drop_on(&mut doc, "A1"),
            DropOutcome::Rejected(MutationError::CycleDetected { .. })
        ));
        assert_eq!(doc.version, 0);
    }

    #[test]
    fn test_abort_leaves_document() {
        let mut doc = doc();
        let mut drag = DragSession::new();
        drag.begin(&doc, "A");
        drag.hover("B");
        drag.abort();

        assert_eq!(drag.drop_on(&mut doc, "B"), DropOutcome::Ignored);
        assert_eq!(doc.version, 0);
    }
}
