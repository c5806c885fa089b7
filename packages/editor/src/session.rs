//! # Edit Session Management
//!
//! Tracks which node is being edited and keeps an edit surface in step with
//! the document.
//!
//! ## States
//!
//! ```text
//!            select(id)                     input → SetLabel(id)
//!   Idle ───────────────▶ Editing(id) ◀──────────────┐
//!    ▲                     │    │                     │
//!    │ deselect / node     │    └─────────────────────┘
//!    └─── removed ─────────┘    select(other) re-enters for `other`
//! ```
//!
//! ## Synchronization rules
//!
//! - The surface is loaded from the label exactly once, when the session
//!   enters `Editing` for a node. It is keyed on the node id, never on the
//!   label value, so a label write can never reload the surface.
//! - Input events flow one way: surface content → `SetLabel`.
//! - Label writes for one selection form one undo step. Structural edits made
//!   while editing (apply, drop, insert) close that step and get their own.
//! - The last selection range is saved on blur and before a control steals
//!   focus, and restored before a formatting command runs.

use tracing::debug;

use crate::surface::{EditSurface, FormatCommand, TextRange};
use crate::{Document, DragSession, DropOutcome, Mutation, MutationError, MutationResult};

const LABEL_BATCH: &str = "Edit label";

/// Selection state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing selected
    Idle,

    /// The node's label is projected into the surface
    Editing(String),
}

/// Single edit session over one document
pub struct EditSession<S: EditSurface> {
    /// Unique session identifier
    pub id: String,

    /// Document being edited; changed only through the session
    document: Document,

    surface: S,
    state: SessionState,

    /// Last known selection inside the surface
    saved_range: Option<TextRange>,
}

impl<S: EditSurface> EditSession<S> {
    /// Create new edit session
    pub fn new(id: String, document: Document, surface: S) -> Self {
        Self {
            id,
            document,
            surface,
            state: SessionState::Idle,
            saved_range: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_node_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::Editing(id) => Some(id),
            SessionState::Idle => None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn saved_range(&self) -> Option<TextRange> {
        self.saved_range
    }

    /// Select a node for editing.
    ///
    /// Selecting the node already being edited does nothing. Unknown ids are
    /// ignored. Returns whether the node is now being edited.
    pub fn select(&mut self, node_id: &str) -> bool {
        if self.selected_node_id() == Some(node_id) {
            return true;
        }
        let Some(label) = self.document.locate(node_id).map(|n| n.label.clone()) else {
            debug!(session = %self.id, node_id, "Ignoring selection of unknown node");
            return false;
        };

        self.leave_editing();
        self.enter_editing(node_id.to_string(), &label);
        true
    }

    /// Clear the selection (e.g. background click)
    pub fn deselect(&mut self) {
        self.leave_editing();
    }

    fn enter_editing(&mut self, node_id: String, label: &str) {
        debug!(session = %self.id, node_id = %node_id, "Entering edit");
        self.document.begin_batch(LABEL_BATCH);
        self.surface.set_content(label);
        self.saved_range = None;
        self.state = SessionState::Editing(node_id);
    }

    fn leave_editing(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Idle);
        if let SessionState::Editing(node_id) = previous {
            debug!(session = %self.id, node_id = %node_id, "Leaving edit");
            self.document.end_batch();
        }
        self.saved_range = None;
    }

    /// Surface input event: write the surface content into the label
    pub fn on_input(&mut self) -> Option<MutationResult> {
        let SessionState::Editing(node_id) = &self.state else {
            return None;
        };
        let mutation = Mutation::SetLabel {
            node_id: node_id.clone(),
            label: self.surface.content(),
        };
        // SetLabel never fails validation
        let result = self.document.apply(mutation).ok();
        self.sync_selection();
        result
    }

    /// Surface lost focus
    pub fn on_blur(&mut self) {
        if let Some(range) = self.surface.selection() {
            self.saved_range = Some(range);
        }
    }

    /// A control that takes focus (color picker, symbol menu) is opening
    pub fn before_focus_steal(&mut self) {
        if self.surface.has_focus() {
            if let Some(range) = self.surface.selection() {
                self.saved_range = Some(range);
            }
        }
    }

    /// Apply a formatting command to the label being edited.
    ///
    /// When focus has left the surface the saved range is put back and focus
    /// returned before the command runs. Returns false when idle.
    pub fn format(&mut self, command: FormatCommand) -> bool {
        if self.selected_node_id().is_none() {
            return false;
        }

        if !self.surface.has_focus() {
            if let Some(range) = self.saved_range {
                self.surface.restore_selection(range);
            }
            self.surface.focus();
        }

        self.surface.exec(&command);
        self.on_input();
        true
    }

    /// Apply a structural mutation through the session
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        self.outside_label_batch(|document| document.apply(mutation))
    }

    /// Append a default child to `parent_id`, returning its id
    pub fn insert_child(&mut self, parent_id: &str) -> Result<Option<String>, MutationError> {
        self.outside_label_batch(|document| document.insert_child(parent_id))
    }

    /// Release a drag over `target_id`
    pub fn drop_on(&mut self, drag: &mut DragSession, target_id: &str) -> DropOutcome {
        self.outside_label_batch(|document| drag.drop_on(document, target_id))
    }

    /// Run a structural change as its own undo step. The label batch of the
    /// current selection is closed before and reopened after.
    fn outside_label_batch<T>(&mut self, change: impl FnOnce(&mut Document) -> T) -> T {
        let editing = self.selected_node_id().is_some();
        if editing {
            self.document.end_batch();
        }
        let result = change(&mut self.document);
        if editing {
            self.document.begin_batch(LABEL_BATCH);
        }
        self.sync_selection();
        result
    }

    /// Undo; the surface is reloaded for the selected node if its label moved
    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.after_history_jump();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.after_history_jump();
        }
        redone
    }

    /// History navigation is an explicit re-entry: the restored label is
    /// projected once, the same way a fresh selection would.
    fn after_history_jump(&mut self) {
        let SessionState::Editing(node_id) = &self.state else {
            return;
        };
        match self.document.locate(node_id).map(|n| n.label.clone()) {
            Some(label) => {
                let node_id = node_id.clone();
                self.state = SessionState::Idle;
                self.enter_editing(node_id, &label);
            }
            None => self.leave_editing(),
        }
    }

    /// Drop to `Idle` when the edited node no longer exists
    fn sync_selection(&mut self) {
        if let SessionState::Editing(node_id) = &self.state {
            if self.document.locate(node_id).is_none() {
                debug!(session = %self.id, node_id = %node_id, "Edited node removed");
                self.leave_editing();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, TextSurface};
    use mindplan_model::Node;
    use std::path::PathBuf;

    fn session() -> EditSession<TextSurface> {
        let root = Node::new("R", "root")
            .with_child(Node::new("A", "a").with_child(Node::new("A1", "a1")))
            .with_child(Node::new("B", "b"));
        let doc =
            Document::from_root(PathBuf::from("test.json"), root, EditorConfig::default()).unwrap();
        EditSession::new("client-1".to_string(), doc, TextSurface::new())
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(session.surface().load_count(), 0);
    }

    #[test]
    fn test_select_loads_surface_once() {
        let mut session = session();
        assert!(session.select("A1"));
        assert!(session.select("A1"));

        assert_eq!(session.surface().content(), "a1");
        assert_eq!(session.surface().load_count(), 1);
    }

    #[test]
    fn test_select_unknown_node_is_ignored() {
        let mut session = session();
        assert!(!session.select("ghost"));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_input_while_idle_does_nothing() {
        let mut session = session();
        session.surface_mut().type_text("stray");
        assert_eq!(session.on_input(), None);
        assert_eq!(session.document().version, 0);
    }

    #[test]
    fn test_input_does_not_reload_surface() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("bee");
        session.on_input();

        assert_eq!(session.document().locate("B").unwrap().label, "bee");
        assert_eq!(session.surface().load_count(), 1);
    }

    #[test]
    fn test_deleting_edited_node_goes_idle() {
        let mut session = session();
        session.select("A1");

        session.apply(Mutation::DeleteSubtree { node_id: "A".into() }).unwrap();
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_format_restores_saved_range() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("hello world");
        session.on_input();
        session.surface_mut().select(TextRange::new(0, 5));

        session.before_focus_steal();
        session.surface_mut().blur();
        assert_eq!(session.saved_range(), Some(TextRange::new(0, 5)));

        assert!(session.format(FormatCommand::ForeColor("#ff0000".into())));
        assert_eq!(
            session.document().locate("B").unwrap().label,
            "<span style=\"color: #ff0000\">hello</span> world"
        );
        assert!(session.surface().has_focus());
    }

    #[test]
    fn test_format_while_idle_is_refused() {
        let mut session = session();
        assert!(!session.format(FormatCommand::Bold));
    }

    #[test]
    fn test_undo_reprojects_label() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("b1");
        session.on_input();
        session.surface_mut().type_text("b12");
        session.on_input();

        assert!(session.undo());
        assert_eq!(session.document().locate("B").unwrap().label, "b");
        assert_eq!(session.surface().content(), "b");
        assert_eq!(session.selected_node_id(), Some("B"));
    }

    #[test]
    fn test_blur_snapshot_is_restored_for_picker() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("hello world");
        session.on_input();
        session.surface_mut().select(TextRange::new(6, 11));

        // Blur fires while the surface still reports its selection
        session.on_blur();
        session.surface_mut().blur();
        assert_eq!(session.surface().selection(), None);

        assert!(session.format(FormatCommand::Bold));
        assert_eq!(session.document().locate("B").unwrap().label, "hello <b>world</b>");
        assert!(session.surface().has_focus());
    }

    #[test]
    fn test_format_with_focus_uses_live_selection() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("hello world");
        session.on_input();
        session.surface_mut().select(TextRange::new(6, 11));
        session.on_blur();
        session.surface_mut().blur();

        // Back in the surface with a new selection; the old snapshot is stale
        session.surface_mut().select(TextRange::new(0, 5));
        assert!(session.format(FormatCommand::Italic));
        assert_eq!(session.document().locate("B").unwrap().label, "<i>hello</i> world");
    }

    #[test]
    fn test_structural_edit_is_its_own_undo_step() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("Bee");
        session.on_input();

        session.apply(Mutation::DeleteSubtree { node_id: "A".into() }).unwrap();
        session.surface_mut().type_text("Beet");
        session.on_input();
        session.deselect();

        let history = session.document().history();
        assert_eq!(history.undo_levels(), 3);
        assert_eq!(history.undo_description(), Some("Edit label"));

        // Last label step, then the delete on its own
        assert!(session.undo());
        assert_eq!(session.document().locate("B").unwrap().label, "Bee");
        assert!(session.document().locate("A").is_none());
        assert!(session.undo());
        assert!(session.document().locate("A").is_some());
        assert_eq!(session.document().locate("B").unwrap().label, "Bee");
    }

    #[test]
    fn test_drop_while_editing_is_separate_step() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("Bee");
        session.on_input();

        let mut drag = DragSession::new();
        assert!(drag.begin(session.document(), "A1"));
        assert_eq!(session.drop_on(&mut drag, "B"), DropOutcome::Moved { version: 2 });
        assert_eq!(session.selected_node_id(), Some("B"));
        session.deselect();

        assert_eq!(session.document().history().undo_levels(), 2);
        assert!(session.undo());
        assert_eq!(session.document().locate("A").unwrap().child_ids(), vec!["A1"]);
        assert_eq!(session.document().locate("B").unwrap().label, "Bee");
    }

    #[test]
    fn test_insert_child_keeps_editing() {
        let mut session = session();
        session.select("B");

        let child = session.insert_child("B").unwrap().unwrap();
        assert_eq!(session.selected_node_id(), Some("B"));
        assert_eq!(session.document().locate("B").unwrap().child_ids(), vec![child.as_str()]);
        assert!(session.document().history().is_batching());
    }

    #[test]
    fn test_failed_redo_keeps_label_batch() {
        let mut session = session();
        session.select("B");
        session.surface_mut().type_text("B1");
        session.on_input();

        assert!(!session.redo());
        for text in ["B12", "B123"] {
            session.surface_mut().type_text(text);
            session.on_input();
        }
        session.deselect();

        assert_eq!(session.document().history().undo_levels(), 1);
    }

    #[test]
    fn test_failed_undo_keeps_label_batch() {
        let mut session = session();
        session.select("B");

        assert!(!session.undo());
        for text in ["B1", "B12"] {
            session.surface_mut().type_text(text);
            session.on_input();
        }
        session.deselect();

        assert_eq!(session.document().history().undo_levels(), 1);
    }
}
