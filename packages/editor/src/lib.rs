//! # Mindplan Editor
//!
//! Core outline editing engine for mindplan.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ input: edit surface events, drag & drop     │
//! │  - EditSession (selection, label sync)      │
//! │  - DragSession (reparent by pointer)        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Document: current root + history            │
//! │  - Apply mutations with validation          │
//! │  - Undo/redo by root snapshots              │
//! │  - Load/save JSON                           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ engine: pure copy-on-write tree operations  │
//! │  (annotations and attachments on top)       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Immutable snapshots**: every edit produces a new root; old roots stay valid
//! 2. **All-or-nothing**: a mutation either yields a complete new tree or an error
//! 3. **Forgiving lookups**: unknown ids are no-ops, never failures
//! 4. **Guarded structure**: the root is fixed and reparenting cannot form cycles
//! 5. **One-way label sync**: the surface is loaded once per selection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mindplan_editor::{Document, EditorConfig, Mutation};
//!
//! let mut doc = Document::load("plan.json".into(), EditorConfig::default())?;
//!
//! let child = doc.insert_child(&doc.root().id.clone())?;
//! doc.apply(Mutation::SetLabel {
//!     node_id: child.unwrap(),
//!     label: "Chapter 1".to_string(),
//! })?;
//!
//! doc.save()?;
//! ```

pub mod annotations;
pub mod attachments;
mod collaborators;
mod config;
mod document;
mod drag;
pub mod engine;
mod errors;
mod mutations;
mod session;
mod surface;
mod undo_stack;
mod view_state;

pub use collaborators::{
    normalize_candidate, question_answer_tree, BlobStorage, ContentGenerator, FilePayload,
    Generated,
    GenerationError, QaPair, UploadError,
};
pub use config::EditorConfig;
pub use document::{Document, DocumentStorage};
pub use drag::{DragSession, DropOutcome};
pub use engine::SiblingDirection;
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use session::{EditSession, SessionState};
pub use surface::{EditSurface, FormatCommand, TextRange, TextSurface};
pub use undo_stack::{MutationBatch, UndoStack};
pub use view_state::{NodeViewFlags, ViewState};

// Re-export model types for convenience
pub use mindplan_model::{
    Annotation, Attachment, ImagePosition, Node, NodeColor, NodePatch, ScaleRange,
};
