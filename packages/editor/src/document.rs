//! # Document Handle
//!
//! Core document abstraction for mindplan editing.
//!
//! A Document owns the current outline root and its editing history.
//! Documents can be:
//! - **Memory-backed**: Temporary, for testing or trees handed over by a caller
//! - **File-backed**: JSON on disk, with dirty tracking
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Validate → Edit → Save
//!   ↓       ↓         ↓      ↓
//! JSON   invariants  Arc<Node> JSON
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use mindplan_model::{collect_ids, validate_tree, Annotation, IDGenerator, Node};
use tracing::{debug, info, warn};

use crate::{engine, EditorConfig, EditorError, Mutation, MutationError, MutationResult, UndoStack};

/// Editable mindplan document
#[derive(Debug)]
pub struct Document {
    /// Path of the backing file, or a display name for memory documents
    pub path: PathBuf,

    /// Current version number (increments on each effective mutation)
    pub version: u64,

    config: EditorConfig,
    root: Arc<Node>,
    ids: IDGenerator,
    history: UndoStack,
    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory,

    /// File-backed (single-user editing)
    File { dirty: bool },
}

impl Document {
    /// Wrap a tree supplied by a caller (memory-backed)
    pub fn from_root(path: PathBuf, root: Node, config: EditorConfig) -> Result<Self, EditorError> {
        Self::build(path, root, config, DocumentStorage::Memory)
    }

    /// Parse a JSON tree (memory-backed)
    pub fn from_json(path: PathBuf, json: &str, config: EditorConfig) -> Result<Self, EditorError> {
        let root: Node = serde_json::from_str(json)?;
        Self::from_root(path, root, config)
    }

    /// Load document from file (file-backed)
    pub fn load(path: PathBuf, config: EditorConfig) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(&path)?;
        let root: Node = serde_json::from_str(&source)?;
        let doc = Self::build(path, root, config, DocumentStorage::File { dirty: false })?;
        info!(path = %doc.path.display(), nodes = doc.root.subtree_size(), "Loaded document");
        Ok(doc)
    }

    /// Create a new file-backed document holding only a root
    pub fn create(
        path: PathBuf,
        root_label: &str,
        config: EditorConfig,
    ) -> Result<Self, EditorError> {
        let key = path.display().to_string();
        let mut ids = IDGenerator::new(&key);
        let root = Node::new(ids.new_id(), root_label);
        let mut doc = Self::build(path, root, config, DocumentStorage::File { dirty: true })?;
        doc.ids = ids;
        Ok(doc)
    }

    fn build(
        path: PathBuf,
        root: Node,
        config: EditorConfig,
        storage: DocumentStorage,
    ) -> Result<Self, EditorError> {
        validate_tree(&root)?;

        let nonce = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        let mut ids = IDGenerator::for_session(&root.id, nonce);
        ids.reserve(collect_ids(&root));

        Ok(Self {
            path,
            version: 0,
            history: UndoStack::with_max_levels(config.undo_levels),
            config,
            root: Arc::new(root),
            ids,
            storage,
        })
    }

    /// Current root (cheap to clone)
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn locate(&self, id: &str) -> Option<&Arc<Node>> {
        engine::locate(&self.root, id)
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.root.id == id
    }

    /// Fresh node id, unique within this document
    pub fn new_id(&mut self) -> String {
        self.ids.new_id()
    }

    /// Apply a mutation.
    ///
    /// No-ops (unknown ids, boundary reorders) leave the version untouched
    /// and report `changed: false`.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let next = match mutation.apply(&self.root, &self.config) {
            Ok(next) => next,
            Err(e) => {
                warn!(
                    mutation = mutation.name(),
                    node_id = mutation.node_id(),
                    error = %e,
                    "Mutation rejected"
                );
                return Err(e);
            }
        };

        if Arc::ptr_eq(&next, &self.root) {
            debug!(
                mutation = mutation.name(),
                node_id = mutation.node_id(),
                "Mutation was a no-op"
            );
            return Ok(MutationResult {
                version: self.version,
                changed: false,
            });
        }

        self.ids.reserve(new_ids(&mutation));
        self.history.record(&mutation, &self.root, &next);
        self.replace_root(next);
        debug!(
            mutation = mutation.name(),
            node_id = mutation.node_id(),
            version = self.version,
            "Mutation applied"
        );

        Ok(MutationResult {
            version: self.version,
            changed: true,
        })
    }

    /// Append a default child to `parent_id`, returning its id
    pub fn insert_child(&mut self, parent_id: &str) -> Result<Option<String>, MutationError> {
        if self.locate(parent_id).is_none() {
            return Ok(None);
        }
        let child_id = self.new_id();
        self.apply(Mutation::InsertChild {
            parent_id: parent_id.to_string(),
            child_id: child_id.clone(),
            label: self.config.new_node_label.clone(),
        })?;
        Ok(Some(child_id))
    }

    /// Append a new annotation to `node_id`, returning its id.
    ///
    /// `color` falls back to the configured annotation color.
    pub fn add_annotation(
        &mut self,
        node_id: &str,
        content: &str,
        color: Option<&str>,
    ) -> Result<Option<String>, MutationError> {
        if self.locate(node_id).is_none() {
            return Ok(None);
        }
        let color = color.unwrap_or(&self.config.annotation_color).to_string();
        let annotation = Annotation::new(self.new_id(), content, color, Utc::now());
        let annotation_id = annotation.id.clone();
        self.apply(Mutation::AddAnnotation {
            node_id: node_id.to_string(),
            annotation,
        })?;
        Ok(Some(annotation_id))
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: &str) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.replace_root(previous);
                debug!(version = self.version, "Undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.replace_root(next);
                debug!(version = self.version, "Redo");
                true
            }
            None => false,
        }
    }

    fn replace_root(&mut self, root: Arc<Node>) {
        self.root = root;
        self.version += 1;
        if let DocumentStorage::File { dirty } = &mut self.storage {
            *dirty = true;
        }
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty } => *dirty,
            DocumentStorage::Memory => false,
        }
    }

    /// Serialized tree, as handed back to persistence
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.root.as_ref())?)
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        let json = self.to_json()?;
        match &mut self.storage {
            DocumentStorage::File { dirty } => {
                std::fs::write(&self.path, json)?;
                *dirty = false;
                info!(path = %self.path.display(), version = self.version, "Saved document");
                Ok(())
            }
            DocumentStorage::Memory => Err(EditorError::NotFileBacked),
        }
    }
}

/// Ids a mutation introduces into the tree
fn new_ids(mutation: &Mutation) -> Vec<String> {
    match mutation {
        Mutation::InsertChild { child_id, .. } => vec![child_id.clone()],
        Mutation::InsertSubtree { node, .. } => collect_ids(node),
        Mutation::AddAnnotation { annotation, .. } => vec![annotation.id.clone()],
        _ => Vec::new(),
    }
}
