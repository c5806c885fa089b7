//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Trees are immutable, so history stores root snapshots instead of inverse
//!   mutations; unchanged subtrees are shared between snapshots
//! - Undo restores the root from before a batch; redo restores the root after it
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let next = mutation.apply(&root, &config)?;
//! stack.record(&mutation, &root, &next);
//!
//! if let Some(previous) = stack.undo() {
//!     root = previous;
//! }
//! ```

use std::sync::Arc;

use mindplan_model::Node;

use crate::Mutation;

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// Root before the first mutation
    pub before: Arc<Node>,

    /// Root after the last mutation
    pub after: Arc<Node>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    /// Create a single-mutation batch
    pub fn single(mutation: Mutation, before: Arc<Node>, after: Arc<Node>) -> Self {
        Self {
            mutations: vec![mutation],
            before,
            after,
            description: None,
        }
    }
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch: description until the first mutation
    /// arrives, then the batch itself
    open_batch: Option<OpenBatch>,
}

#[derive(Debug)]
enum OpenBatch {
    Empty { description: Option<String> },
    Building(MutationBatch),
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            open_batch: None,
        }
    }

    /// Record a mutation that turned `before` into `after`
    pub fn record(&mut self, mutation: &Mutation, before: &Arc<Node>, after: &Arc<Node>) {
        match self.open_batch.take() {
            Some(OpenBatch::Empty { description }) => {
                let mut batch =
                    MutationBatch::single(mutation.clone(), Arc::clone(before), Arc::clone(after));
                batch.description = description;
                self.open_batch = Some(OpenBatch::Building(batch));
                self.redo_stack.clear();
            }
            Some(OpenBatch::Building(mut batch)) => {
                batch.mutations.push(mutation.clone());
                batch.after = Arc::clone(after);
                self.open_batch = Some(OpenBatch::Building(batch));
            }
            None => {
                let batch =
                    MutationBatch::single(mutation.clone(), Arc::clone(before), Arc::clone(after));
                self.push_batch(batch);
            }
        }
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.end_batch();
        self.open_batch = Some(OpenBatch::Empty { description: None });
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(OpenBatch::Building(batch)) = self.open_batch.take() {
            self.push_batch(batch);
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        match &mut self.open_batch {
            Some(OpenBatch::Empty { description: d }) => *d = Some(description.into()),
            Some(OpenBatch::Building(batch)) => batch.description = Some(description.into()),
            None => {}
        }
    }

    pub fn is_batching(&self) -> bool {
        self.open_batch.is_some()
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Undo the most recent batch, returning the root to restore.
    ///
    /// An open batch is closed first so it becomes the step being undone.
    /// With nothing to undo the open batch is left as it is.
    pub fn undo(&mut self) -> Option<Arc<Node>> {
        if !self.can_undo() {
            return None;
        }
        self.end_batch();
        let batch = self.undo_stack.pop()?;
        let before = Arc::clone(&batch.before);
        self.redo_stack.push(batch);
        Some(before)
    }

    /// Redo the most recently undone batch, returning the root to restore
    pub fn redo(&mut self) -> Option<Arc<Node>> {
        if !self.can_redo() {
            return None;
        }
        self.end_batch();
        let batch = self.redo_stack.pop()?;
        let after = Arc::clone(&batch.after);
        self.undo_stack.push(batch);
        Some(after)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || matches!(self.open_batch, Some(OpenBatch::Building(_)))
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of closed undo levels
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
