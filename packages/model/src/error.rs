use thiserror::Error;

/// Violations of whole-tree invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Node has an empty id (label: {label:?})")]
    EmptyId { label: String },

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
