//! Error types for the editor

use thiserror::Error;

use crate::collaborators::{GenerationError, UploadError};

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] mindplan_model::ModelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Content generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
