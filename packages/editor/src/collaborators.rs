//! # External Collaborators
//!
//! Contracts for the services that feed the editor from outside:
//!
//! - **Blob storage** turns image bytes into a URL
//! - **Content generation** turns uploaded files into outline content
//!
//! Their results enter the document as ordinary mutations once they arrive.
//! A failing collaborator never touches the tree.

use mindplan_model::{collect_ids, Attachment, CandidateNode, IDGenerator, ImagePosition, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{Document, EditorError, Mutation};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Generator returned no content")]
    Empty,

    #[error("Generator failed: {0}")]
    Service(String),
}

/// Stores binary payloads and hands back a retrievable URL
pub trait BlobStorage {
    fn upload(&self, payload: &[u8], folder: &str) -> Result<String, UploadError>;
}

/// A file handed to the content generator
#[derive(Debug, Clone, PartialEq)]
pub struct FilePayload {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// What the generator produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Generated {
    QuestionAnswers(Vec<QaPair>),
    Tree(CandidateNode),
}

pub trait ContentGenerator {
    fn generate(&self, files: &[FilePayload]) -> Result<Generated, GenerationError>;
}

/// Turn a candidate tree into a node tree with fresh ids on every node
pub fn normalize_candidate(candidate: &CandidateNode, ids: &mut IDGenerator) -> Node {
    let mut node = Node::new(ids.new_id(), candidate.label.clone());
    for child in &candidate.children {
        node.children.push(std::sync::Arc::new(normalize_candidate(child, ids)));
    }
    node
}

/// One node per question, each holding its answer as the single child
pub fn question_answer_tree(title: &str, pairs: &[QaPair]) -> CandidateNode {
    pairs.iter().fold(CandidateNode::new(title), |tree, pair| {
        let answer = CandidateNode::new(pair.answer.clone());
        tree.with_child(CandidateNode::new(pair.question.clone()).with_child(answer))
    })
}

impl Document {
    /// Upload an image and attach it to `node_id`.
    ///
    /// Returns the URL, or `None` when the node does not exist (nothing is
    /// uploaded then).
    pub fn attach_uploaded_image(
        &mut self,
        storage: &dyn BlobStorage,
        node_id: &str,
        payload: &[u8],
        folder: &str,
        position: ImagePosition,
        scale: f64,
    ) -> Result<Option<String>, EditorError> {
        if self.locate(node_id).is_none() {
            return Ok(None);
        }

        let url = storage.upload(payload, folder).map_err(|e| {
            warn!(node_id, folder, error = %e, "Image upload failed");
            e
        })?;

        let image = Attachment::new(url.clone(), position, scale, self.config().scale_range);
        self.apply(Mutation::SetImage {
            node_id: node_id.to_string(),
            image,
        })?;
        Ok(Some(url))
    }

    /// Run the generator and graft its output under `parent_id`.
    ///
    /// Returns the id of the imported subtree root, or `None` when the parent
    /// does not exist.
    pub fn import_generated(
        &mut self,
        generator: &dyn ContentGenerator,
        parent_id: &str,
        files: &[FilePayload],
    ) -> Result<Option<String>, EditorError> {
        if self.locate(parent_id).is_none() {
            return Ok(None);
        }

        let candidate = match generator.generate(files)? {
            Generated::Tree(tree) => tree,
            Generated::QuestionAnswers(pairs) if pairs.is_empty() => {
                return Err(GenerationError::Empty.into());
            }
            Generated::QuestionAnswers(pairs) => {
                let title = files.first().map(|f| f.name.as_str()).unwrap_or("Questions");
                question_answer_tree(title, &pairs)
            }
        };

        let mut ids = IDGenerator::from_seed(self.new_id());
        ids.reserve(collect_ids(self.root()));
        let node = normalize_candidate(&candidate, &mut ids);
        let imported_id = node.id.clone();
        let count = node.subtree_size();

        self.apply(Mutation::InsertSubtree {
            parent_id: parent_id.to_string(),
            node,
        })?;
        info!(parent_id, nodes = count, "Imported generated content");
        Ok(Some(imported_id))
    }
}
