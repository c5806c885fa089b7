//! # Mindplan Model
//!
//! Data types for the outline (mind-map) tree.
//!
//! A document is a single root [`Node`] owning an ordered list of children.
//! Children are held behind [`std::sync::Arc`] so that edits can share every
//! subtree they do not touch.
//!
//! ```text
//! Node ─┬─ label / color
//!       ├─ comments: [Annotation]
//!       ├─ image: Attachment
//!       └─ children: [Arc<Node>]
//! ```

pub mod annotation;
pub mod attachment;
pub mod candidate;
pub mod color;
pub mod error;
pub mod id_generator;
pub mod node;
pub mod validate;

pub use annotation::Annotation;
pub use attachment::{Attachment, ImagePosition, ScaleRange};
pub use candidate::CandidateNode;
pub use color::{default_color_for_depth, NodeColor};
pub use error::{ModelError, ModelResult};
pub use id_generator::{get_document_id, IDGenerator};
pub use node::{Node, NodePatch};
pub use validate::{collect_ids, depth_of, validate_tree};
