//! Image attachment operations.
//!
//! The image is replaced as a whole on every write. Position and scale
//! changes copy the current image and overwrite the one field; a node without
//! an image is left alone rather than given a made-up default.

use std::sync::Arc;

use mindplan_model::{Attachment, ImagePosition, Node, NodePatch, ScaleRange};

use crate::engine;

pub fn set_image(
    root: &Arc<Node>,
    node_id: &str,
    image: Attachment,
    range: ScaleRange,
) -> Arc<Node> {
    let image = Attachment {
        scale: range.clamp(image.scale),
        ..image
    };
    engine::patch(root, node_id, &NodePatch::image(Some(image)))
}

pub fn set_image_position(root: &Arc<Node>, node_id: &str, position: ImagePosition) -> Arc<Node> {
    modify_image(root, node_id, |image| image.position = position)
}

pub fn set_image_scale(
    root: &Arc<Node>,
    node_id: &str,
    scale: f64,
    range: ScaleRange,
) -> Arc<Node> {
    modify_image(root, node_id, |image| image.scale = range.clamp(scale))
}

/// Clear the image field (absent, not an empty placeholder)
pub fn remove_image(root: &Arc<Node>, node_id: &str) -> Arc<Node> {
    match engine::locate(root, node_id) {
        Some(node) if node.image.is_some() => engine::patch(root, node_id, &NodePatch::image(None)),
        _ => Arc::clone(root),
    }
}

fn modify_image<F>(root: &Arc<Node>, node_id: &str, f: F) -> Arc<Node>
where
    F: FnOnce(&mut Attachment),
{
    let Some(mut image) = engine::locate(root, node_id).and_then(|node| node.image.clone()) else {
        return Arc::clone(root);
    };
    f(&mut image);
    engine::patch(root, node_id, &NodePatch::image(Some(image)))
}
