use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Annotation, Attachment, NodeColor};

/// One topic of the outline tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique, immutable identifier
    pub id: String,

    /// Label text (may contain inline markup from the edit surface)
    #[serde(default)]
    pub label: String,

    /// Ordered children; order is the visual layout order
    #[serde(default)]
    pub children: Vec<Arc<Node>>,

    /// Explicit color; `None` inherits the depth default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<NodeColor>,

    /// Sticky-note annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Annotation>>,

    /// Single optional image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Attachment>,
}

impl Node {
    /// Create a bare node with no children, color, comments or image
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            color: None,
            comments: None,
            image: None,
        }
    }

    /// Builder-style child append, mostly useful for fixtures
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Comments, treating an absent list as empty
    pub fn comments(&self) -> &[Annotation] {
        self.comments.as_deref().unwrap_or(&[])
    }

    /// Ids of the direct children, in order
    pub fn child_ids(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.id.as_str()).collect()
    }

    /// Total number of nodes in this subtree, including self
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.subtree_size())
            .sum::<usize>()
    }

    /// Return a copy with `patch` merged in. Children are shared, not cloned.
    pub fn merged(&self, patch: &NodePatch) -> Node {
        let mut next = self.clone();
        if let Some(label) = &patch.label {
            next.label = label.clone();
        }
        if let Some(color) = &patch.color {
            next.color = color.clone();
        }
        if let Some(comments) = &patch.comments {
            next.comments = comments.clone();
        }
        if let Some(image) = &patch.image {
            next.image = image.clone();
        }
        next
    }
}

/// Partial update of a node's own fields.
///
/// Each field is `None` when untouched. For the optional node fields the inner
/// `Option` is the new value, so `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub color: Option<Option<NodeColor>>,
    pub comments: Option<Option<Vec<Annotation>>>,
    pub image: Option<Option<Attachment>>,
}

impl NodePatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn color(color: Option<NodeColor>) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn comments(comments: Vec<Annotation>) -> Self {
        Self {
            comments: Some(Some(comments)),
            ..Default::default()
        }
    }

    pub fn image(image: Option<Attachment>) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }

    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.color.is_none()
            && self.comments.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImagePosition;

    #[test]
    fn test_optional_fields_are_omitted() {
        let node = Node::new("n1", "Topic");
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["id"], "n1");
        assert_eq!(json["label"], "Topic");
        assert!(json.get("color").is_none());
        assert!(json.get("comments").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_parse_nested_document() {
        let json = r##"{
            "id": "root",
            "label": "Plan",
            "children": [
                { "id": "a", "label": "A", "color": "#ff0000", "children": [] },
                {
                    "id": "b",
                    "label": "B",
                    "image": { "url": "https://cdn/x.png", "position": "left", "scale": 1.5 }
                }
            ]
        }"##;

        let root: Node = serde_json::from_str(json).unwrap();
        assert_eq!(root.child_ids(), vec!["a", "b"]);
        assert_eq!(root.children[0].color, Some(NodeColor::Literal("#ff0000".into())));
        let image = root.children[1].image.as_ref().unwrap();
        assert_eq!(image.position, ImagePosition::Left);
        assert_eq!(root.subtree_size(), 3);
    }

    #[test]
    fn test_merge_clears_optional_field() {
        let mut node = Node::new("n", "x");
        node.color = Some(NodeColor::Palette("primary".into()));

        let next = node.merged(&NodePatch::color(None));
        assert_eq!(next.color, None);
        assert_eq!(next.label, "x");
        // Source untouched
        assert!(node.color.is_some());
    }

    #[test]
    fn test_merge_shares_children() {
        let node = Node::new("p", "parent").with_child(Node::new("c", "child"));
        let next = node.merged(&NodePatch::label("renamed"));

        assert!(Arc::ptr_eq(&node.children[0], &next.children[0]));
        assert_eq!(next.label, "renamed");
    }
}
