use std::path::Path;

use mindplan_model::ScaleRange;
use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Editor settings shared by documents and sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Allowed image scale factors
    #[serde(default)]
    pub scale_range: ScaleRange,

    /// Label given to freshly inserted children
    #[serde(default = "default_new_node_label")]
    pub new_node_label: String,

    /// Background color of new annotations
    #[serde(default = "default_annotation_color")]
    pub annotation_color: String,

    /// Palette tokens used when a node has no color of its own, by depth
    #[serde(default = "default_depth_palette")]
    pub depth_palette: Vec<String>,

    /// Maximum undo levels (0 = unlimited)
    #[serde(default = "default_undo_levels")]
    pub undo_levels: usize,
}

fn default_new_node_label() -> String {
    "New topic".to_string()
}

fn default_annotation_color() -> String {
    "#FFF9C4".to_string()
}

fn default_depth_palette() -> Vec<String> {
    ["root", "primary", "secondary", "tertiary"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_undo_levels() -> usize {
    100
}

impl EditorConfig {
    /// Load config from a JSON file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scale_range: ScaleRange::default(),
            new_node_label: default_new_node_label(),
            annotation_color: default_annotation_color(),
            depth_palette: default_depth_palette(),
            undo_levels: default_undo_levels(),
        }
    }
}
