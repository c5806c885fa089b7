use std::path::{Path, PathBuf};

use mindplan_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "mindplan.config.json";

/// mindplan configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Outline file the commands operate on
    #[serde(default = "default_document")]
    pub document: String,

    /// Editor settings, stored at the top level of the file
    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_document() -> String {
    "mindplan.json".to_string()
}

impl Config {
    /// Load config from `explicit`, or from the default name in `cwd`
    pub fn load(cwd: &str, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match explicit {
            Some(path) => PathBuf::from(cwd).join(path),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        };

        if config_path.exists() {
            debug!(path = %config_path.display(), "Loading config");
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else if explicit.is_some() {
            Err(anyhow::anyhow!("Config file not found: {}", config_path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path of the outline file
    pub fn get_document_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.document)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document: default_document(),
            editor: EditorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "document": "thesis.json",
            "newNodeLabel": "Idea",
            "annotationColor": "#E1F5FE",
            "scaleRange": { "min": 0.25, "max": 4.0 }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.document, "thesis.json");
        assert_eq!(config.editor.new_node_label, "Idea");
        assert_eq!(config.editor.annotation_color, "#E1F5FE");
        assert_eq!(config.editor.scale_range.max, 4.0);
        assert_eq!(config.editor.undo_levels, 100);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.document, "mindplan.json");
        assert_eq!(config.editor.new_node_label, "New topic");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        assert!(Config::load(&cwd, None).is_ok());
        assert!(Config::load(&cwd, Some(Path::new("other.json"))).is_err());
    }
}
