use serde::{Deserialize, Serialize};

/// Node color: a palette token (`"primary"`) or a literal CSS color (`"#3366ff"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeColor {
    Palette(String),
    Literal(String),
}

const LITERAL_PREFIXES: [&str; 5] = ["#", "rgb(", "rgba(", "hsl(", "hsla("];

impl NodeColor {
    pub fn as_str(&self) -> &str {
        match self {
            NodeColor::Palette(s) | NodeColor::Literal(s) => s,
        }
    }
}

impl From<String> for NodeColor {
    fn from(value: String) -> Self {
        let lower = value.trim().to_ascii_lowercase();
        if LITERAL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            NodeColor::Literal(value)
        } else {
            NodeColor::Palette(value)
        }
    }
}

impl From<&str> for NodeColor {
    fn from(value: &str) -> Self {
        NodeColor::from(value.to_string())
    }
}

impl From<NodeColor> for String {
    fn from(color: NodeColor) -> Self {
        match color {
            NodeColor::Palette(s) | NodeColor::Literal(s) => s,
        }
    }
}

impl std::fmt::Display for NodeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color a node shows when it has none of its own.
///
/// Depth 0 is the root. Depths past the end of the palette reuse the last entry.
pub fn default_color_for_depth(depth: usize, palette: &[String]) -> Option<NodeColor> {
    let token = palette.get(depth).or_else(|| palette.last())?;
    Some(NodeColor::from(token.as_str()))
}
