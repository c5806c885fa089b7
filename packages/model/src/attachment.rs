use serde::{Deserialize, Serialize};

/// Where an image sits relative to the node label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl std::str::FromStr for ImagePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(ImagePosition::Top),
            "bottom" => Ok(ImagePosition::Bottom),
            "left" => Ok(ImagePosition::Left),
            "right" => Ok(ImagePosition::Right),
            other => Err(format!("unknown image position: {}", other)),
        }
    }
}

/// Inclusive bounds for an image scale factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `scale` into the range. NaN maps to `min`.
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.max(self.min).min(self.max)
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.5, max: 2.5 }
    }
}

/// Image reference plus layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Location returned by blob storage
    pub url: String,
    pub position: ImagePosition,
    pub scale: f64,
}

impl Attachment {
    pub const DEFAULT_SCALE: f64 = 1.0;

    pub fn new(
        url: impl Into<String>,
        position: ImagePosition,
        scale: f64,
        range: ScaleRange,
    ) -> Self {
        Self {
            url: url.into(),
            position,
            scale: range.clamp(scale),
        }
    }
}
