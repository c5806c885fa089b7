use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sticky-note attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: String,
    pub content: String,
    pub background_color: String,
    pub created_at: DateTime<Utc>,
}

impl Annotation {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<String>,
        background_color: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            background_color: background_color.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wire_names() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let note = Annotation::new("c1", "remember", "#FFF9C4", created);
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["backgroundColor"], "#FFF9C4");
        assert_eq!(json["createdAt"], "2024-03-01T09:30:00Z");

        let back: Annotation = serde_json::from_value(json).unwrap();
        assert_eq!(back.created_at, created);
    }
}
