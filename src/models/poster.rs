//! Poster domain types and collection status.

use serde::{Deserialize, Serialize};

/// Collection state of a poster, tracked through the status picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterStatus {
    Uncollected,
    Collected,
    Lost,
}

impl PosterStatus {
    /// All statuses, in picker order.
    pub const ALL: [PosterStatus; 3] = [Self::Uncollected, Self::Collected, Self::Lost];

    /// Wire value used in URLs, `<option value>` attributes and PATCH bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uncollected => "uncollected",
            Self::Collected => "collected",
            Self::Lost => "lost",
        }
    }

    /// Human-readable label shown in the picker and tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::Uncollected => "Uncollected",
            Self::Collected => "Collected",
            Self::Lost => "Lost",
        }
    }

    /// Parse a `<select>` value back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// A poster record tied to a festival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub status: PosterStatus,
    pub festival_id: String,
}

/// Envelope returned by `GET /festivals/{id}/posters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterListResponse {
    pub posters: Vec<Poster>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&PosterStatus::Collected).unwrap();
        assert_eq!(json, "\"collected\"");

        let parsed: PosterStatus = serde_json::from_str("\"lost\"").unwrap();
        assert_eq!(parsed, PosterStatus::Lost);
    }

    #[test]
    fn test_status_select_round_trip() {
        for status in PosterStatus::ALL {
            assert_eq!(PosterStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PosterStatus::parse("misplaced"), None);
        assert_eq!(PosterStatus::parse(""), None);
    }

    #[test]
    fn test_poster_deserialization() {
        let poster: Poster = serde_json::from_str(
            r#"{
                "id": "p1",
                "name": "Station entrance",
                "description": "North gate pillar",
                "image_url": "http://localhost:8080/api/v1/images/img1",
                "status": "uncollected",
                "festival_id": "f1"
            }"#,
        )
        .unwrap();
        assert_eq!(poster.status, PosterStatus::Uncollected);
        assert_eq!(poster.festival_id, "f1");
    }

    #[test]
    fn test_poster_optional_fields_default() {
        // Backend omits description/image_url for posters created without them.
        let poster: Poster = serde_json::from_str(
            r#"{"id": "p2", "name": "Bare", "status": "lost", "festival_id": "f1"}"#,
        )
        .unwrap();
        assert!(poster.description.is_empty());
        assert!(poster.image_url.is_empty());
    }
}
