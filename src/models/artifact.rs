//! Artifact model representing a single field note on the canvas.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days a revisit keeps an artifact marked as active.
pub const ACTIVE_WINDOW_DAYS: i64 = 14;

/// Category of an artifact, used to pick its visual style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactType {
    System,
    Framework,
    Note,
    Observation,
    /// Any category the canvas has no dedicated style for.
    Other(String),
}

impl ArtifactType {
    /// Returns the wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            ArtifactType::System => "System",
            ArtifactType::Framework => "Framework",
            ArtifactType::Note => "Note",
            ArtifactType::Observation => "Observation",
            ArtifactType::Other(name) => name,
        }
    }

    /// Returns the card style for this type.
    pub fn style(&self) -> ArtifactStyle {
        match self {
            ArtifactType::Note | ArtifactType::Observation => ArtifactStyle::Sticky,
            ArtifactType::System | ArtifactType::Framework => ArtifactStyle::Card,
            ArtifactType::Other(_) => ArtifactStyle::Plain,
        }
    }
}

impl From<String> for ArtifactType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "System" => ArtifactType::System,
            "Framework" => ArtifactType::Framework,
            "Note" => ArtifactType::Note,
            "Observation" => ArtifactType::Observation,
            _ => ArtifactType::Other(value),
        }
    }
}

impl From<ArtifactType> for String {
    fn from(value: ArtifactType) -> Self {
        value.as_str().to_string()
    }
}

/// Visual treatment of an artifact card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactStyle {
    /// Sticky note (notes and observations).
    Sticky,
    /// Index card (systems and frameworks).
    Card,
    /// Untyped or unknown category.
    Plain,
}

/// A field note rendered as a draggable unit on the canvas.
///
/// Artifacts are immutable once loaded for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category used for styling.
    #[serde(rename = "type")]
    pub kind: ArtifactType,
    /// Ordered focus tags. The first tag decides the artifact's cluster.
    #[serde(default)]
    pub focus: Vec<String>,
    /// Editorial status (e.g. "Working", "Draft").
    #[serde(default)]
    pub status: String,
    /// Creation date as an ISO-8601 string.
    pub created: String,
    /// Date the note was last revisited, if ever.
    #[serde(default)]
    pub revisited: Option<String>,
    /// Optional thumbnail reference.
    #[serde(default)]
    pub media: Option<String>,
    /// Navigation target opened on click.
    #[serde(default)]
    pub url: String,
}

impl Artifact {
    /// The tag this artifact clusters under. An empty first tag counts as none.
    pub fn primary_tag(&self) -> Option<&str> {
        self.focus
            .first()
            .map(String::as_str)
            .filter(|tag| !tag.is_empty())
    }

    /// Parsed creation date. `None` when the string is not a recognizable date.
    pub fn created_date(&self) -> Option<NaiveDate> {
        parse_date(&self.created)
    }

    /// Parsed revisit date.
    pub fn revisited_date(&self) -> Option<NaiveDate> {
        self.revisited.as_deref().and_then(parse_date)
    }

    /// Card style derived from the artifact type.
    pub fn style(&self) -> ArtifactStyle {
        self.kind.style()
    }

    /// Whether the note was revisited within the active window before `today`.
    pub fn is_recently_active(&self, today: NaiveDate) -> bool {
        self.revisited_date()
            .map(|date| (today - date).num_days() < ACTIVE_WINDOW_DAYS)
            .unwrap_or(false)
    }
}

/// Response envelope of the field-notes endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldNotes {
    pub entries: Vec<Artifact>,
}

/// Parse either a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(kind: &str, revisited: Option<&str>) -> Artifact {
        Artifact {
            id: "a".to_string(),
            title: "A".to_string(),
            kind: ArtifactType::from(kind.to_string()),
            focus: vec!["Design".to_string()],
            status: "Working".to_string(),
            created: "2024-11-15".to_string(),
            revisited: revisited.map(str::to_string),
            media: None,
            url: "#".to_string(),
        }
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "id": "note-1",
            "title": "Color Theory Notes",
            "type": "Note",
            "focus": ["Design", "Color"],
            "status": "Draft",
            "created": "2024-09-10",
            "revisited": null,
            "media": null,
            "url": "/notes/color"
        }"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind, ArtifactType::Note);
        assert_eq!(artifact.primary_tag(), Some("Design"));
        assert_eq!(artifact.style(), ArtifactStyle::Sticky);
        assert!(artifact.revisited.is_none());
    }

    #[test]
    fn test_unknown_type_round_trips_name() {
        let a = artifact("Sketch", None);
        assert_eq!(a.kind, ArtifactType::Other("Sketch".to_string()));
        assert_eq!(a.style(), ArtifactStyle::Plain);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"type\":\"Sketch\""));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": "x", "title": "X", "type": "System", "created": "2024-01-01"}"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();
        assert!(artifact.focus.is_empty());
        assert_eq!(artifact.primary_tag(), None);
        assert_eq!(artifact.style(), ArtifactStyle::Card);
    }

    #[test]
    fn test_empty_first_tag_is_no_primary_tag() {
        let json = r#"{"id": "x", "title": "X", "type": "Note", "focus": ["", "Design"], "created": "2024-01-01"}"#;
        let artifact: Artifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.primary_tag(), None);
    }

    #[test]
    fn test_parse_dates() {
        assert_eq!(
            parse_date("2024-11-15"),
            NaiveDate::from_ymd_opt(2024, 11, 15)
        );
        assert_eq!(
            parse_date("2025-01-25T10:30:00Z"),
            NaiveDate::from_ymd_opt(2025, 1, 25)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_recently_active() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        assert!(artifact("Note", Some("2025-01-25")).is_recently_active(today));
        assert!(!artifact("Note", Some("2024-12-01")).is_recently_active(today));
        assert!(!artifact("Note", None).is_recently_active(today));
    }
}
