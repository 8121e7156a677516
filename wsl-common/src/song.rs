//! Song records and the request bodies that create or change them

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A song in one leader's list
///
/// `id` is assigned by the store on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: Uuid,
    pub title: String,
    /// Musical key label, e.g. "G" or "D"
    pub key: String,
}

/// Body of a create request
///
/// Missing fields become empty strings; nothing else is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub key: String,
}

impl SongDraft {
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
        }
    }
}

/// Body of an update request
///
/// Only fields present in the body replace the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<SongDraft> for SongPatch {
    fn from(draft: SongDraft) -> Self {
        Self {
            title: Some(draft.title),
            key: Some(draft.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults_missing_fields() {
        let draft: SongDraft = serde_json::from_str(r#"{"title": "Oceans"}"#).unwrap();
        assert_eq!(draft, SongDraft::new("Oceans", ""));
    }

    #[test]
    fn test_draft_rejects_wrong_types() {
        assert!(serde_json::from_str::<SongDraft>(r#"{"title": 42}"#).is_err());
    }

    #[test]
    fn test_patch_keeps_absent_fields_unset() {
        let patch: SongPatch = serde_json::from_str(r#"{"key": "E"}"#).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.key.as_deref(), Some("E"));
    }

    #[test]
    fn test_song_json_shape() {
        let id = Uuid::new_v4();
        let song = Song {
            id,
            title: "Oceans".to_string(),
            key: "D".to_string(),
        };
        let value = serde_json::to_value(&song).unwrap();
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["title"], "Oceans");
        assert_eq!(value["key"], "D");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
