//! Wire types for apkg-maker
//!
//! Request bodies use camelCase field names; the serde renames keep the
//! Rust side idiomatic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One flashcard note as submitted by the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    /// Front side text (required, must be non-blank)
    pub front: String,

    /// Back side HTML (required, must be non-blank)
    pub back_html: String,

    /// URL to fetch the note's audio from, tried after `audioBase64`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Inline base64-encoded audio payload, tried first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
}

impl NoteInput {
    /// Trimmed `(front, back)` field pair.
    ///
    /// Rejects the note when either field is blank after trimming; the
    /// message is the documented client-error body.
    pub fn trimmed_fields(&self) -> Result<(String, String)> {
        let front = self.front.trim();
        let back = self.back_html.trim();
        if front.is_empty() || back.is_empty() {
            return Err(Error::Validation("front and backHtml are required".into()));
        }
        Ok((front.to_string(), back.to_string()))
    }
}

/// Request body for `POST /apkg`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeckRequest {
    /// Deck name; the service default is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_name: Option<String>,

    /// Notes to package, in order (min 1)
    pub notes: Vec<NoteInput>,
}

impl DeckRequest {
    /// Validate the whole request up front, before any asset resolution.
    ///
    /// Returns the trimmed `(front, back)` pairs in request order. A single
    /// invalid note rejects the entire request; nothing partial is built.
    pub fn validated_fields(&self) -> Result<Vec<(String, String)>> {
        if self.notes.is_empty() {
            return Err(Error::Validation("at least one note is required".into()));
        }
        self.notes.iter().map(NoteInput::trimmed_fields).collect()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn note(front: &str, back: &str) -> NoteInput {
        NoteInput {
            front: front.into(),
            back_html: back.into(),
            audio_url: None,
            audio_base64: None,
        }
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "deckName": "My::Deck",
            "notes": [
                {"front": "Hello", "backHtml": "<b>world</b>", "audioUrl": "http://x/y.mp3"}
            ]
        }"#;
        let request: DeckRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.deck_name.as_deref(), Some("My::Deck"));
        assert_eq!(request.notes[0].back_html, "<b>world</b>");
        assert_eq!(request.notes[0].audio_url.as_deref(), Some("http://x/y.mp3"));
        assert!(request.notes[0].audio_base64.is_none());
    }

    #[test]
    fn deck_name_is_optional() {
        let json = r#"{"notes": [{"front": "a", "backHtml": "b"}]}"#;
        let request: DeckRequest = serde_json::from_str(json).unwrap();
        assert!(request.deck_name.is_none());
    }

    #[test]
    fn trimming_is_applied_to_both_fields() {
        let (front, back) = note("  Hello  ", "\n<b>hi</b>\t").trimmed_fields().unwrap();
        assert_eq!(front, "Hello");
        assert_eq!(back, "<b>hi</b>");
    }

    #[test]
    fn blank_front_is_rejected() {
        let err = note("   ", "back").trimmed_fields().unwrap_err();
        assert_eq!(err.to_string(), "front and backHtml are required");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn blank_back_is_rejected() {
        assert!(note("front", "").trimmed_fields().is_err());
    }

    #[test]
    fn empty_note_list_is_rejected() {
        let request = DeckRequest {
            deck_name: None,
            notes: vec![],
        };
        let err = request.validated_fields().unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "at least one note is required");
    }

    #[test]
    fn one_bad_note_rejects_the_whole_request() {
        let request = DeckRequest {
            deck_name: None,
            notes: vec![note("ok", "ok"), note("", "back"), note("ok2", "ok2")],
        };
        assert!(request.validated_fields().is_err());
    }

    #[test]
    fn valid_request_yields_pairs_in_order() {
        let request = DeckRequest {
            deck_name: Some("D".into()),
            notes: vec![note("one", "1"), note("two", "2")],
        };
        let fields = request.validated_fields().unwrap();
        assert_eq!(fields, vec![("one".into(), "1".into()), ("two".into(), "2".into())]);
    }
}
