//! Package assembly
//!
//! Turns validated notes plus their resolved audio into the final apkg
//! bytes. Everything is staged in one request-scoped temporary directory
//! (media files, the collection database, and the packaged output), which
//! is removed when assembly returns, on success and on every error path
//! alike (RAII drop of the [`TempDir`]).
//!
//! Assembly is synchronous (SQLite and zip writing) and therefore runs on
//! the blocking thread pool; concurrent requests each get their own
//! staging directory and never share state.

pub mod archive;
pub mod collection;

use crate::error::{Error, Result};
use crate::sanitize::safe_name;
use collection::NoteRow;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::debug;

/// One note ready for packaging: trimmed fields plus resolved audio, if any.
#[derive(Debug, Clone)]
pub struct PackagedNote {
    /// Trimmed front text
    pub front: String,
    /// Trimmed back HTML
    pub back: String,
    /// Resolved audio bytes; `None` means the card ships without audio
    pub audio: Option<Vec<u8>>,
}

/// Build the apkg bytes for one request.
///
/// Runs [`assemble`] on the blocking thread pool so collection and archive
/// writing cannot stall the async runtime.
pub async fn build_package(
    deck_name: String,
    notes: Vec<PackagedNote>,
    embed_player: bool,
) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || assemble(&deck_name, notes, embed_player))
        .await
        .map_err(|e| Error::Other(format!("package assembly task failed: {e}")))?
}

/// Stage media, write the collection, zip the container, read it back.
fn assemble(deck_name: &str, notes: Vec<PackagedNote>, embed_player: bool) -> Result<Vec<u8>> {
    let staging = TempDir::new()?;
    let mut media_files: Vec<(String, PathBuf)> = Vec::new();
    let mut rows: Vec<NoteRow> = Vec::with_capacity(notes.len());

    for note in notes {
        let mut back = note.back;
        if let Some(bytes) = note.audio {
            let file_name = format!("{}.mp3", safe_name(&note.front, ""));
            let path = staging.path().join(&file_name);
            std::fs::write(&path, &bytes)?;
            if embed_player {
                back.push_str(&format!(
                    "<div style=\"margin-top:8px;\"><audio controls src=\"{file_name}\"></audio></div>"
                ));
            }
            media_files.push((file_name, path));
        }
        rows.push(NoteRow {
            front: note.front,
            back,
        });
    }

    let collection_path = staging.path().join("collection.anki2");
    collection::write_collection(&collection_path, deck_name, &rows)?;

    let out_path = staging.path().join("out.apkg");
    archive::write_archive(&out_path, &collection_path, &media_files)?;

    let bytes = std::fs::read(&out_path)?;
    debug!(
        deck_name,
        notes = rows.len(),
        media = media_files.len(),
        size = bytes.len(),
        "assembled package"
    );
    Ok(bytes)
    // `staging` drops here: media, collection, and output file are removed
    // regardless of which step produced the returned value or error.
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident;
    use rusqlite::Connection;
    use std::io::Read;
    use zip::ZipArchive;

    fn plain_note(front: &str, back: &str) -> PackagedNote {
        PackagedNote {
            front: front.into(),
            back: back.into(),
            audio: None,
        }
    }

    /// Unzip `collection.anki2` out of apkg bytes and open it.
    fn open_collection(apkg: &[u8]) -> (tempfile::TempDir, Connection) {
        let mut archive = ZipArchive::new(std::io::Cursor::new(apkg)).unwrap();
        let mut body = Vec::new();
        archive
            .by_name("collection.anki2")
            .unwrap()
            .read_to_end(&mut body)
            .unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("collection.anki2");
        std::fs::write(&path, &body).unwrap();
        (dir, Connection::open(&path).unwrap())
    }

    #[test]
    fn minimal_package_is_a_readable_zip() {
        let bytes = assemble("Deck", vec![plain_note("Hello", "world")], false).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..2], b"PK");

        let mut archive = ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();
        assert!(archive.by_name("collection.anki2").is_ok());
    }

    #[test]
    fn note_without_audio_produces_no_media_entries() {
        let bytes = assemble("Deck", vec![plain_note("Hello", "world")], false).unwrap();
        let mut archive = ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();

        let mut manifest = String::new();
        archive
            .by_name("media")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert_eq!(manifest, "{}");
        assert!(archive.by_name("0").is_err());
    }

    #[test]
    fn resolved_audio_is_staged_under_sanitized_front_name() {
        let note = PackagedNote {
            front: "Hello world!".into(),
            back: "back".into(),
            audio: Some(b"fake mp3".to_vec()),
        };
        let bytes = assemble("Deck", vec![note], false).unwrap();
        let mut archive = ZipArchive::new(std::io::Cursor::new(&bytes)).unwrap();

        let mut manifest = String::new();
        archive
            .by_name("media")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest["0"], "Hello_world_.mp3");

        let mut body = Vec::new();
        archive.by_name("0").unwrap().read_to_end(&mut body).unwrap();
        assert_eq!(body, b"fake mp3");
    }

    #[test]
    fn player_is_not_embedded_by_default() {
        let note = PackagedNote {
            front: "Hello".into(),
            back: "back".into(),
            audio: Some(b"mp3".to_vec()),
        };
        let bytes = assemble("Deck", vec![note], false).unwrap();
        let (_dir, conn) = open_collection(&bytes);

        let flds: String = conn
            .query_row("SELECT flds FROM notes", [], |row| row.get(0))
            .unwrap();
        assert!(!flds.contains("<audio"));
    }

    #[test]
    fn embed_player_appends_audio_element_to_back() {
        let note = PackagedNote {
            front: "Hello".into(),
            back: "back".into(),
            audio: Some(b"mp3".to_vec()),
        };
        let bytes = assemble("Deck", vec![note], true).unwrap();
        let (_dir, conn) = open_collection(&bytes);

        let flds: String = conn
            .query_row("SELECT flds FROM notes", [], |row| row.get(0))
            .unwrap();
        assert!(flds.contains("<audio controls src=\"Hello.mp3\">"));
    }

    #[test]
    fn embed_player_without_audio_leaves_back_untouched() {
        let bytes = assemble("Deck", vec![plain_note("Hello", "back")], true).unwrap();
        let (_dir, conn) = open_collection(&bytes);

        let flds: String = conn
            .query_row("SELECT flds FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(flds, "Hello\u{1f}back");
    }

    #[test]
    fn notes_are_packaged_in_request_order() {
        let notes = vec![
            plain_note("first", "1"),
            plain_note("second", "2"),
            plain_note("third", "3"),
        ];
        let bytes = assemble("Deck", notes, false).unwrap();
        let (_dir, conn) = open_collection(&bytes);

        let mut stmt = conn
            .prepare("SELECT sfld FROM notes ORDER BY id")
            .unwrap();
        let fronts: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(fronts, vec!["first", "second", "third"]);
    }

    #[test]
    fn deck_id_in_collection_matches_derivation() {
        let bytes = assemble("My::Deck", vec![plain_note("a", "b")], false).unwrap();
        let (_dir, conn) = open_collection(&bytes);

        let did: i64 = conn
            .query_row("SELECT did FROM cards", [], |row| row.get(0))
            .unwrap();
        assert_eq!(did, ident::derive_id("My::Deck"));
    }

    #[tokio::test]
    async fn build_package_runs_assembly_off_the_async_runtime() {
        let bytes = build_package("Deck".into(), vec![plain_note("a", "b")], false)
            .await
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
