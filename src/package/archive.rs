//! apkg container writing
//!
//! An apkg file is a zip archive with three kinds of entries: the
//! `collection.anki2` database, a `media` JSON manifest mapping archive
//! entry names to media filenames, and one numbered entry (`"0"`, `"1"`, …)
//! per media file.

use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Archive entry name of the collection database
const COLLECTION_ENTRY: &str = "collection.anki2";

/// Archive entry name of the media manifest
const MANIFEST_ENTRY: &str = "media";

/// Write the apkg container to `out_path`.
///
/// `media` pairs each staged file's manifest filename with its path in the
/// staging directory; entries are numbered by their position.
pub fn write_archive(
    out_path: &Path,
    collection_path: &Path,
    media: &[(String, PathBuf)],
) -> Result<()> {
    let file = File::create(out_path)?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default();

    writer.start_file(COLLECTION_ENTRY, options)?;
    writer.write_all(&std::fs::read(collection_path)?)?;

    let manifest: serde_json::Map<String, serde_json::Value> = media
        .iter()
        .enumerate()
        .map(|(index, (name, _))| (index.to_string(), serde_json::Value::String(name.clone())))
        .collect();
    writer.start_file(MANIFEST_ENTRY, options)?;
    writer.write_all(serde_json::to_string(&manifest)?.as_bytes())?;

    for (index, (_, path)) in media.iter().enumerate() {
        writer.start_file(index.to_string(), options)?;
        writer.write_all(&std::fs::read(path)?)?;
    }

    writer.finish()?;
    Ok(())
}
