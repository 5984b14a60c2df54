//! # apkg-maker
//!
//! Stateless HTTP service that converts flashcard notes into downloadable
//! Anki `.apkg` packages.
//!
//! ## Pipeline
//!
//! One request flows through four steps:
//! 1. **Validate** — the note list must be non-empty and every note needs a
//!    non-blank `front` and `backHtml`; a single bad note rejects the whole
//!    request.
//! 2. **Resolve assets** — each note's audio comes from its inline base64
//!    payload if it decodes, else from an HTTP fetch of its URL, else the
//!    card ships without audio. Failures here never fail the request.
//! 3. **Assemble** — one deck, the shared "Basic (HTML)" notetype, one
//!    note + card per flashcard, and staged media files are serialized into
//!    the apkg container. Deck and notetype ids are derived from their
//!    names, so re-imports merge instead of duplicating.
//! 4. **Respond** — the bytes stream back with an attachment filename
//!    derived from the front text (single note) or the deck name
//!    (multiple notes).
//!
//! ## Quick Start
//!
//! ```no_run
//! use apkg_maker::{Config, api};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> apkg_maker::Result<()> {
//!     let config = Arc::new(Config::default());
//!     api::start_api_server(config).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Deterministic identifier derivation
pub mod ident;
/// Audio asset resolution
pub mod media;
/// Package assembly (collection database + apkg container)
pub mod package;
/// Filename sanitizing
pub mod sanitize;
/// Wire types
pub mod types;

// Re-export commonly used types
pub use config::{Config, DeckConfig, MediaConfig, ServerConfig};
pub use error::{Error, Result};
pub use media::MediaFetcher;
pub use package::PackagedNote;
pub use types::{DeckRequest, NoteInput};
