//! Configuration types for apkg-maker
//!
//! Everything has a sensible default; a `Config::default()` service behaves
//! exactly as documented in the API description. There is no file or
//! environment loading; the binary maps its CLI flags onto these fields.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// HTTP server configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: false)
    #[serde(default)]
    pub cors_enabled: bool,

    /// Allowed CORS origins ("*" = any, default)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: false,
            cors_origins: default_cors_origins(),
        }
    }
}

/// Deck generation configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Deck name used when a request does not provide one
    /// (default: "English::Telegram")
    #[serde(default = "default_deck_name")]
    pub default_deck_name: String,

    /// Append an `<audio controls>` element to the answer side of notes
    /// whose audio resolved (default: false)
    #[serde(default)]
    pub embed_audio_player: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            default_deck_name: default_deck_name(),
            embed_audio_player: false,
        }
    }
}

/// Audio fetching configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Per-fetch timeout in seconds for `audioUrl` downloads (default: 15)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl MediaConfig {
    /// Per-fetch timeout as a [`Duration`]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// Top-level service configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Deck generation settings
    #[serde(default)]
    pub deck: DeckConfig,

    /// Audio fetching settings
    #[serde(default)]
    pub media: MediaConfig,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_deck_name() -> String {
    "English::Telegram".into()
}

fn default_fetch_timeout_secs() -> u64 {
    15
}
