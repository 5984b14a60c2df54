//! Audio asset resolution
//!
//! A note's audio comes from an ordered sequence of capability checks:
//! inline base64 payload first, HTTP fetch second, no asset third. Every
//! failure along the way is absorbed and the card is still produced, just
//! without audio. Only client *construction* can fail; resolution itself
//! never does.

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::time::Duration;

/// Resolves per-note audio bytes.
///
/// Cheap to clone; the inner `reqwest::Client` is reference-counted and is
/// built once with the configured per-fetch timeout.
#[derive(Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
}

impl MediaFetcher {
    /// Create a fetcher whose HTTP GETs time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Resolve audio bytes for one note.
    ///
    /// Policy, in order:
    /// 1. `audio_base64` present → decode; a non-empty payload wins and the
    ///    URL is never contacted. Decode failure (or an empty payload) falls
    ///    through.
    /// 2. `audio_url` present → GET with the client timeout; any transport
    ///    error or non-success status yields nothing.
    /// 3. Otherwise the note has no audio. Not an error.
    pub async fn resolve(
        &self,
        audio_base64: Option<&str>,
        audio_url: Option<&str>,
    ) -> Option<Vec<u8>> {
        if let Some(payload) = audio_base64.filter(|p| !p.is_empty()) {
            match BASE64.decode(payload.trim()) {
                Ok(bytes) if !bytes.is_empty() => return Some(bytes),
                Ok(_) => {
                    tracing::debug!("inline audio payload decoded to zero bytes, trying URL");
                }
                Err(error) => {
                    tracing::debug!(%error, "inline audio payload is not valid base64, trying URL");
                }
            }
        }

        if let Some(url) = audio_url.filter(|u| !u.is_empty()) {
            match self.fetch(url).await {
                Ok(bytes) => return Some(bytes),
                Err(error) => {
                    tracing::warn!(url, %error, "audio fetch failed, producing card without audio");
                }
            }
        }

        None
    }

    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
