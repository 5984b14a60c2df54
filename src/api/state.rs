//! Application state for the API server

use crate::config::Config;
use crate::error::Result;
use crate::media::MediaFetcher;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc/Client clones). No
/// field is mutable; requests share nothing beyond configuration and the
/// HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,

    /// Audio resolver, holding the shared HTTP client
    pub fetcher: MediaFetcher,
}

impl AppState {
    /// Create a new AppState, building the HTTP client from the configured
    /// fetch timeout.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let fetcher = MediaFetcher::new(config.media.fetch_timeout())?;
        Ok(Self { config, fetcher })
    }
}
