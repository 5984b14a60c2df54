//! apkg-maker service binary
//!
//! Maps CLI flags onto the service [`Config`] and runs the API server
//! until a termination signal arrives.

use apkg_maker::{Config, api};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Serve the apkg-maker HTTP API
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Enable permissive CORS for browser access
    #[arg(long)]
    cors: bool,

    /// Per-fetch timeout for audio URL downloads, in seconds
    #[arg(long, default_value_t = 15)]
    fetch_timeout: u64,

    /// Append an audio player to the answer side of notes with audio
    #[arg(long)]
    embed_audio_player: bool,

    /// Increase log verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> apkg_maker::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("apkg_maker={level}"))),
        )
        .init();

    let mut config = Config::default();
    config.server.bind_address = args.bind;
    config.server.cors_enabled = args.cors;
    config.media.fetch_timeout_secs = args.fetch_timeout;
    config.deck.embed_audio_player = args.embed_audio_player;

    api::start_api_server(Arc::new(config)).await
}
