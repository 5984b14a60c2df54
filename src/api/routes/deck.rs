//! Package generation handler.

use crate::api::AppState;
use crate::error::{Error, Result};
use crate::package::{self, PackagedNote};
use crate::sanitize::safe_name;
use crate::types::DeckRequest;
use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tracing::info;

/// POST /apkg - Convert notes into a downloadable apkg package
///
/// Validation failures reject the whole request with a 400; a note whose
/// audio cannot be resolved still produces a card, just without audio.
#[utoipa::path(
    post,
    path = "/apkg",
    tag = "deck",
    request_body = DeckRequest,
    responses(
        (status = 200, description = "Generated package bytes", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid request input"),
        (status = 500, description = "Package assembly failed")
    )
)]
pub async fn make_package(
    State(state): State<AppState>,
    Json(request): Json<DeckRequest>,
) -> Result<Response> {
    // The whole request is validated before any asset fetch happens.
    let fields = request.validated_fields()?;
    let deck_name = request
        .deck_name
        .clone()
        .unwrap_or_else(|| state.config.deck.default_deck_name.clone());

    // Asset resolution is strictly sequential, in request order.
    let mut notes = Vec::with_capacity(fields.len());
    for ((front, back), input) in fields.into_iter().zip(&request.notes) {
        let audio = state
            .fetcher
            .resolve(input.audio_base64.as_deref(), input.audio_url.as_deref())
            .await;
        notes.push(PackagedNote { front, back, audio });
    }

    let single_front = match notes.as_slice() {
        [only] => Some(only.front.clone()),
        _ => None,
    };

    let bytes = package::build_package(
        deck_name.clone(),
        notes,
        state.config.deck.embed_audio_player,
    )
    .await?;

    let file_name = attachment_name(single_front.as_deref(), &deck_name);
    info!(%deck_name, %file_name, size = bytes.len(), "generated package");

    let disposition = format!("attachment; filename=\"{file_name}\"");
    let mut response = bytes.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| Error::Other(format!("invalid attachment filename: {e}")))?,
    );
    Ok(response)
}

/// Attachment filename selection.
///
/// A single-note request is named after that note's front text; multi-note
/// requests use the deck name plus a timestamp so repeated requests do not
/// collide.
fn attachment_name(single_front: Option<&str>, deck_name: &str) -> String {
    match single_front {
        Some(front) => format!("{}.apkg", safe_name(front, "card")),
        None => format!(
            "{}_{}.apkg",
            safe_name(deck_name, "deck"),
            chrono::Utc::now().timestamp()
        ),
    }
}
