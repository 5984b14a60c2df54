//! OpenAPI documentation and schema generation
//!
//! Compile-time OpenAPI specification for the apkg-maker API, served at
//! `/openapi.json`.

use utoipa::OpenApi;

/// OpenAPI documentation for the apkg-maker API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "apkg-maker",
        version = "0.1.0",
        description = "Converts flashcard notes into downloadable Anki .apkg packages",
        license(name = "MIT OR Apache-2.0")
    ),
    paths(
        crate::api::routes::make_package,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(crate::types::DeckRequest, crate::types::NoteInput)),
    tags(
        (name = "deck", description = "Package generation"),
        (name = "system", description = "Health and documentation")
    )
)]
pub struct ApiDoc;
