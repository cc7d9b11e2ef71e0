pub mod gemini_routes;

use axum::http::{header, Method};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agent::GenerativeProvider;
use crate::service::generation_service::GenerationService;
use gemini_routes::{image_handler, text_handler};

/// Builds the full HTTP surface around an already-configured provider.
pub fn app<P: GenerativeProvider>(service: GenerationService<P>) -> Router {
    // The chat UI is served from its own origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/gemini/text", post(text_handler::<P>))
        .route("/api/gemini/image", post(image_handler::<P>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
