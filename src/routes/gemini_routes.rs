use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::agent::GenerativeProvider;
use crate::errors::AppError;
use crate::models::{ErrorResponse, ImageResponse, PromptRequest, TextResponse};
use crate::service::generation_service::GenerationService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/gemini/text` — `{ prompt }` → `{ reply }`
pub async fn text_handler<P: GenerativeProvider>(
    State(svc): State<GenerationService<P>>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match svc.generate_text(&request.prompt).await {
        Ok(reply) => Json(TextResponse { reply }).into_response(),
        Err(err) => error_response(&err),
    }
}

/// POST `/api/gemini/image` — `{ prompt }` → `{ image }` (data URI)
pub async fn image_handler<P: GenerativeProvider>(
    State(svc): State<GenerationService<P>>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match svc.generate_image(&request.prompt).await {
        Ok(image) => Json(ImageResponse { image }).into_response(),
        Err(err) => error_response(&err),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: err.to_string() }),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {rejection}");
    (
        rejection.status(),
        Json(ErrorResponse { error: rejection.body_text() }),
    )
        .into_response()
}
