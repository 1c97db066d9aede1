pub mod charges;
pub mod pix;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: String,
    pub reason: String,
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) fn error_response(code: StatusCode, reason: &str) -> (StatusCode, Json<ApiError>) {
    (
        code,
        Json(ApiError {
            status: "ERROR".to_string(),
            reason: reason.to_string(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        // Payload generation and checking
        .route("/api/pix", post(pix::create_charge))
        .route("/api/pix/batch", post(pix::create_batch))
        .route("/api/pix/validate", post(pix::validate_payload))
        // Issued charges
        .route("/api/pix/charges", get(charges::list_charges))
        .route("/api/pix/charges/{charge_id}", get(charges::get_charge))
        .with_state(state)
}
