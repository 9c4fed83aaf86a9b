use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::ApplicantProfileInput;
use super::engine::PathwayEngine;

/// Router builder exposing the diagnosis and catalog endpoints.
pub fn pathway_router(engine: Arc<PathwayEngine>) -> Router {
    Router::new()
        .route("/api/v1/pathways/diagnosis", post(diagnosis_handler))
        .route("/api/v1/pathways/catalog", get(catalog_handler))
        .with_state(engine)
}

pub(crate) async fn diagnosis_handler(
    State(engine): State<Arc<PathwayEngine>>,
    axum::Json(input): axum::Json<ApplicantProfileInput>,
) -> Response {
    let today = Local::now().date_naive();
    match engine.evaluate_on(&input, today) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "violations": error.violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn catalog_handler(State(engine): State<Arc<PathwayEngine>>) -> Response {
    let summary = engine.catalog().summary();
    (StatusCode::OK, axum::Json(summary)).into_response()
}
