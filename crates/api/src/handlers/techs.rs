//! Handlers for the tech catalog.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/techs
///
/// The hulls and components designs are built from. The catalog is
/// serialized straight from the shared state.
pub async fn list(State(state): State<AppState>) -> AppResult<Response> {
    Ok(Json(DataResponse {
        data: state.techs.as_ref(),
    })
    .into_response())
}
