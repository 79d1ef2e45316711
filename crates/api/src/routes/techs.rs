use axum::routing::get;
use axum::Router;

use crate::handlers::techs;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET /techs -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/techs", get(techs::list))
}
