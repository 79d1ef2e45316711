pub mod designs;
pub mod health;
pub mod techs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /techs                                                     tech catalog
///
/// /games/{game_id}/players/{player_num}/designs              list, create
/// /games/{game_id}/players/{player_num}/designs/spec         preview spec (POST)
/// /games/{game_id}/players/{player_num}/designs/recompute    recompute specs (POST)
/// /games/{game_id}/players/{player_num}/designs/{num}        get, update, delete
/// /games/{game_id}/players/{player_num}/designs/{num}/upgrade-cost/{to_num}
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(techs::router())
        .nest("/games", designs::router())
}
