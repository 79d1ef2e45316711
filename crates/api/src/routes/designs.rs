//! Route definitions for a player's ship designs.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ship_designs;
use crate::state::AppState;

/// Routes mounted at `/games`.
///
/// ```text
/// GET    /{game_id}/players/{player_num}/designs                            -> list
/// POST   /{game_id}/players/{player_num}/designs                            -> create
/// POST   /{game_id}/players/{player_num}/designs/spec                       -> preview_spec
/// POST   /{game_id}/players/{player_num}/designs/recompute                  -> recompute
/// GET    /{game_id}/players/{player_num}/designs/{num}                      -> get_by_num
/// PUT    /{game_id}/players/{player_num}/designs/{num}                      -> update
/// DELETE /{game_id}/players/{player_num}/designs/{num}                      -> delete
/// GET    /{game_id}/players/{player_num}/designs/{num}/upgrade-cost/{to_num} -> upgrade_cost
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{game_id}/players/{player_num}/designs",
            get(ship_designs::list).post(ship_designs::create),
        )
        .route(
            "/{game_id}/players/{player_num}/designs/spec",
            post(ship_designs::preview_spec),
        )
        .route(
            "/{game_id}/players/{player_num}/designs/recompute",
            post(ship_designs::recompute),
        )
        .route(
            "/{game_id}/players/{player_num}/designs/{num}",
            get(ship_designs::get_by_num)
                .put(ship_designs::update)
                .delete(ship_designs::delete),
        )
        .route(
            "/{game_id}/players/{player_num}/designs/{num}/upgrade-cost/{to_num}",
            get(ship_designs::upgrade_cost),
        )
}
