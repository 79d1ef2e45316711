//! Handlers for ship designs.
//!
//! Designs are scoped to a player in a game:
//! `/games/{game_id}/players/{player_num}/designs[/{num}]`
//!
//! Every write validates the design against the catalog and the player's
//! research, then stores it with a freshly computed spec.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use shipyard_core::cost_calculator::starbase_upgrade_cost;
use shipyard_core::design_spec::compute_ship_design_spec;
use shipyard_core::design_validation::validate_ship_design;
use shipyard_core::error::CoreError;
use shipyard_core::player::Player;
use shipyard_core::ship_design::{ShipDesign, ShipDesignPurpose, ShipDesignSlot};
use shipyard_core::types::DbId;
use shipyard_db::repositories::{PlayerRepo, ShipDesignRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
   Request bodies
   -------------------------------------------------------------------------- */

/// Body for creating, updating, or previewing a design.
///
/// Server-owned fields (`num`, `version`, `spec`, `cannotDelete`) are not
/// accepted from clients.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShipDesignInput {
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(min = 1))]
    pub hull: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub hull_set_number: i32,
    #[serde(default)]
    pub slots: Vec<ShipDesignSlot>,
    #[serde(default)]
    pub purpose: Option<ShipDesignPurpose>,
}

impl ShipDesignInput {
    fn apply_to(self, design: &mut ShipDesign) {
        design.name = self.name.trim().to_string();
        design.hull = self.hull;
        design.hull_set_number = self.hull_set_number;
        design.slots = self.slots;
        design.purpose = self.purpose;
    }

    fn into_design(self, game_id: DbId, player_num: i32) -> ShipDesign {
        let mut design = ShipDesign::new(game_id, player_num, "", "");
        self.apply_to(&mut design);
        design
    }
}

/* --------------------------------------------------------------------------
   Lookup helpers
   -------------------------------------------------------------------------- */

async fn find_player(state: &AppState, game_id: DbId, player_num: i32) -> AppResult<Player> {
    PlayerRepo::find_by_num(&state.pool, game_id, player_num)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Player",
                id: DbId::from(player_num),
            })
        })
}

async fn find_design(
    state: &AppState,
    game_id: DbId,
    player_num: i32,
    num: i32,
) -> AppResult<ShipDesign> {
    ShipDesignRepo::find_by_num(&state.pool, game_id, player_num, num)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ShipDesign",
                id: DbId::from(num),
            })
        })
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// POST /api/v1/games/{game_id}/players/{player_num}/designs/spec
///
/// Compute the spec of an unsaved design. The design only needs a known
/// hull and known components; it does not have to be complete.
pub async fn preview_spec(
    State(state): State<AppState>,
    Path((game_id, player_num)): Path<(DbId, i32)>,
    Json(input): Json<ShipDesignInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let player = find_player(&state, game_id, player_num).await?;
    let design = input.into_design(game_id, player_num);

    let spec = compute_ship_design_spec(&state.rules, &state.techs, &player, &design)?;
    Ok(Json(DataResponse { data: spec }))
}

/// GET /api/v1/games/{game_id}/players/{player_num}/designs
pub async fn list(
    State(state): State<AppState>,
    Path((game_id, player_num)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    find_player(&state, game_id, player_num).await?;
    let designs = ShipDesignRepo::list_for_player(&state.pool, game_id, player_num).await?;
    Ok(Json(DataResponse { data: designs }))
}

/// POST /api/v1/games/{game_id}/players/{player_num}/designs
pub async fn create(
    State(state): State<AppState>,
    Path((game_id, player_num)): Path<(DbId, i32)>,
    Json(input): Json<ShipDesignInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let player = find_player(&state, game_id, player_num).await?;

    let mut design = input.into_design(game_id, player_num);
    validate_ship_design(&state.techs, &player, &design)?;
    design.spec = compute_ship_design_spec(&state.rules, &state.techs, &player, &design)?;

    let created = ShipDesignRepo::create(&state.pool, &design).await?;

    tracing::info!(
        game_id,
        player_num,
        design_num = ?created.num,
        hull = %created.hull,
        "Ship design created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/games/{game_id}/players/{player_num}/designs/{num}
pub async fn get_by_num(
    State(state): State<AppState>,
    Path((game_id, player_num, num)): Path<(DbId, i32, i32)>,
) -> AppResult<impl IntoResponse> {
    let design = find_design(&state, game_id, player_num, num).await?;
    Ok(Json(DataResponse { data: design }))
}

/// PUT /api/v1/games/{game_id}/players/{player_num}/designs/{num}
///
/// Replaces the design's editable fields. A new hull or a new slot layout
/// bumps `version`; renames do not.
pub async fn update(
    State(state): State<AppState>,
    Path((game_id, player_num, num)): Path<(DbId, i32, i32)>,
    Json(input): Json<ShipDesignInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let player = find_player(&state, game_id, player_num).await?;
    let existing = find_design(&state, game_id, player_num, num).await?;

    let mut design = existing.clone();
    input.apply_to(&mut design);
    if design.layout_differs(&existing) {
        design.version += 1;
    }

    validate_ship_design(&state.techs, &player, &design)?;
    design.spec = compute_ship_design_spec(&state.rules, &state.techs, &player, &design)?;

    let updated = ShipDesignRepo::update(&state.pool, &design)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ShipDesign",
                id: DbId::from(num),
            })
        })?;

    tracing::info!(
        game_id,
        player_num,
        design_num = num,
        version = updated.version,
        "Ship design updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/games/{game_id}/players/{player_num}/designs/{num}
///
/// Ships built from the design are removed from the player's fleets in the
/// same transaction. Fleets left empty are deleted.
pub async fn delete(
    State(state): State<AppState>,
    Path((game_id, player_num, num)): Path<(DbId, i32, i32)>,
) -> AppResult<StatusCode> {
    let design = find_design(&state, game_id, player_num, num).await?;
    if design.cannot_delete {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "design {} cannot be deleted",
            design.name
        ))));
    }

    let deletion = ShipDesignRepo::delete_with_fleets(&state.pool, game_id, player_num, num)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "ShipDesign",
                id: DbId::from(num),
            })
        })?;

    tracing::info!(
        game_id,
        player_num,
        design_num = num,
        fleets_updated = deletion.fleets_updated,
        fleets_deleted = deletion.fleets_deleted,
        "Ship design deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/games/{game_id}/players/{player_num}/designs/{num}/upgrade-cost/{to_num}
///
/// Cost of replacing starbase `num` with starbase `to_num`.
pub async fn upgrade_cost(
    State(state): State<AppState>,
    Path((game_id, player_num, num, to_num)): Path<(DbId, i32, i32, i32)>,
) -> AppResult<impl IntoResponse> {
    let design = find_design(&state, game_id, player_num, num).await?;
    let new_design = find_design(&state, game_id, player_num, to_num).await?;

    if !design.spec.is_starbase() || !new_design.spec.is_starbase() {
        return Err(AppError::Core(CoreError::Validation(
            "upgrade costs only apply to starbase designs".into(),
        )));
    }

    let cost = starbase_upgrade_cost(&design, &new_design);
    Ok(Json(DataResponse { data: cost }))
}

/// POST /api/v1/games/{game_id}/players/{player_num}/designs/recompute
///
/// Re-derive every spec of a player's designs, e.g. after their tech levels
/// changed. Build counters are kept. If any design fails to compute, no
/// spec is written.
pub async fn recompute(
    State(state): State<AppState>,
    Path((game_id, player_num)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let player = find_player(&state, game_id, player_num).await?;
    let mut designs = ShipDesignRepo::list_for_player(&state.pool, game_id, player_num).await?;

    for design in &mut designs {
        design.spec = compute_ship_design_spec(&state.rules, &state.techs, &player, design)?;
    }
    let updated = ShipDesignRepo::update_specs(&state.pool, &designs).await?;

    tracing::info!(
        game_id,
        player_num,
        count = updated.len(),
        "Ship design specs recomputed"
    );

    Ok(Json(DataResponse { data: updated }))
}
