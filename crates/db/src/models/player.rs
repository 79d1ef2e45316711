//! Player row model and DTOs.

use serde::Deserialize;
use shipyard_core::player::{Player, RaceSpec};
use shipyard_core::tech::TechLevel;
use shipyard_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `players` table.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerRow {
    pub id: DbId,
    pub game_id: DbId,
    pub num: i32,
    pub name: String,
    pub tech_levels: Json<TechLevel>,
    pub race_spec: Json<RaceSpec>,
    pub friends: Vec<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            num: row.num,
            name: row.name,
            tech_levels: row.tech_levels.0,
            race_spec: row.race_spec.0,
            friends: row.friends,
        }
    }
}

/// DTO for adding a player to a game.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayer {
    pub game_id: DbId,
    pub num: i32,
    pub name: String,
    #[serde(default)]
    pub tech_levels: TechLevel,
    /// Defaults to the standard race when omitted.
    #[serde(default)]
    pub race_spec: Option<RaceSpec>,
    #[serde(default)]
    pub friends: Vec<i32>,
}
