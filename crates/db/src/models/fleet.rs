//! Fleet row model.

use shipyard_core::fleet::{Fleet, ShipToken};
use shipyard_core::types::{DbId, Timestamp, Vector};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `fleets` table. Positions are stored as two columns.
#[derive(Debug, Clone, FromRow)]
pub struct FleetRow {
    pub id: DbId,
    pub game_id: DbId,
    pub player_num: i32,
    pub num: i32,
    pub name: String,
    pub position_x: f64,
    pub position_y: f64,
    pub tokens: Json<Vec<ShipToken>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<FleetRow> for Fleet {
    fn from(row: FleetRow) -> Self {
        Self {
            id: Some(row.id),
            game_id: row.game_id,
            player_num: row.player_num,
            num: row.num,
            name: row.name,
            position: Vector::new(row.position_x, row.position_y),
            tokens: row.tokens.0,
        }
    }
}
