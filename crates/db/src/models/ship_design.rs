//! Ship design row model.

use shipyard_core::ship_design::{ShipDesign, ShipDesignPurpose, ShipDesignSlot, ShipDesignSpec};
use shipyard_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `ship_designs` table.
#[derive(Debug, Clone, FromRow)]
pub struct ShipDesignRow {
    pub id: DbId,
    pub uuid: Uuid,
    pub game_id: DbId,
    pub player_num: i32,
    pub num: i32,
    pub original_player_num: i32,
    pub name: String,
    pub version: i32,
    pub hull: String,
    pub hull_set_number: i32,
    pub cannot_delete: bool,
    pub mystery_trader: bool,
    pub slots: Json<Vec<ShipDesignSlot>>,
    pub purpose: Option<Json<ShipDesignPurpose>>,
    pub report_age: Option<i32>,
    pub spec: Json<ShipDesignSpec>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ShipDesignRow> for ShipDesign {
    fn from(row: ShipDesignRow) -> Self {
        Self {
            id: Some(row.id),
            uuid: Some(row.uuid),
            game_id: row.game_id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            num: Some(row.num),
            player_num: row.player_num,
            original_player_num: row.original_player_num,
            name: row.name,
            version: row.version,
            hull: row.hull,
            hull_set_number: row.hull_set_number,
            cannot_delete: row.cannot_delete,
            mystery_trader: row.mystery_trader,
            slots: row.slots.0,
            purpose: row.purpose.map(|p| p.0),
            report_age: row.report_age,
            spec: row.spec.0,
        }
    }
}
