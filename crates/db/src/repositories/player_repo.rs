//! Repository for the `players` table.

use shipyard_core::player::Player;
use shipyard_core::tech::TechLevel;
use shipyard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::player::{CreatePlayer, PlayerRow};

const COLUMNS: &str =
    "id, game_id, num, name, tech_levels, race_spec, friends, created_at, updated_at";

pub struct PlayerRepo;

impl PlayerRepo {
    /// Insert a player, returning the stored record.
    pub async fn create(pool: &PgPool, input: &CreatePlayer) -> Result<Player, sqlx::Error> {
        let race_spec = input.race_spec.clone().unwrap_or_default();
        let query = format!(
            "INSERT INTO players (game_id, num, name, tech_levels, race_spec, friends)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerRow>(&query)
            .bind(input.game_id)
            .bind(input.num)
            .bind(&input.name)
            .bind(Json(input.tech_levels))
            .bind(Json(&race_spec))
            .bind(&input.friends)
            .fetch_one(pool)
            .await
            .map(Player::from)
    }

    pub async fn find_by_num(
        pool: &PgPool,
        game_id: DbId,
        num: i32,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE game_id = $1 AND num = $2");
        let row = sqlx::query_as::<_, PlayerRow>(&query)
            .bind(game_id)
            .bind(num)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Player::from))
    }

    /// Replace a player's research levels. Returns `None` if the player
    /// does not exist.
    pub async fn update_tech_levels(
        pool: &PgPool,
        game_id: DbId,
        num: i32,
        tech_levels: &TechLevel,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!(
            "UPDATE players SET tech_levels = $3, updated_at = NOW()
             WHERE game_id = $1 AND num = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PlayerRow>(&query)
            .bind(game_id)
            .bind(num)
            .bind(Json(tech_levels))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Player::from))
    }
}
