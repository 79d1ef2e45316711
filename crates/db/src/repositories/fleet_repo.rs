//! Repository for the `fleets` table.

use shipyard_core::fleet::{Fleet, ShipToken};
use shipyard_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::fleet::FleetRow;

const COLUMNS: &str =
    "id, game_id, player_num, num, name, position_x, position_y, tokens, created_at, updated_at";

pub struct FleetRepo;

impl FleetRepo {
    pub async fn create(pool: &PgPool, fleet: &Fleet) -> Result<Fleet, sqlx::Error> {
        let query = format!(
            "INSERT INTO fleets (game_id, player_num, num, name, position_x, position_y, tokens)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FleetRow>(&query)
            .bind(fleet.game_id)
            .bind(fleet.player_num)
            .bind(fleet.num)
            .bind(&fleet.name)
            .bind(fleet.position.x)
            .bind(fleet.position.y)
            .bind(Json(&fleet.tokens))
            .fetch_one(pool)
            .await
            .map(Fleet::from)
    }

    /// All fleets a player owns, ordered by fleet number.
    pub async fn list_for_player(
        pool: &PgPool,
        game_id: DbId,
        player_num: i32,
    ) -> Result<Vec<Fleet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fleets
             WHERE game_id = $1 AND player_num = $2
             ORDER BY num ASC"
        );
        let rows = sqlx::query_as::<_, FleetRow>(&query)
            .bind(game_id)
            .bind(player_num)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Fleet::from).collect())
    }

    /// Replace a fleet's tokens. Returns `true` if the fleet exists.
    pub async fn update_tokens(
        pool: &PgPool,
        id: DbId,
        tokens: &[ShipToken],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE fleets SET tokens = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(Json(tokens))
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fleets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lock and load a player's fleets inside an open transaction.
    pub(crate) async fn list_for_player_inner(
        tx: &mut Transaction<'_, Postgres>,
        game_id: DbId,
        player_num: i32,
    ) -> Result<Vec<Fleet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fleets
             WHERE game_id = $1 AND player_num = $2
             ORDER BY num ASC
             FOR UPDATE"
        );
        let rows = sqlx::query_as::<_, FleetRow>(&query)
            .bind(game_id)
            .bind(player_num)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(Fleet::from).collect())
    }

    pub(crate) async fn update_tokens_inner(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        tokens: &[ShipToken],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE fleets SET tokens = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(Json(tokens))
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_inner(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM fleets WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
