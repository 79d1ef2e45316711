//! Repository for the `ship_designs` table.

use shipyard_core::fleet::remove_design_from_fleets;
use shipyard_core::ship_design::ShipDesign;
use shipyard_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::ship_design::ShipDesignRow;
use crate::repositories::FleetRepo;

const COLUMNS: &str = "id, uuid, game_id, player_num, num, original_player_num, name, version, \
     hull, hull_set_number, cannot_delete, mystery_trader, slots, purpose, report_age, spec, \
     created_at, updated_at";

/// Fleets touched when a design was deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DesignDeletion {
    pub fleets_updated: usize,
    pub fleets_deleted: usize,
}

pub struct ShipDesignRepo;

impl ShipDesignRepo {
    /// All designs a player owns, ordered by design number.
    pub async fn list_for_player(
        pool: &PgPool,
        game_id: DbId,
        player_num: i32,
    ) -> Result<Vec<ShipDesign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ship_designs
             WHERE game_id = $1 AND player_num = $2
             ORDER BY num ASC"
        );
        let rows = sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(game_id)
            .bind(player_num)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ShipDesign::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ShipDesign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ship_designs WHERE id = $1");
        let row = sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ShipDesign::from))
    }

    pub async fn find_by_num(
        pool: &PgPool,
        game_id: DbId,
        player_num: i32,
        num: i32,
    ) -> Result<Option<ShipDesign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ship_designs
             WHERE game_id = $1 AND player_num = $2 AND num = $3"
        );
        let row = sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(game_id)
            .bind(player_num)
            .bind(num)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ShipDesign::from))
    }

    /// Load several designs of one player at once. Numbers with no design
    /// are skipped.
    pub async fn find_by_nums(
        pool: &PgPool,
        game_id: DbId,
        player_num: i32,
        nums: &[i32],
    ) -> Result<Vec<ShipDesign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ship_designs
             WHERE game_id = $1 AND player_num = $2 AND num = ANY($3)
             ORDER BY num ASC"
        );
        let rows = sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(game_id)
            .bind(player_num)
            .bind(nums)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(ShipDesign::from).collect())
    }

    /// Insert a design. The design gets the player's next free number and a
    /// fresh UUID; `num`, `uuid` and `id` on the input are ignored.
    pub async fn create(pool: &PgPool, design: &ShipDesign) -> Result<ShipDesign, sqlx::Error> {
        let query = format!(
            "INSERT INTO ship_designs
                (uuid, game_id, player_num, num, original_player_num, name, version, hull,
                 hull_set_number, cannot_delete, mystery_trader, slots, purpose, report_age, spec)
             VALUES ($1, $2, $3,
                 (SELECT COALESCE(MAX(num), 0) + 1 FROM ship_designs
                  WHERE game_id = $2 AND player_num = $3),
                 $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(Uuid::new_v4())
            .bind(design.game_id)
            .bind(design.player_num)
            .bind(design.original_player_num)
            .bind(&design.name)
            .bind(design.version)
            .bind(&design.hull)
            .bind(design.hull_set_number)
            .bind(design.cannot_delete)
            .bind(design.mystery_trader)
            .bind(Json(&design.slots))
            .bind(design.purpose.map(Json))
            .bind(design.report_age)
            .bind(Json(&design.spec))
            .fetch_one(pool)
            .await
            .map(ShipDesign::from)
    }

    /// Overwrite the editable fields of a stored design, keyed by `id`.
    ///
    /// Returns `None` if `design.id` is unset or no such row exists.
    pub async fn update(
        pool: &PgPool,
        design: &ShipDesign,
    ) -> Result<Option<ShipDesign>, sqlx::Error> {
        let Some(id) = design.id else {
            return Ok(None);
        };
        let query = format!(
            "UPDATE ship_designs SET
                name = $2,
                version = $3,
                hull = $4,
                hull_set_number = $5,
                cannot_delete = $6,
                slots = $7,
                purpose = $8,
                report_age = $9,
                spec = $10,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(id)
            .bind(&design.name)
            .bind(design.version)
            .bind(&design.hull)
            .bind(design.hull_set_number)
            .bind(design.cannot_delete)
            .bind(Json(&design.slots))
            .bind(design.purpose.map(Json))
            .bind(design.report_age)
            .bind(Json(&design.spec))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ShipDesign::from))
    }

    /// Store new specs for several designs in one transaction. Either every
    /// spec is written or none is. Designs without an ID are skipped.
    pub async fn update_specs(
        pool: &PgPool,
        designs: &[ShipDesign],
    ) -> Result<Vec<ShipDesign>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut saved = Vec::with_capacity(designs.len());
        for design in designs {
            let Some(id) = design.id else {
                continue;
            };
            if let Some(updated) = Self::update_spec_inner(&mut tx, id, design).await? {
                saved.push(updated);
            }
        }

        tx.commit().await?;
        Ok(saved)
    }

    async fn update_spec_inner(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        design: &ShipDesign,
    ) -> Result<Option<ShipDesign>, sqlx::Error> {
        let query = format!(
            "UPDATE ship_designs SET spec = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ShipDesignRow>(&query)
            .bind(id)
            .bind(Json(&design.spec))
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(ShipDesign::from))
    }

    /// Delete a design by ID. Returns `true` if a row was removed.
    ///
    /// Fleets are left alone; use [`Self::delete_with_fleets`] when ships of
    /// the design may exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ship_designs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a design and strip its ships from the owner's fleets in one
    /// transaction. Fleets left without ships are deleted.
    ///
    /// Returns `None` if the design does not exist.
    pub async fn delete_with_fleets(
        pool: &PgPool,
        game_id: DbId,
        player_num: i32,
        num: i32,
    ) -> Result<Option<DesignDeletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(DbId,)> = sqlx::query_as(
            "DELETE FROM ship_designs
             WHERE game_id = $1 AND player_num = $2 AND num = $3
             RETURNING id",
        )
        .bind(game_id)
        .bind(player_num)
        .bind(num)
        .fetch_optional(&mut *tx)
        .await?;

        if deleted.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let fleets = FleetRepo::list_for_player_inner(&mut tx, game_id, player_num).await?;
        let (to_update, to_delete) = remove_design_from_fleets(fleets, num);

        for fleet in &to_update {
            if let Some(id) = fleet.id {
                FleetRepo::update_tokens_inner(&mut tx, id, &fleet.tokens).await?;
            }
        }
        for fleet in &to_delete {
            if let Some(id) = fleet.id {
                FleetRepo::delete_inner(&mut tx, id).await?;
            }
        }

        tx.commit().await?;

        tracing::debug!(
            game_id,
            player_num,
            design_num = num,
            fleets_updated = to_update.len(),
            fleets_deleted = to_delete.len(),
            "Deleted ship design"
        );

        Ok(Some(DesignDeletion {
            fleets_updated: to_update.len(),
            fleets_deleted: to_delete.len(),
        }))
    }
}
