//! # Inventory Repository
//!
//! Per-shop stock and pricing. Setup is an upsert batch that silently skips
//! unknown vegetable ids (a stale frontend catalog must not fail the whole
//! batch); targeted updates of a single row 404 instead.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use veggie_core::Inventory;

use crate::error::{DbError, DbResult};

/// One entry in an inventory setup batch.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItemInput {
    pub vegetable_id: i64,
    pub price_per_kg_paise: i64,
    pub stock_grams: i64,
}

/// What a setup batch did.
#[derive(Debug, Clone, Serialize)]
pub struct SetupOutcome {
    /// Rows inserted or updated.
    pub applied: usize,
    /// Vegetable ids that do not exist in the catalog, skipped.
    pub skipped: Vec<i64>,
}

/// A shop's inventory row joined with catalog display names.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryRow {
    pub vegetable_id: i64,
    pub name: String,
    pub tamil_name: String,
    pub tanglish_name: Option<String>,
    pub image_url: Option<String>,
    pub price_per_kg_paise: i64,
    pub stock_grams: i64,
}

/// Repository for per-shop inventory.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies a setup batch in one transaction: upserts rows for known
    /// vegetables, collects unknown ids into `skipped`.
    pub async fn setup(&self, user_id: i64, items: &[InventoryItemInput]) -> DbResult<SetupOutcome> {
        let mut tx = self.pool.begin().await?;
        let mut applied = 0usize;
        let mut skipped = Vec::new();

        for item in items {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM vegetables WHERE id = $1")
                .bind(item.vegetable_id)
                .fetch_optional(&mut *tx)
                .await?;

            if exists.is_none() {
                skipped.push(item.vegetable_id);
                continue;
            }

            sqlx::query(
                "INSERT INTO inventory (user_id, vegetable_id, price_per_kg_paise, stock_grams) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (user_id, vegetable_id) DO UPDATE \
                 SET price_per_kg_paise = EXCLUDED.price_per_kg_paise, \
                     stock_grams = EXCLUDED.stock_grams",
            )
            .bind(user_id)
            .bind(item.vegetable_id)
            .bind(item.price_per_kg_paise)
            .bind(item.stock_grams)
            .execute(&mut *tx)
            .await?;
            applied += 1;
        }

        tx.commit().await?;

        if !skipped.is_empty() {
            tracing::warn!(user_id, skipped = ?skipped, "inventory setup skipped unknown vegetables");
        }

        Ok(SetupOutcome { applied, skipped })
    }

    /// Updates price and/or stock of one existing row. `None` leaves the
    /// field unchanged. Errors when the shop has no row for the vegetable.
    pub async fn update(
        &self,
        user_id: i64,
        vegetable_id: i64,
        price_per_kg_paise: Option<i64>,
        stock_grams: Option<i64>,
    ) -> DbResult<Inventory> {
        sqlx::query_as::<_, Inventory>(
            "UPDATE inventory \
             SET price_per_kg_paise = COALESCE($3, price_per_kg_paise), \
                 stock_grams = COALESCE($4, stock_grams) \
             WHERE user_id = $1 AND vegetable_id = $2 \
             RETURNING *",
        )
        .bind(user_id)
        .bind(vegetable_id)
        .bind(price_per_kg_paise)
        .bind(stock_grams)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound {
            entity: "inventory",
            id: vegetable_id,
        })
    }

    /// The shop's full inventory with catalog names, alphabetical.
    pub async fn list(&self, user_id: i64) -> DbResult<Vec<InventoryRow>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            "SELECT i.vegetable_id, v.name, v.tamil_name, v.tanglish_name, v.image_url, \
                    i.price_per_kg_paise, i.stock_grams \
             FROM inventory i \
             JOIN vegetables v ON v.id = i.vegetable_id \
             WHERE i.user_id = $1 \
             ORDER BY v.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
