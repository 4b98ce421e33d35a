//! # Vegetable Repository
//!
//! The shared catalog plus the per-shop popularity ranking. Catalog rows are
//! global (every shop sees the same list); only the usage counters are
//! tenant-scoped.

use serde::Serialize;
use sqlx::PgPool;
use veggie_core::Vegetable;

use crate::error::DbResult;

/// Input for seeding/creating a catalog entry.
#[derive(Debug, Clone)]
pub struct NewVegetable {
    pub name: String,
    pub tamil_name: String,
    pub tanglish_name: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub default_price_paise: i64,
}

/// A catalog entry joined with its per-shop usage count.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopVegetable {
    pub id: i64,
    pub name: String,
    pub tamil_name: String,
    pub tanglish_name: Option<String>,
    pub image_url: Option<String>,
    pub default_price_paise: i64,
    pub usage_count: i64,
}

/// Repository for the shared vegetable catalog.
#[derive(Debug, Clone)]
pub struct VegetableRepository {
    pool: PgPool,
}

impl VegetableRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full catalog, alphabetical.
    pub async fn list(&self) -> DbResult<Vec<Vegetable>> {
        let vegetables = sqlx::query_as::<_, Vegetable>("SELECT * FROM vegetables ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(vegetables)
    }

    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Vegetable>> {
        let vegetable = sqlx::query_as::<_, Vegetable>("SELECT * FROM vegetables WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vegetable)
    }

    /// Inserts a catalog entry. Used by the seeder.
    pub async fn insert(&self, new: &NewVegetable) -> DbResult<Vegetable> {
        let vegetable = sqlx::query_as::<_, Vegetable>(
            "INSERT INTO vegetables \
             (name, tamil_name, tanglish_name, category, image_url, default_price_paise) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.tamil_name)
        .bind(&new.tanglish_name)
        .bind(&new.category)
        .bind(&new.image_url)
        .bind(new.default_price_paise)
        .fetch_one(&self.pool)
        .await?;
        Ok(vegetable)
    }

    /// Number of catalog entries. The seeder uses this to stay idempotent.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vegetables")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// The shop's most-billed vegetables, most popular first.
    pub async fn top_by_usage(&self, user_id: i64, limit: i64) -> DbResult<Vec<TopVegetable>> {
        let top = sqlx::query_as::<_, TopVegetable>(
            "SELECT v.id, v.name, v.tamil_name, v.tanglish_name, v.image_url, \
                    v.default_price_paise, u.usage_count \
             FROM vegetable_usage u \
             JOIN vegetables v ON v.id = u.vegetable_id \
             WHERE u.user_id = $1 \
             ORDER BY u.usage_count DESC, v.name \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(top)
    }
}
