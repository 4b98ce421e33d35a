//! # Customer Repository
//!
//! Registry lookups and per-shop purchase statistics. Statistics aggregate
//! over the bill snapshots (name/mobile as printed), not the registry, so a
//! later registry edit never rewrites history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use veggie_core::Customer;

use crate::error::DbResult;

/// Aggregated purchase history for one customer at one shop.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerStats {
    pub customer_name: Option<String>,
    pub customer_mobile: String,
    pub total_purchases: i64,
    pub total_spent_paise: i64,
    pub last_purchase_date: DateTime<Utc>,
    pub last_bill_number: String,
}

/// Repository for the customer registry.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks up a registry entry by mobile number.
    pub async fn find_by_mobile(&self, mobile: &str) -> DbResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE mobile_number = $1")
                .bind(mobile)
                .fetch_optional(&self.pool)
                .await?;
        Ok(customer)
    }

    /// Purchase statistics for every customer the shop has billed, grouped by
    /// the (name, mobile) snapshot on the bills, most recent first.
    pub async fn stats(&self, user_id: i64) -> DbResult<Vec<CustomerStats>> {
        let stats = sqlx::query_as::<_, CustomerStats>(
            "SELECT b.customer_name, b.customer_mobile, \
                    COUNT(*) AS total_purchases, \
                    SUM(b.total_paise)::BIGINT AS total_spent_paise, \
                    MAX(b.created_at) AS last_purchase_date, \
                    (SELECT b2.bill_number FROM bills b2 \
                     WHERE b2.user_id = b.user_id AND b2.customer_mobile = b.customer_mobile \
                     ORDER BY b2.created_at DESC LIMIT 1) AS last_bill_number \
             FROM bills b \
             WHERE b.user_id = $1 AND b.customer_mobile IS NOT NULL \
             GROUP BY b.user_id, b.customer_name, b.customer_mobile \
             ORDER BY last_purchase_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
