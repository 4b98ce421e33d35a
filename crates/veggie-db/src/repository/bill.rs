//! # Bill Repository
//!
//! Transactional bill creation plus history lookups.
//!
//! ## Bill Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     create(): one transaction                           │
//! │                                                                         │
//! │  1. Upsert customer registry entry (when a mobile number was given)     │
//! │  2. Insert the bill shell (unique bill number)                          │
//! │  3. For each line, in canonical lock order (ascending vegetable id):    │
//! │     a. SELECT ... FOR UPDATE the inventory row (joined with catalog)    │
//! │        missing row        → InvalidItem, rollback                       │
//! │     b. stock < quantity   → InsufficientStock, rollback                 │
//! │     c. deduct stock                                                     │
//! │     d. insert the line item (snapshot of name/price, submitted order)   │
//! │     e. bump the popularity counter                                      │
//! │  4. Write subtotal and grand total onto the bill                        │
//! │  5. Commit                                                              │
//! │                                                                         │
//! │  Any error at any step leaves the database unchanged.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Locking rows in ascending vegetable id means two concurrent bills that
//! touch the same vegetables always acquire their row locks in the same
//! order, so they serialize instead of deadlocking.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;
use veggie_core::money::grand_total;
use veggie_core::{Bill, BillItem, BillingType, CoreError, Money, Quantity, User, DEFAULT_SHOP_NAME};

use crate::error::DbResult;

// =============================================================================
// Inputs
// =============================================================================

/// One requested line on a new bill.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBillLine {
    pub vegetable_id: i64,
    pub qty_grams: i64,
    /// Negotiated price for this bill only; inventory price when absent.
    /// Does not touch the stored inventory price.
    pub price_override_paise: Option<i64>,
}

/// A bill creation request, already validated by the caller.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub billing_type: BillingType,
    pub tax_paise: i64,
    pub discount_paise: i64,
    pub lines: Vec<NewBillLine>,
}

/// Row shape for a locked inventory line joined with its catalog entry.
#[derive(Debug, sqlx::FromRow)]
struct LockedLine {
    price_per_kg_paise: i64,
    stock_grams: i64,
    name: String,
    tamil_name: String,
}

// =============================================================================
// Bill Number
// =============================================================================

/// Builds a bill number like `BILL-20260828143015-A3F1`: a UTC timestamp plus
/// a short random suffix. Collisions are caught by the UNIQUE constraint.
fn generate_bill_number(now: DateTime<Utc>) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!(
        "BILL-{}-{}",
        now.format("%Y%m%d%H%M%S"),
        uuid[..4].to_uppercase()
    )
}

/// Pairs each line with its submitted position, then orders by vegetable id
/// for lock acquisition.
fn lock_order(lines: &[NewBillLine]) -> Vec<(usize, &NewBillLine)> {
    let mut ordered: Vec<(usize, &NewBillLine)> = lines.iter().enumerate().collect();
    ordered.sort_by_key(|(_, line)| line.vegetable_id);
    ordered
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for bills.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: PgPool,
}

impl BillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a bill atomically: stock deduction, line items, popularity
    /// counters and customer registry all land in one transaction.
    pub async fn create(&self, user: &User, new_bill: &NewBill) -> DbResult<Bill> {
        let mut tx = self.pool.begin().await?;

        let shop_name = user
            .shop_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string());
        let bill_number = generate_bill_number(Utc::now());

        // Registry entry keyed by mobile number; a repeat customer gets their
        // name refreshed, a new one gets a row.
        let customer_id: Option<i64> = match new_bill.customer_mobile.as_deref() {
            Some(mobile) => {
                let name = new_bill
                    .customer_name
                    .as_deref()
                    .unwrap_or("Walk-in Customer");
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO customers (name, mobile_number) VALUES ($1, $2) \
                     ON CONFLICT (mobile_number) DO UPDATE \
                     SET name = EXCLUDED.name, updated_at = NOW() \
                     RETURNING id",
                )
                .bind(name)
                .bind(mobile)
                .fetch_one(&mut *tx)
                .await?;
                Some(id)
            }
            None => None,
        };

        // Bill shell; totals are written once the lines are priced. A
        // duplicate bill number fails here as a unique violation.
        let bill_id: i64 = sqlx::query_scalar(
            "INSERT INTO bills \
             (bill_number, user_id, shop_name, customer_id, customer_name, customer_mobile, \
              billing_type, tax_paise, discount_paise) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(&bill_number)
        .bind(user.id)
        .bind(&shop_name)
        .bind(customer_id)
        .bind(&new_bill.customer_name)
        .bind(&new_bill.customer_mobile)
        .bind(new_bill.billing_type)
        .bind(new_bill.tax_paise)
        .bind(new_bill.discount_paise)
        .fetch_one(&mut *tx)
        .await?;

        let mut subtotal = Money::zero();
        let mut items: Vec<BillItem> = Vec::with_capacity(new_bill.lines.len());

        for (position, line) in lock_order(&new_bill.lines) {
            let locked = sqlx::query_as::<_, LockedLine>(
                "SELECT i.price_per_kg_paise, i.stock_grams, v.name, v.tamil_name \
                 FROM inventory i \
                 JOIN vegetables v ON v.id = i.vegetable_id \
                 WHERE i.user_id = $1 AND i.vegetable_id = $2 \
                 FOR UPDATE OF i",
            )
            .bind(user.id)
            .bind(line.vegetable_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::InvalidItem {
                vegetable_id: line.vegetable_id,
            })?;

            if locked.stock_grams < line.qty_grams {
                return Err(CoreError::InsufficientStock {
                    name: locked.name,
                    available_grams: locked.stock_grams,
                    requested_grams: line.qty_grams,
                }
                .into());
            }

            sqlx::query(
                "UPDATE inventory SET stock_grams = stock_grams - $3 \
                 WHERE user_id = $1 AND vegetable_id = $2",
            )
            .bind(user.id)
            .bind(line.vegetable_id)
            .bind(line.qty_grams)
            .execute(&mut *tx)
            .await?;

            let price = line
                .price_override_paise
                .map(Money::from_paise)
                .unwrap_or_else(|| Money::from_paise(locked.price_per_kg_paise));
            let line_subtotal = price.line_total(Quantity::from_grams(line.qty_grams));
            subtotal += line_subtotal;

            let item = sqlx::query_as::<_, BillItem>(
                "INSERT INTO bill_items \
                 (bill_id, vegetable_id, vegetable_name, tamil_name, position, \
                  qty_grams, price_per_kg_paise, subtotal_paise) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
                 RETURNING *",
            )
            .bind(bill_id)
            .bind(line.vegetable_id)
            .bind(&locked.name)
            .bind(&locked.tamil_name)
            .bind(position as i32)
            .bind(line.qty_grams)
            .bind(price.paise())
            .bind(line_subtotal.paise())
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);

            sqlx::query(
                "INSERT INTO vegetable_usage (user_id, vegetable_id, usage_count) \
                 VALUES ($1, $2, 1) \
                 ON CONFLICT (user_id, vegetable_id) DO UPDATE \
                 SET usage_count = vegetable_usage.usage_count + 1",
            )
            .bind(user.id)
            .bind(line.vegetable_id)
            .execute(&mut *tx)
            .await?;
        }

        let total = grand_total(
            subtotal,
            Money::from_paise(new_bill.discount_paise),
            Money::from_paise(new_bill.tax_paise),
        );

        let mut bill = sqlx::query_as::<_, Bill>(
            "UPDATE bills SET subtotal_paise = $2, total_paise = $3 \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(bill_id)
        .bind(subtotal.paise())
        .bind(total.paise())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        // Back to the submitted order for display.
        items.sort_by_key(|item| item.position);
        bill.items = items;

        tracing::info!(
            bill_number = %bill.bill_number,
            user_id = user.id,
            lines = bill.items.len(),
            total_paise = bill.total_paise,
            "bill created"
        );

        Ok(bill)
    }

    /// The shop's bills, newest first, with line items attached.
    pub async fn history(&self, user_id: i64, limit: i64, offset: i64) -> DbResult<Vec<Bill>> {
        let mut bills = sqlx::query_as::<_, Bill>(
            "SELECT * FROM bills WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.attach_items(&mut bills).await?;
        Ok(bills)
    }

    /// One bill with line items, scoped to the owning shop. A bill owned by
    /// another tenant is indistinguishable from a missing one.
    pub async fn find_by_id(&self, user_id: i64, bill_id: i64) -> DbResult<Bill> {
        let mut bill =
            sqlx::query_as::<_, Bill>("SELECT * FROM bills WHERE id = $1 AND user_id = $2")
                .bind(bill_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(CoreError::BillNotFound(bill_id))?;

        bill.items = sqlx::query_as::<_, BillItem>(
            "SELECT * FROM bill_items WHERE bill_id = $1 ORDER BY position",
        )
        .bind(bill.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Loads line items for a page of bills in one query.
    async fn attach_items(&self, bills: &mut [Bill]) -> DbResult<()> {
        if bills.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = bills.iter().map(|b| b.id).collect();
        let items = sqlx::query_as::<_, BillItem>(
            "SELECT * FROM bill_items WHERE bill_id = ANY($1) ORDER BY position",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_bill: HashMap<i64, Vec<BillItem>> = HashMap::new();
        for item in items {
            by_bill.entry(item.bill_id).or_default().push(item);
        }
        for bill in bills.iter_mut() {
            bill.items = by_bill.remove(&bill.id).unwrap_or_default();
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bill_number_format() {
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 14, 30, 15).unwrap();
        let number = generate_bill_number(now);

        assert!(number.starts_with("BILL-20260828143015-"));
        let suffix = number.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(suffix, suffix.to_uppercase());
    }

    #[test]
    fn test_bill_numbers_differ() {
        let now = Utc::now();
        // Random suffix makes same-second collisions vanishingly rare.
        assert_ne!(generate_bill_number(now), generate_bill_number(now));
    }

    #[test]
    fn test_lock_order_sorts_by_vegetable_id_keeping_positions() {
        let lines = vec![
            NewBillLine {
                vegetable_id: 9,
                qty_grams: 100,
                price_override_paise: None,
            },
            NewBillLine {
                vegetable_id: 2,
                qty_grams: 200,
                price_override_paise: None,
            },
            NewBillLine {
                vegetable_id: 5,
                qty_grams: 300,
                price_override_paise: None,
            },
        ];

        let ordered = lock_order(&lines);
        let veg_ids: Vec<i64> = ordered.iter().map(|(_, l)| l.vegetable_id).collect();
        let positions: Vec<usize> = ordered.iter().map(|(pos, _)| *pos).collect();

        assert_eq!(veg_ids, vec![2, 5, 9]);
        // Positions still point at the submitted slots.
        assert_eq!(positions, vec![1, 2, 0]);
    }
}
