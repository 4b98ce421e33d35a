//! # Domain Types
//!
//! Core domain types used throughout the billing backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Vegetable    │   │    Inventory    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  username       │   │  name           │   │  user_id (FK)   │       │
//! │  │  role           │   │  tamil_name     │   │  vegetable_id   │       │
//! │  │  shop_name      │   │  image_url      │   │  price, stock   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bill       │   │    BillItem     │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bill_number    │   │  name snapshot  │   │  mobile (UNIQ)  │       │
//! │  │  totals         │   │  qty, price     │   │  name, address  │       │
//! │  │  billing_type   │   │  subtotal       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every per-shop entity (Inventory, Bill, VegetableUsage) carries the owning
//! `user_id`; queries in veggie-db always filter on it, so one tenant can
//! never observe another tenant's rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Quantity};

// =============================================================================
// Role
// =============================================================================

/// Account role. Admins can create accounts; shop operators run one shop.
///
/// Authorization is a pure predicate over this enum (see
/// the server's `authorize`), not an inheritance hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "user_role", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office administrator.
    Admin,
    /// Shop operator (the default tenant role).
    Shop,
}

impl Default for Role {
    fn default() -> Self {
        Role::Shop
    }
}

// =============================================================================
// Billing Type
// =============================================================================

/// Whether a bill was rung up at retail or wholesale terms.
/// Informational on the bill; price resolution is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "billing_type", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum BillingType {
    Retail,
    Wholesale,
}

impl Default for BillingType {
    fn default() -> Self {
        BillingType::Retail
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account. One account == one shop (tenant).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,

    /// Login name, unique across the system.
    pub username: String,

    /// Argon2 PHC-string hash. Never serialized to API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    /// Shop name printed on bills; `DEFAULT_SHOP_NAME` when absent.
    pub shop_name: Option<String>,

    /// Contact number, AES-GCM encrypted at rest (base64 of nonce+ciphertext).
    #[serde(skip_serializing)]
    pub mobile_enc: Option<String>,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Vegetable (shared catalog)
// =============================================================================

/// A catalog entry, shared by all shops.
///
/// `tamil_name`/`tanglish_name` are the localized display names that end up
/// on printed bills; `default_price_paise` is only a suggestion, each shop
/// sets its own price in Inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vegetable {
    pub id: i64,
    pub name: String,
    pub tamil_name: String,
    pub tanglish_name: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub default_price_paise: i64,
}

impl Vegetable {
    /// Returns the catalog default price as Money.
    #[inline]
    pub fn default_price(&self) -> Money {
        Money::from_paise(self.default_price_paise)
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// One shop's stock and price for one vegetable.
/// Invariant: at most one row per (user, vegetable) pair (DB UNIQUE).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Inventory {
    pub id: i64,
    pub user_id: i64,
    pub vegetable_id: i64,
    pub price_per_kg_paise: i64,
    pub stock_grams: i64,
}

impl Inventory {
    /// Returns the selling price as Money.
    #[inline]
    pub fn price_per_kg(&self) -> Money {
        Money::from_paise(self.price_per_kg_paise)
    }

    /// Returns the stock level as a Quantity.
    #[inline]
    pub fn stock(&self) -> Quantity {
        Quantity::from_grams(self.stock_grams)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A finalized bill. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Bill {
    pub id: i64,

    /// Human-readable number, e.g. `BILL-20260828143015-A3F1`.
    /// Unique via DB constraint; duplicate generation maps to Conflict.
    pub bill_number: String,

    pub user_id: i64,

    /// Shop name frozen at creation time.
    pub shop_name: String,

    /// Link into the customer registry when a mobile number was supplied.
    pub customer_id: Option<i64>,

    /// Customer details frozen at creation time (kept even if the registry
    /// entry changes later).
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,

    pub billing_type: BillingType,

    pub subtotal_paise: i64,
    pub tax_paise: i64,
    pub discount_paise: i64,
    pub total_paise: i64,

    pub created_at: DateTime<Utc>,

    /// Line items in the order they were submitted.
    /// Loaded separately; not a database column.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<BillItem>,
}

impl Bill {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paise(self.tax_paise)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line item on a bill.
/// Uses the snapshot pattern to freeze catalog data at time of sale:
/// historical bills survive later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BillItem {
    pub id: i64,
    pub bill_id: i64,
    pub vegetable_id: i64,

    /// Display name at time of sale (frozen).
    pub vegetable_name: String,
    /// Localized name at time of sale (frozen).
    pub tamil_name: Option<String>,

    /// Position in the submitted request, preserved for display order.
    pub position: i32,

    pub qty_grams: i64,
    pub price_per_kg_paise: i64,

    /// `price.line_total(qty)` at creation time; never recomputed.
    pub subtotal_paise: i64,
}

impl BillItem {
    #[inline]
    pub fn qty(&self) -> Quantity {
        Quantity::from_grams(self.qty_grams)
    }

    #[inline]
    pub fn price_per_kg(&self) -> Money {
        Money::from_paise(self.price_per_kg_paise)
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registry entry, keyed by unique mobile number.
///
/// Bills keep a denormalized snapshot of the name/mobile they were issued
/// with and additionally link here via `Bill::customer_id` when a mobile
/// number was recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Vegetable Usage
// =============================================================================

/// Per-shop popularity counter, incremented once per bill line referencing
/// the vegetable. Drives the "top vegetables" ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VegetableUsage {
    pub id: i64,
    pub user_id: i64,
    pub vegetable_id: i64,
    pub usage_count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default_is_shop() {
        assert_eq!(Role::default(), Role::Shop);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"shop\"").unwrap(),
            Role::Shop
        );
    }

    #[test]
    fn test_billing_type_serde() {
        assert_eq!(
            serde_json::to_string(&BillingType::Wholesale).unwrap(),
            "\"wholesale\""
        );
        assert_eq!(BillingType::default(), BillingType::Retail);
    }

    #[test]
    fn test_user_hides_secrets_in_json() {
        let user = User {
            id: 1,
            username: "suji".into(),
            password_hash: "$argon2id$...".into(),
            role: Role::Shop,
            shop_name: Some("Suji Vegetables".into()),
            mobile_enc: Some("b64ciphertext".into()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("mobile_enc"));
        assert!(json.contains("suji"));
    }

    #[test]
    fn test_money_accessors() {
        let inv = Inventory {
            id: 1,
            user_id: 1,
            vegetable_id: 2,
            price_per_kg_paise: 2000,
            stock_grams: 50_000,
        };
        assert_eq!(inv.price_per_kg().paise(), 2000);
        assert_eq!(inv.stock().grams(), 50_000);
    }
}
