//! # veggie-core: Pure Business Logic for the Vegetable Shop Backend
//!
//! This crate is the **heart** of the billing system. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Veggie Billing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  HTTP API (apps/server)                         │   │
//! │  │    signup, login, inventory, billing, customers, PDF            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ veggie-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │ Bill User │  │   Money   │  │ CoreError │  │   rules   │  │   │
//! │  │   │ Inventory │  │ Quantity  │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 veggie-db (Database Layer)                      │   │
//! │  │        PostgreSQL queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Integer Stock**: Quantities and stock levels are in grams (i64), same reason
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use veggie_core::money::{Money, Quantity};
//!
//! // ₹20.00 per kg, 5 kg sold
//! let price = Money::from_paise(2000);
//! let qty = Quantity::from_grams(5000);
//!
//! assert_eq!(price.line_total(qty).paise(), 10_000); // ₹100.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::{Money, Quantity};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of line items allowed on a single bill.
///
/// ## Business Reason
/// Prevents runaway requests and keeps the printed bill on one page.
pub const MAX_BILL_LINES: usize = 100;

/// Maximum quantity of a single line item (1,000 kg in grams).
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 50000 instead of 5000).
pub const MAX_LINE_QTY_GRAMS: i64 = 1_000_000;

/// Shop name printed on bills when the account has none configured.
pub const DEFAULT_SHOP_NAME: &str = "My Vegetable Shop";
