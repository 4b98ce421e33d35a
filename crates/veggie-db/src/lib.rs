//! # veggie-db: PostgreSQL Persistence Layer
//!
//! Data access layer for the vegetable shop billing backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         veggie-db                                       │
//! │                                                                         │
//! │  ┌──────────────┐                                                       │
//! │  │   Database   │  pool handle + embedded migrations                    │
//! │  └──────┬───────┘                                                       │
//! │         │ hands out                                                     │
//! │         ▼                                                               │
//! │  ┌─────────────────────────────────────────────────────────┐            │
//! │  │                    Repositories                         │            │
//! │  │  UserRepository        accounts                         │            │
//! │  │  VegetableRepository   shared catalog + popularity      │            │
//! │  │  InventoryRepository   per-shop stock and prices        │            │
//! │  │  BillRepository        transactional bill creation      │            │
//! │  │  CustomerRepository    registry + purchase statistics   │            │
//! │  └─────────────────────────────────────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Every per-shop query filters on `user_id` (tenant isolation)
//! 2. Bill creation is one transaction; any failure rolls everything back
//! 3. Runtime-checked queries (`query_as` + `bind`), no compile-time DB needed

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::bill::{BillRepository, NewBill, NewBillLine};
pub use repository::customer::{CustomerRepository, CustomerStats};
pub use repository::inventory::{InventoryItemInput, InventoryRepository, InventoryRow, SetupOutcome};
pub use repository::user::{NewUser, UserRepository};
pub use repository::vegetable::{NewVegetable, TopVegetable, VegetableRepository};
