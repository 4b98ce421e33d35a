//! # Repositories
//!
//! One repository per aggregate. Each holds a cloned `PgPool` and exposes
//! async methods returning `DbResult`. Bill creation is the only multi-table
//! transaction; everything else is single statements.

pub mod bill;
pub mod customer;
pub mod inventory;
pub mod user;
pub mod vegetable;
