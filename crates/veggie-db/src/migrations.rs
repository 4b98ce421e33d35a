//! # Embedded Migrations
//!
//! Schema migrations are compiled into the binary from `migrations/postgres/`
//! at the workspace root and applied at startup. Each migration file is
//! idempotent, and sqlx additionally tracks applied versions in
//! `_sqlx_migrations`.

/// The embedded migrator. Applied by [`crate::Database::run_migrations`].
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/postgres");
