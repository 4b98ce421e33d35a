//! # User Repository
//!
//! Account storage. Password hashing happens in the server layer; this
//! repository only ever sees the finished PHC-string hash.

use sqlx::PgPool;
use veggie_core::{Role, User};

use crate::error::{DbError, DbResult};

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    /// Argon2 PHC-string hash, already computed.
    pub password_hash: String,
    pub role: Role,
    pub shop_name: Option<String>,
    /// AES-GCM encrypted contact number, already computed.
    pub mobile_enc: Option<String>,
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new account. A duplicate username surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn create(&self, new_user: &NewUser) -> DbResult<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role, shop_name, mobile_enc) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .bind(&new_user.shop_name)
        .bind(&new_user.mobile_enc)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(user_id = user.id, username = %user.username, "account created");
        Ok(user)
    }

    /// Looks up an account by login name.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Looks up an account by id, erroring when missing (token subjects
    /// should always resolve).
    pub async fn find_by_id(&self, id: i64) -> DbResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound { entity: "user", id })
    }
}
