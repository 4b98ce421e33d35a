//! # Account Routes
//!
//! Self-service signup (always a shop account), login, and the admin-only
//! account creation endpoint that can mint any role.

use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use veggie_core::{validation, Role, User};
use veggie_db::NewUser;

use crate::auth::{authorize, current_user, hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub shop_name: Option<String>,
    pub mobile_number: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    pub shop_name: Option<String>,
    pub mobile_number: Option<String>,
}

/// Account as clients see it: no hash, mobile number decrypted.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub shop_name: Option<String>,
    pub mobile_number: Option<String>,
}

impl UserResponse {
    fn from_user(user: &User, state: &AppState) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
            shop_name: user.shop_name.clone(),
            mobile_number: user.mobile_enc.as_deref().map(|enc| state.cipher.decrypt(enc)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_account(
    state: &AppState,
    username: &str,
    password: &str,
    role: Role,
    shop_name: Option<String>,
    mobile_number: Option<&str>,
) -> ApiResult<User> {
    validation::validate_username(username)?;
    validation::validate_password(password)?;

    let mobile_enc = match mobile_number {
        Some(mobile) => {
            validation::validate_mobile_number(mobile)?;
            Some(state.cipher.encrypt(mobile)?)
        }
        None => None,
    };

    let new_user = NewUser {
        username: username.trim().to_string(),
        password_hash: hash_password(password)?,
        role,
        shop_name,
        mobile_enc,
    };
    Ok(state.db.users().create(&new_user).await?)
}

/// Self-service registration. The new account is always a shop.
#[post("/auth/signup")]
async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let user = create_account(
        &state,
        &body.username,
        &body.password,
        Role::Shop,
        body.shop_name.clone(),
        body.mobile_number.as_deref(),
    )
    .await?;

    let access_token = state.jwt.issue(&user)?;
    Ok(HttpResponse::Created().json(TokenResponse {
        access_token,
        token_type: "bearer",
        user: UserResponse::from_user(&user, &state),
    }))
}

/// Exchanges credentials for a token. Unknown username and wrong password
/// produce the same response.
#[post("/auth/login")]
async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> ApiResult<HttpResponse> {
    let user = state
        .db
        .users()
        .find_by_username(body.username.trim())
        .await?
        .filter(|user| verify_password(&body.password, &user.password_hash))
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let access_token = state.jwt.issue(&user)?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer",
        user: UserResponse::from_user(&user, &state),
    }))
}

/// Admin-only account creation; the only way to mint another admin.
#[post("/admin/create-user")]
async fn create_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let caller = current_user(&req, &state).await?;
    authorize(&caller, &[Role::Admin])?;

    let user = create_account(
        &state,
        &body.username,
        &body.password,
        body.role,
        body.shop_name.clone(),
        body.mobile_number.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from_user(&user, &state)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(login).service(create_user);
}
