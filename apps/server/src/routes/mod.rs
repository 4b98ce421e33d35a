//! # HTTP Routes
//!
//! All business endpoints live under `/api/v1`; `/health` sits at the root
//! for load balancers. Every handler follows the same shape: resolve the
//! caller from the bearer token, validate input, call a repository, map the
//! result to JSON.

pub mod auth;
pub mod billing;
pub mod customers;
pub mod inventory;
pub mod vegetables;

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::error::ApiResult;
use crate::AppState;

/// Liveness probe: process up, database reachable.
#[get("/health")]
async fn health(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

/// Registers every route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(vegetables::configure)
            .configure(inventory::configure)
            .configure(billing::configure)
            .configure(customers::configure),
    );
}
