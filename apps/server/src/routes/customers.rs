//! # Customer Routes
//!
//! Registry lookup by mobile number and per-shop purchase statistics.

use actix_web::{get, web, HttpRequest, HttpResponse};
use veggie_core::validation;

use crate::auth::current_user;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Looks up a registry entry by mobile number. Malformed numbers 400 before
/// the database is touched.
#[get("/customers/lookup/{mobile}")]
async fn lookup(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    current_user(&req, &state).await?;
    let mobile = path.into_inner();
    validation::validate_mobile_number(&mobile)?;

    let customer = state
        .db
        .customers()
        .find_by_mobile(&mobile)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer not found: {mobile}")))?;
    Ok(HttpResponse::Ok().json(customer))
}

/// Purchase statistics for everyone the shop has billed.
#[get("/customers/stats")]
async fn stats(req: HttpRequest, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let stats = state.db.customers().stats(user.id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(stats).service(lookup);
}
