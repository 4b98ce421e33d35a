//! # Catalog Routes
//!
//! Read-only views of the shared vegetable catalog, plus the per-shop
//! popularity ranking.

use actix_web::{get, web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::current_user;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<i64>,
}

/// Full catalog, identical for every shop.
#[get("/vegetables")]
async fn list(req: HttpRequest, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    current_user(&req, &state).await?;
    let vegetables = state.db.vegetables().list().await?;
    Ok(HttpResponse::Ok().json(vegetables))
}

/// The caller's most-billed vegetables. Default 15, capped at 50.
#[get("/vegetables/top")]
async fn top(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<TopQuery>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let limit = query.limit.unwrap_or(15).clamp(1, 50);
    let top = state.db.vegetables().top_by_usage(user.id, limit).await?;
    Ok(HttpResponse::Ok().json(top))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(top).service(list);
}
