//! # Inventory Routes
//!
//! Per-shop stock and pricing. Setup is bulk upsert (unknown vegetables are
//! skipped and reported); update touches exactly one existing row.

use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use veggie_core::validation;

use crate::auth::current_user;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SetupItemRequest {
    pub vegetable_id: i64,
    pub price_per_kg_paise: i64,
    pub stock_grams: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub price_per_kg_paise: Option<i64>,
    pub stock_grams: Option<i64>,
}

/// Bulk upsert of the shop's inventory.
#[post("/inventory/setup")]
async fn setup(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<Vec<SetupItemRequest>>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("items must not be empty".to_string()));
    }

    let mut items = Vec::with_capacity(body.len());
    for item in body.iter() {
        validation::validate_price_paise(item.price_per_kg_paise)?;
        validation::validate_stock_grams(item.stock_grams)?;
        items.push(veggie_db::InventoryItemInput {
            vegetable_id: item.vegetable_id,
            price_per_kg_paise: item.price_per_kg_paise,
            stock_grams: item.stock_grams,
        });
    }

    let outcome = state.db.inventory().setup(user.id, &items).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Updates price and/or stock of one inventory row; 404 when the shop has
/// never stocked the vegetable.
#[put("/inventory/update/{vegetable_id}")]
async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateRequest>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let vegetable_id = path.into_inner();

    if body.price_per_kg_paise.is_none() && body.stock_grams.is_none() {
        return Err(ApiError::BadRequest("nothing to update".to_string()));
    }
    if let Some(price) = body.price_per_kg_paise {
        validation::validate_price_paise(price)?;
    }
    if let Some(stock) = body.stock_grams {
        validation::validate_stock_grams(stock)?;
    }

    let row = state
        .db
        .inventory()
        .update(user.id, vegetable_id, body.price_per_kg_paise, body.stock_grams)
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

/// The shop's inventory with catalog names.
#[get("/inventory")]
async fn list(req: HttpRequest, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let rows = state.db.inventory().list(user.id).await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(setup).service(update).service(list);
}
