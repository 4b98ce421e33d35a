//! # Billing Routes
//!
//! Bill creation (the one write that matters), history, single-bill lookup
//! and the PDF download. Everything is scoped to the calling shop.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use veggie_core::{validation, BillingType};
use veggie_db::{NewBill, NewBillLine};

use crate::auth::current_user;
use crate::error::ApiResult;
use crate::pdf::{self, BillPdfOptions};
use crate::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct BillLineRequest {
    pub vegetable_id: i64,
    pub qty_grams: i64,
    pub price_override_paise: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    #[serde(default)]
    pub billing_type: BillingType,
    #[serde(default)]
    pub tax_paise: i64,
    #[serde(default)]
    pub discount_paise: i64,
    pub items: Vec<BillLineRequest>,
}

impl CreateBillRequest {
    /// Validates the request and lowers it into the repository input.
    fn into_new_bill(self) -> ApiResult<NewBill> {
        validation::validate_line_count(self.items.len())?;
        validation::validate_price_paise(self.tax_paise)?;
        validation::validate_price_paise(self.discount_paise)?;

        let customer_name = self
            .customer_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let customer_mobile = self
            .customer_mobile
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        if let Some(mobile) = &customer_mobile {
            validation::validate_mobile_number(mobile)?;
        }

        let mut lines = Vec::with_capacity(self.items.len());
        for item in self.items {
            validation::validate_qty_grams(item.qty_grams)?;
            if let Some(price) = item.price_override_paise {
                validation::validate_price_paise(price)?;
            }
            lines.push(NewBillLine {
                vegetable_id: item.vegetable_id,
                qty_grams: item.qty_grams,
                price_override_paise: item.price_override_paise,
            });
        }

        Ok(NewBill {
            customer_name,
            customer_mobile,
            billing_type: self.billing_type,
            tax_paise: self.tax_paise,
            discount_paise: self.discount_paise,
            lines,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Creates a bill: deducts stock, snapshots prices and names, records the
/// customer. All or nothing.
#[post("/billing/create")]
async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateBillRequest>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let new_bill = body.into_inner().into_new_bill()?;
    let bill = state.db.bills().create(&user, &new_bill).await?;
    Ok(HttpResponse::Created().json(bill))
}

/// The shop's bills, newest first.
#[get("/billing/history")]
async fn history(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);
    let bills = state.db.bills().history(user.id, limit, offset).await?;
    Ok(HttpResponse::Ok().json(bills))
}

/// PDF download of one bill.
#[get("/billing/{bill_id}/pdf")]
async fn download_pdf(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let bill = state.db.bills().find_by_id(user.id, path.into_inner()).await?;

    let options = BillPdfOptions {
        shop_address: state.config.shop_address.as_deref(),
        shop_phone: state.config.shop_phone.as_deref(),
        font_path: state.config.bill_font_path.as_deref(),
    };
    let bytes = pdf::render_bill(&bill, &options)?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}.pdf\"", bill.bill_number),
        ))
        .body(bytes))
}

/// One bill with line items. Another tenant's bill 404s.
#[get("/billing/{bill_id}")]
async fn get_bill(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = current_user(&req, &state).await?;
    let bill = state.db.bills().find_by_id(user.id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bill))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal /billing/history must register before the {bill_id} matcher.
    cfg.service(create)
        .service(history)
        .service(download_pdf)
        .service(get_bill);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(vegetable_id: i64, qty_grams: i64) -> BillLineRequest {
        BillLineRequest {
            vegetable_id,
            qty_grams,
            price_override_paise: None,
        }
    }

    fn request(items: Vec<BillLineRequest>) -> CreateBillRequest {
        CreateBillRequest {
            customer_name: None,
            customer_mobile: None,
            billing_type: BillingType::Retail,
            tax_paise: 0,
            discount_paise: 0,
            items,
        }
    }

    #[test]
    fn test_empty_bill_rejected() {
        assert!(request(vec![]).into_new_bill().is_err());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(request(vec![line(1, 0)]).into_new_bill().is_err());
    }

    #[test]
    fn test_negative_price_override_rejected() {
        let mut req = request(vec![line(1, 500)]);
        req.items[0].price_override_paise = Some(-100);
        assert!(req.into_new_bill().is_err());
    }

    #[test]
    fn test_blank_customer_fields_become_none() {
        let mut req = request(vec![line(1, 500)]);
        req.customer_name = Some("   ".into());
        req.customer_mobile = Some("".into());
        let new_bill = req.into_new_bill().unwrap();
        assert!(new_bill.customer_name.is_none());
        assert!(new_bill.customer_mobile.is_none());
    }

    #[test]
    fn test_bad_mobile_rejected() {
        let mut req = request(vec![line(1, 500)]);
        req.customer_mobile = Some("12345".into());
        assert!(req.into_new_bill().is_err());
    }

    #[test]
    fn test_valid_request_lowers() {
        let mut req = request(vec![line(3, 5_000), line(1, 250)]);
        req.customer_name = Some("Kumar".into());
        req.customer_mobile = Some("9095938085".into());
        req.discount_paise = 500;

        let new_bill = req.into_new_bill().unwrap();
        assert_eq!(new_bill.lines.len(), 2);
        assert_eq!(new_bill.customer_name.as_deref(), Some("Kumar"));
        assert_eq!(new_bill.discount_paise, 500);
    }
}
