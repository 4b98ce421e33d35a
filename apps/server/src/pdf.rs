//! # Bill PDF Rendering
//!
//! Renders a finalized bill as an A4 PDF: shop header, bill metadata, line
//! items, totals, footer.
//!
//! Item names print in Tamil when a Unicode TTF is configured
//! (`BILL_FONT_PATH`); without one the renderer falls back to built-in
//! Helvetica and the latin catalog names, never failing the request over a
//! missing font.

use std::fs::File;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};
use thiserror::Error;
use veggie_core::Bill;

use crate::error::ApiError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 6.0;

// Column x positions for the items table.
const COL_ITEM: f32 = MARGIN_MM;
const COL_QTY: f32 = 105.0;
const COL_RATE: f32 = 135.0;
const COL_AMOUNT: f32 = 168.0;

/// PDF generation failures.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

impl From<PdfError> for ApiError {
    fn from(err: PdfError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Shop details printed in the header, from server configuration.
#[derive(Debug, Default)]
pub struct BillPdfOptions<'a> {
    pub shop_address: Option<&'a str>,
    pub shop_phone: Option<&'a str>,
    pub font_path: Option<&'a str>,
}

/// Renders the bill and returns the finished PDF bytes.
pub fn render_bill(bill: &Bill, options: &BillPdfOptions) -> Result<Vec<u8>, PdfError> {
    let (doc, page, layer) = PdfDocument::new(
        &bill.bill_number,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(e.to_string()))?;

    // Tamil glyphs need an external Unicode font; Helvetica only covers the
    // latin names.
    let tamil = options.font_path.and_then(|path| match File::open(path) {
        Ok(file) => doc.add_external_font(file).ok(),
        Err(e) => {
            tracing::warn!(path, error = %e, "bill font not loadable, using Helvetica");
            None
        }
    });

    let mut renderer = Renderer {
        doc: &doc,
        layer: doc.get_page(page).get_layer(layer),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
        regular,
        bold,
        tamil,
    };

    renderer.header(bill, options);
    renderer.metadata(bill);
    renderer.items(bill);
    renderer.totals(bill);
    renderer.footer();
    drop(renderer);

    doc.save_to_bytes()
        .map_err(|e| PdfError::Render(e.to_string()))
}

struct Renderer<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    tamil: Option<IndirectFontRef>,
}

impl Renderer<'_> {
    fn text(&self, content: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(content, size, Mm(x), Mm(self.y), font);
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
        if self.y < MARGIN_MM + 20.0 {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    /// Dashed horizontal divider across the content width.
    fn divider(&mut self) {
        self.advance(3.0);
        self.layer.set_line_dash_pattern(LineDashPattern {
            dash_1: Some(2),
            ..Default::default()
        });
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_MM), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.layer
            .set_line_dash_pattern(LineDashPattern::default());
        self.advance(5.0);
    }

    fn header(&mut self, bill: &Bill, options: &BillPdfOptions) {
        self.advance(5.0);
        let bold = self.bold.clone();
        self.text(&bill.shop_name, 18.0, MARGIN_MM, &bold);
        self.advance(LINE_HEIGHT_MM + 2.0);

        let regular = self.regular.clone();
        if let Some(address) = options.shop_address {
            self.text(address, 9.0, MARGIN_MM, &regular);
            self.advance(LINE_HEIGHT_MM - 1.0);
        }
        if let Some(phone) = options.shop_phone {
            self.text(&format!("Phone: {phone}"), 9.0, MARGIN_MM, &regular);
            self.advance(LINE_HEIGHT_MM - 1.0);
        }
        self.divider();
    }

    fn metadata(&mut self, bill: &Bill) {
        let regular = self.regular.clone();
        let bold = self.bold.clone();

        self.text("Bill No:", 10.0, MARGIN_MM, &bold);
        self.text(&bill.bill_number, 10.0, MARGIN_MM + 25.0, &regular);
        self.advance(LINE_HEIGHT_MM);

        self.text("Date:", 10.0, MARGIN_MM, &bold);
        self.text(
            &bill.created_at.format("%d-%m-%Y %H:%M").to_string(),
            10.0,
            MARGIN_MM + 25.0,
            &regular,
        );
        self.advance(LINE_HEIGHT_MM);

        if let Some(name) = &bill.customer_name {
            self.text("Customer:", 10.0, MARGIN_MM, &bold);
            self.text(name, 10.0, MARGIN_MM + 25.0, &regular);
            self.advance(LINE_HEIGHT_MM);
        }
        if let Some(mobile) = &bill.customer_mobile {
            self.text("Mobile:", 10.0, MARGIN_MM, &bold);
            self.text(mobile, 10.0, MARGIN_MM + 25.0, &regular);
            self.advance(LINE_HEIGHT_MM);
        }

        let billing_type = serde_json::to_value(bill.billing_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        self.text("Type:", 10.0, MARGIN_MM, &bold);
        self.text(&billing_type, 10.0, MARGIN_MM + 25.0, &regular);
        self.divider();
    }

    fn items(&mut self, bill: &Bill) {
        let bold = self.bold.clone();
        self.text("Item", 10.0, COL_ITEM, &bold);
        self.text("Qty", 10.0, COL_QTY, &bold);
        self.text("Rate/kg", 10.0, COL_RATE, &bold);
        self.text("Amount", 10.0, COL_AMOUNT, &bold);
        self.advance(LINE_HEIGHT_MM + 1.0);

        let regular = self.regular.clone();
        for item in &bill.items {
            // Tamil display name only when the Unicode font is loaded.
            match (&self.tamil, &item.tamil_name) {
                (Some(tamil_font), Some(tamil_name)) => {
                    let font = tamil_font.clone();
                    self.text(tamil_name, 10.0, COL_ITEM, &font);
                }
                _ => {
                    self.text(&item.vegetable_name, 10.0, COL_ITEM, &regular);
                }
            }
            self.text(&item.qty().to_string(), 10.0, COL_QTY, &regular);
            self.text(
                &format!("Rs. {}", item.price_per_kg()),
                10.0,
                COL_RATE,
                &regular,
            );
            self.text(
                &format!("Rs. {}", item.subtotal()),
                10.0,
                COL_AMOUNT,
                &regular,
            );
            self.advance(LINE_HEIGHT_MM);
        }
        self.divider();
    }

    fn totals(&mut self, bill: &Bill) {
        let regular = self.regular.clone();
        let bold = self.bold.clone();

        self.text("Subtotal:", 10.0, COL_RATE, &regular);
        self.text(
            &format!("Rs. {}", bill.subtotal()),
            10.0,
            COL_AMOUNT,
            &regular,
        );
        self.advance(LINE_HEIGHT_MM);

        if bill.discount_paise > 0 {
            self.text("Discount:", 10.0, COL_RATE, &regular);
            self.text(
                &format!("- Rs. {}", bill.discount()),
                10.0,
                COL_AMOUNT,
                &regular,
            );
            self.advance(LINE_HEIGHT_MM);
        }

        if bill.tax_paise > 0 {
            self.text("Tax:", 10.0, COL_RATE, &regular);
            self.text(&format!("Rs. {}", bill.tax()), 10.0, COL_AMOUNT, &regular);
            self.advance(LINE_HEIGHT_MM);
        }

        self.text("TOTAL:", 12.0, COL_RATE, &bold);
        self.text(&format!("Rs. {}", bill.total()), 12.0, COL_AMOUNT, &bold);
        self.advance(LINE_HEIGHT_MM + 2.0);
    }

    fn footer(&mut self) {
        self.divider();
        let regular = self.regular.clone();
        self.text("Thank you! Visit again.", 10.0, MARGIN_MM, &regular);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use veggie_core::{BillItem, BillingType};

    fn sample_bill() -> Bill {
        Bill {
            id: 1,
            bill_number: "BILL-20260828143015-A3F1".into(),
            user_id: 1,
            shop_name: "Suji Vegetables".into(),
            customer_id: Some(7),
            customer_name: Some("Kumar".into()),
            customer_mobile: Some("9095938085".into()),
            billing_type: BillingType::Retail,
            subtotal_paise: 10_000,
            tax_paise: 0,
            discount_paise: 500,
            total_paise: 9_500,
            created_at: Utc::now(),
            items: vec![BillItem {
                id: 1,
                bill_id: 1,
                vegetable_id: 3,
                vegetable_name: "Tomato".into(),
                tamil_name: Some("தக்காளி".into()),
                position: 0,
                qty_grams: 5_000,
                price_per_kg_paise: 2_000,
                subtotal_paise: 10_000,
            }],
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_bill(&sample_bill(), &BillPdfOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_without_customer_or_discount() {
        let mut bill = sample_bill();
        bill.customer_name = None;
        bill.customer_mobile = None;
        bill.discount_paise = 0;
        bill.items.clear();

        let bytes = render_bill(&bill, &BillPdfOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_survives_missing_font_file() {
        let options = BillPdfOptions {
            font_path: Some("/nonexistent/font.ttf"),
            ..Default::default()
        };
        let bytes = render_bill(&sample_bill(), &options).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_many_items_paginate() {
        let mut bill = sample_bill();
        let template = bill.items[0].clone();
        bill.items = (0..80)
            .map(|i| {
                let mut item = template.clone();
                item.position = i;
                item
            })
            .collect();

        let bytes = render_bill(&bill, &BillPdfOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
