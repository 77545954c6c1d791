//! View projections
//!
//! Shapes catalog and cart state for the storefront UI: formatted prices,
//! availability labels, line totals. The API serves these rather than raw
//! domain types.

use serde::Serialize;

use crate::domain::cart::CartSummary;
use crate::domain::catalog::Product;
use crate::domain::pricing::OrderTotals;

/// One product grid card.
#[derive(Clone, Debug, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub sku: String,
    pub price: String,
    pub image: String,
    pub pickup_only: bool,
    pub availability: String,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            sku: product.sku.to_string(),
            price: product.price.to_string(),
            image: product.image.clone(),
            pickup_only: product.pickup_only,
            availability: availability_label(product.pickup_only).to_string(),
        }
    }
}

pub fn availability_label(pickup_only: bool) -> &'static str {
    if pickup_only {
        "Pickup Only"
    } else {
        "Ships across SC"
    }
}

/// One line in the cart panel.
#[derive(Clone, Debug, Serialize)]
pub struct CartLineView {
    pub product_id: String,
    pub title: String,
    pub sku: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// The cart panel: lines, badge count and totals.
#[derive(Clone, Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u64,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub empty: bool,
}

impl CartView {
    pub fn project(summary: &CartSummary, totals: &OrderTotals) -> Self {
        let lines = summary
            .lines
            .iter()
            .map(|line| CartLineView {
                product_id: line.product.id.clone(),
                title: line.product.title.clone(),
                sku: line.product.sku.to_string(),
                image: line.product.image.clone(),
                unit_price: line.product.price.to_string(),
                quantity: line.quantity,
                line_total: line.line_total.to_string(),
            })
            .collect();
        Self {
            lines,
            item_count: summary.item_count,
            subtotal: totals.subtotal.to_string(),
            shipping: totals.shipping.to_string(),
            total: totals.total.to_string(),
            empty: summary.is_empty(),
        }
    }
}
