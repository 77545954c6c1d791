//! Palmetto Storefront
//!
//! Self-hosted shop service for Palmetto Septic Supplies.
//!
//! ## Features
//! - Fixed product catalog with search, filtering and sorting
//! - Persistent shopping cart (one cart per install, stored as JSON)
//! - Shipping estimation and order totals
//! - Simulated checkout

use thiserror::Error;

pub mod config;
pub mod domain;
pub mod store;
pub mod views;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("cart item not found: {0}")]
    CartItemNotFound(String),

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid SKU: {0}")]
    InvalidSku(&'static str),

    #[error("currency mismatch")]
    CurrencyMismatch,

    #[error("invalid checkout request: {0}")]
    InvalidCheckout(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ShopError>;
