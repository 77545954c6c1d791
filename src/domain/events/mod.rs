//! Domain events
//!
//! Raised by the cart and the checkout flow, drained by the HTTP layer and
//! logged. They stand in for the storefront's toast notifications.

use rust_decimal::Decimal;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Cart(CartEvent),
    Checkout(CheckoutEvent),
}

#[derive(Clone, Debug)]
pub enum CartEvent {
    ItemAdded { product_id: String, quantity: u32 },
    QuantityChanged { product_id: String, quantity: u32 },
    ItemRemoved { product_id: String },
    Cleared,
}

#[derive(Clone, Debug)]
pub enum CheckoutEvent {
    OrderPlaced { order_number: String, total: Decimal },
}
