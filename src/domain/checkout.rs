//! Simulated checkout
//!
//! Validates the order form and pretends to take payment. Replace
//! `simulate_payment` with a real processor (Stripe/PayPal) when the shop
//! goes live.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::cart::{CartLine, CartSummary};
use crate::domain::pricing::{Fulfillment, OrderTotals, ShippingPolicy};
use crate::domain::value_objects::Money;
use crate::{Result, ShopError};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    pub phone: Option<String>,

    #[serde(default)]
    pub fulfillment: Fulfillment,

    pub address: Option<Address>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1, message = "street is required"))]
    pub street1: String,

    pub street2: Option<String>,

    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,

    pub state: Option<String>,

    #[validate(length(min = 1, message = "zip is required"))]
    pub zip: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReceiptLine {
    pub product_id: String,
    pub title: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&CartLine> for ReceiptLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.clone(),
            title: line.product.title.clone(),
            sku: line.product.sku.to_string(),
            quantity: line.quantity,
            unit_price: line.product.price.clone(),
            line_total: line.line_total.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderReceipt {
    pub order_number: String,
    pub payment_ref: String,
    pub email: String,
    pub fulfillment: Fulfillment,
    pub lines: Vec<ReceiptLine>,
    pub totals: OrderTotals,
    pub placed_at: DateTime<Utc>,
}

/// Validate the form against the cart and produce a simulated receipt.
///
/// An empty cart is rejected, and shipping orders must carry an address.
pub fn place_order(
    summary: &CartSummary,
    policy: &ShippingPolicy,
    request: &CheckoutRequest,
) -> Result<OrderReceipt> {
    if summary.is_empty() {
        return Err(ShopError::EmptyCart);
    }
    request
        .validate()
        .map_err(|e| ShopError::InvalidCheckout(e.to_string()))?;
    if request.fulfillment == Fulfillment::Ship {
        let address = request
            .address
            .as_ref()
            .ok_or_else(|| ShopError::InvalidCheckout("shipping address is required".to_string()))?;
        address
            .validate()
            .map_err(|e| ShopError::InvalidCheckout(e.to_string()))?;
    }

    let totals = policy.totals(&summary.subtotal, request.fulfillment);
    let payment_ref = simulate_payment(&totals.total);
    Ok(OrderReceipt {
        order_number: format!("ORD-{:08}", rand::random::<u32>()),
        payment_ref,
        email: request.email.clone(),
        fulfillment: request.fulfillment,
        lines: summary.lines.iter().map(ReceiptLine::from).collect(),
        totals,
        placed_at: Utc::now(),
    })
}

// Always approves. Real payment integration goes here.
fn simulate_payment(_total: &Money) -> String {
    format!("SIM-{:08}", rand::random::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Cart;
    use crate::domain::catalog::Catalog;
    use rust_decimal::Decimal;

    fn summary_with(lines: &[(&str, u32)]) -> CartSummary {
        let catalog = Catalog::seed().unwrap();
        let mut cart = Cart::new();
        for (id, qty) in lines {
            cart.add(catalog.get(id).unwrap(), *qty).unwrap();
        }
        cart.summarize(&catalog)
    }

    fn pickup_request() -> CheckoutRequest {
        CheckoutRequest {
            name: "Dale Watson".to_string(),
            email: "dale@example.com".to_string(),
            phone: None,
            fulfillment: Fulfillment::Pickup,
            address: None,
        }
    }

    fn ship_request() -> CheckoutRequest {
        CheckoutRequest {
            fulfillment: Fulfillment::Ship,
            address: Some(Address {
                street1: "114 Marsh Rd".to_string(),
                street2: None,
                city: "Summerville".to_string(),
                state: Some("SC".to_string()),
                zip: "29483".to_string(),
            }),
            ..pickup_request()
        }
    }

    #[test]
    fn test_rejects_empty_cart() {
        let policy = ShippingPolicy::default();
        let result = place_order(&summary_with(&[]), &policy, &pickup_request());
        assert!(matches!(result, Err(ShopError::EmptyCart)));
    }

    #[test]
    fn test_rejects_bad_email() {
        let policy = ShippingPolicy::default();
        let mut request = pickup_request();
        request.email = "not-an-email".to_string();
        let result = place_order(&summary_with(&[("TEST-KIT", 1)]), &policy, &request);
        assert!(matches!(result, Err(ShopError::InvalidCheckout(_))));
    }

    #[test]
    fn test_shipping_requires_address() {
        let policy = ShippingPolicy::default();
        let mut request = ship_request();
        request.address = None;
        let result = place_order(&summary_with(&[("TEST-KIT", 1)]), &policy, &request);
        assert!(matches!(result, Err(ShopError::InvalidCheckout(_))));
    }

    #[test]
    fn test_shipping_rejects_blank_address_fields() {
        let policy = ShippingPolicy::default();
        let mut request = ship_request();
        if let Some(address) = request.address.as_mut() {
            address.zip = String::new();
        }
        let result = place_order(&summary_with(&[("TEST-KIT", 1)]), &policy, &request);
        assert!(matches!(result, Err(ShopError::InvalidCheckout(_))));
    }

    #[test]
    fn test_pickup_order_succeeds_without_address() {
        let policy = ShippingPolicy::default();
        let receipt =
            place_order(&summary_with(&[("ZLR-M53", 1)]), &policy, &pickup_request()).unwrap();
        assert!(receipt.order_number.starts_with("ORD-"));
        assert!(receipt.payment_ref.starts_with("SIM-"));
        assert!(receipt.totals.shipping.is_zero());
        assert_eq!(receipt.totals.total.amount(), Decimal::new(21900, 2));
    }

    #[test]
    fn test_ship_order_carries_flat_rate() {
        let policy = ShippingPolicy::default();
        let receipt =
            place_order(&summary_with(&[("TEST-KIT", 2)]), &policy, &ship_request()).unwrap();
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.totals.subtotal.amount(), Decimal::new(7800, 2));
        assert_eq!(receipt.totals.shipping.amount(), Decimal::new(2500, 2));
        assert_eq!(receipt.totals.total.amount(), Decimal::new(10300, 2));
    }

    #[test]
    fn test_large_ship_order_gets_free_shipping() {
        let policy = ShippingPolicy::default();
        let receipt =
            place_order(&summary_with(&[("NS-1000", 1)]), &policy, &ship_request()).unwrap();
        assert!(receipt.totals.shipping.is_zero());
    }
}
