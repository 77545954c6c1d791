//! Shipping estimation and order totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Money;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fulfillment {
    #[default]
    Ship,
    Pickup,
}

/// Flat-rate shipping with a free tier: pickup is free, an empty cart ships
/// for nothing, and orders at or above the threshold ship free.
#[derive(Clone, Debug)]
pub struct ShippingPolicy {
    flat_rate: Money,
    free_threshold: Money,
}

impl ShippingPolicy {
    pub fn new(flat_rate: Money, free_threshold: Money) -> Self {
        Self { flat_rate, free_threshold }
    }

    pub fn flat_rate(&self) -> &Money {
        &self.flat_rate
    }

    pub fn free_threshold(&self) -> &Money {
        &self.free_threshold
    }

    pub fn quote(&self, subtotal: &Money, fulfillment: Fulfillment) -> Money {
        if fulfillment == Fulfillment::Pickup {
            return Money::zero(subtotal.currency());
        }
        if subtotal.is_zero() || subtotal.amount() >= self.free_threshold.amount() {
            return Money::zero(subtotal.currency());
        }
        self.flat_rate.clone()
    }

    pub fn totals(&self, subtotal: &Money, fulfillment: Fulfillment) -> OrderTotals {
        let shipping = self.quote(subtotal, fulfillment);
        let total = subtotal.add(&shipping).unwrap_or_else(|_| subtotal.clone());
        OrderTotals { subtotal: subtotal.clone(), shipping, total }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            flat_rate: Money::usd(Decimal::new(2500, 2)),
            free_threshold: Money::usd(Decimal::new(50000, 2)),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}
