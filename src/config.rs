//! Environment-driven configuration

use std::env;
use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::domain::pricing::ShippingPolicy;
use crate::domain::value_objects::Money;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cart_store_path: PathBuf,
    pub shipping: ShippingPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8084);
        let cart_store_path = env::var("CART_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cart.json"));
        let flat_rate = decimal_var("SHIPPING_FLAT_RATE").unwrap_or_else(|| Decimal::new(2500, 2));
        let free_threshold =
            decimal_var("FREE_SHIPPING_THRESHOLD").unwrap_or_else(|| Decimal::new(50000, 2));
        Self {
            port,
            cart_store_path,
            shipping: ShippingPolicy::new(Money::usd(flat_rate), Money::usd(free_threshold)),
        }
    }
}

fn decimal_var(key: &str) -> Option<Decimal> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
