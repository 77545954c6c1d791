//! Domain model: catalog, cart, search, pricing, checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod events;
pub mod pricing;
pub mod search;
pub mod value_objects;
