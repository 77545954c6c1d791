//! Cart aggregate
//!
//! The cart is a quantity map keyed by product id. Lines are joined against
//! the catalog when summarized; ids with no catalog counterpart stay in the
//! map but never appear in a summary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::catalog::{Catalog, Product};
use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::value_objects::{Money, Quantity};
use crate::{Result, ShopError};

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    quantities: BTreeMap<String, Quantity>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Cart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            quantities: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            events: vec![],
        }
    }

    /// Rebuild a cart from a previously saved quantity map.
    pub fn from_quantities(quantities: BTreeMap<String, Quantity>) -> Self {
        let mut cart = Self::new();
        cart.quantities = quantities;
        cart
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn quantities(&self) -> &BTreeMap<String, Quantity> {
        &self.quantities
    }

    pub fn line_count(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Add `quantity` of a product, merging with any line already present.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(ShopError::InvalidQuantity);
        }
        let line = self.quantities.entry(product.id.clone()).or_default();
        *line = line.add(quantity);
        let quantity = line.value();
        self.raise_event(DomainEvent::Cart(CartEvent::ItemAdded {
            product_id: product.id.clone(),
            quantity,
        }));
        self.touch();
        Ok(())
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<()> {
        if !self.quantities.contains_key(product_id) {
            return Err(ShopError::CartItemNotFound(product_id.to_string()));
        }
        if quantity == 0 {
            self.quantities.remove(product_id);
            self.raise_event(DomainEvent::Cart(CartEvent::ItemRemoved {
                product_id: product_id.to_string(),
            }));
        } else {
            self.quantities
                .insert(product_id.to_string(), Quantity::new(quantity));
            self.raise_event(DomainEvent::Cart(CartEvent::QuantityChanged {
                product_id: product_id.to_string(),
                quantity,
            }));
        }
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<()> {
        self.quantities
            .remove(product_id)
            .ok_or_else(|| ShopError::CartItemNotFound(product_id.to_string()))?;
        self.raise_event(DomainEvent::Cart(CartEvent::ItemRemoved {
            product_id: product_id.to_string(),
        }));
        self.touch();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
        self.raise_event(DomainEvent::Cart(CartEvent::Cleared));
        self.touch();
    }

    /// Join the quantity map against the catalog. Ids without a catalog
    /// counterpart are skipped.
    pub fn summarize(&self, catalog: &Catalog) -> CartSummary {
        let mut lines = Vec::new();
        let mut item_count: u64 = 0;
        for (id, quantity) in &self.quantities {
            if quantity.is_zero() {
                continue;
            }
            let product = match catalog.get(id) {
                Some(p) => p,
                None => continue,
            };
            item_count += u64::from(quantity.value());
            lines.push(CartLine {
                line_total: product.price.multiply(quantity.value()),
                product: product.clone(),
                quantity: quantity.value(),
            });
        }
        let subtotal = lines
            .iter()
            .fold(Money::default(), |acc, line| acc.add(&line.line_total).unwrap_or(acc));
        CartSummary { lines, subtotal, item_count }
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, e: DomainEvent) {
        self.events.push(e);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// One cart line joined against the catalog.
#[derive(Clone, Debug)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub line_total: Money,
}

/// Cart state after reconciliation: resolvable lines plus their totals.
#[derive(Clone, Debug)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub subtotal: Money,
    pub item_count: u64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
