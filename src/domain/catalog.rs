//! Product catalog
//!
//! The shop carries a fixed set of products defined here; replace the seed
//! data or feed it from a CMS/API when ready.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Money, Sku};
use crate::Result;
use rust_decimal::Decimal;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: Money,
    pub category: String,
    pub sku: Sku,
    pub image: String,
    pub pickup_only: bool,
}

impl Product {
    /// Lowercased text the search box matches against.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.sku, self.category).to_lowercase()
    }
}

/// The fixed product list. Order is the "featured" order.
#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The stock Palmetto Septic Supplies catalog.
    pub fn seed() -> Result<Self> {
        Ok(Self::new(vec![
            entry(
                "NS-1000",
                "Norwesco 1000 Gal Septic Tank (Poly)",
                89900,
                "tanks",
                "NW-1000",
                "https://images.unsplash.com/photo-1505576391880-9d4f5e1e9a56?w=900&q=60&auto=format&fit=crop",
                false,
            )?,
            entry(
                "ZLR-M53",
                "Zoeller M53 Effluent Pump (1/3 HP)",
                21900,
                "pumps",
                "ZLR-M53",
                "https://images.unsplash.com/photo-1593529467225-7f6b2a5a8d38?w=900&q=60&auto=format&fit=crop",
                false,
            )?,
            entry(
                "PVC-10FT",
                "PVC Schedule 40 — 10ft (1\")",
                2100,
                "pipe",
                "PVC-1-10",
                "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=900&q=60&auto=format&fit=crop",
                false,
            )?,
            entry(
                "CON-RISER",
                "Concrete Riser — 18in",
                4900,
                "field",
                "CR-18",
                "https://images.unsplash.com/photo-1560264280-ecf3f7b3f3b8?w=900&q=60&auto=format&fit=crop",
                true,
            )?,
            entry(
                "TEST-KIT",
                "Septic System Test Kit",
                3900,
                "tools",
                "TK-01",
                "https://images.unsplash.com/photo-1523731407965-2430cd12f5e4?w=900&q=60&auto=format&fit=crop",
                false,
            )?,
        ]))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct category names in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn entry(
    id: &str,
    title: &str,
    price_cents: i64,
    category: &str,
    sku: &str,
    image: &str,
    pickup_only: bool,
) -> Result<Product> {
    Ok(Product {
        id: id.to_string(),
        title: title.to_string(),
        price: Money::usd(Decimal::new(price_cents, 2)),
        category: category.to_string(),
        sku: Sku::new(sku)?,
        image: image.to_string(),
        pickup_only,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.len(), 5);
        let tank = catalog.get("NS-1000").unwrap();
        assert_eq!(tank.price.to_string(), "$899.00");
        assert!(!tank.pickup_only);
        assert!(catalog.get("CON-RISER").unwrap().pickup_only);
        assert!(catalog.get("NO-SUCH").is_none());
    }

    #[test]
    fn test_categories_in_featured_order() {
        let catalog = Catalog::seed().unwrap();
        assert_eq!(catalog.categories(), vec!["tanks", "pumps", "pipe", "field", "tools"]);
    }

    #[test]
    fn test_search_text() {
        let catalog = Catalog::seed().unwrap();
        let pump = catalog.get("ZLR-M53").unwrap();
        assert!(pump.search_text().contains("zoeller"));
        assert!(pump.search_text().contains("zlr-m53"));
        assert!(pump.search_text().contains("pumps"));
    }
}
