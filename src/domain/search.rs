//! Catalog filtering and ordering
//!
//! A pure pipeline over the fixed catalog: text match, category, availability
//! and price bounds, then one ordering. Sorts are stable, so ties keep the
//! featured (catalog) order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Catalog, Product};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Any,
    Pickup,
    Ship,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

/// Criteria read from the storefront controls.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub availability: Availability,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub sort: SortKey,
}

pub fn filter_products<'a>(catalog: &'a Catalog, filter: &ProductFilter) -> Vec<&'a Product> {
    let mut list: Vec<&Product> = catalog.products().iter().collect();

    if let Some(query) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        let needle = query.to_lowercase();
        list.retain(|p| p.search_text().contains(&needle));
    }

    // "all" is the storefront's no-filter category
    if let Some(category) = filter
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "all")
    {
        list.retain(|p| p.category == category);
    }

    match filter.availability {
        Availability::Any => {}
        Availability::Pickup => list.retain(|p| p.pickup_only),
        Availability::Ship => list.retain(|p| !p.pickup_only),
    }

    // non-positive bounds mean "no bound"
    if let Some(min) = filter.min_price.filter(|m| *m > Decimal::ZERO) {
        list.retain(|p| p.price.amount() >= min);
    }
    if let Some(max) = filter.max_price.filter(|m| *m > Decimal::ZERO) {
        list.retain(|p| p.price.amount() <= max);
    }

    match filter.sort {
        SortKey::Featured => {}
        SortKey::PriceAsc => list.sort_by(|a, b| a.price.amount().cmp(&b.price.amount())),
        SortKey::PriceDesc => list.sort_by(|a, b| b.price.amount().cmp(&a.price.amount())),
        SortKey::NameAsc => {
            list.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::seed().unwrap()
    }

    fn ids(list: &[&Product]) -> Vec<String> {
        list.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_no_criteria_returns_featured_order() {
        let catalog = catalog();
        let list = filter_products(&catalog, &ProductFilter::default());
        assert_eq!(ids(&list), vec!["NS-1000", "ZLR-M53", "PVC-10FT", "CON-RISER", "TEST-KIT"]);
    }

    #[test]
    fn test_text_match_covers_title_sku_and_category() {
        let catalog = catalog();
        let by_title = filter_products(
            &catalog,
            &ProductFilter { search: Some("ZOELLER".into()), ..Default::default() },
        );
        assert_eq!(ids(&by_title), vec!["ZLR-M53"]);

        let by_sku = filter_products(
            &catalog,
            &ProductFilter { search: Some("tk-01".into()), ..Default::default() },
        );
        assert_eq!(ids(&by_sku), vec!["TEST-KIT"]);

        let by_category = filter_products(
            &catalog,
            &ProductFilter { search: Some("  tanks  ".into()), ..Default::default() },
        );
        assert_eq!(ids(&by_category), vec!["NS-1000"]);
    }

    #[test]
    fn test_blank_query_matches_everything() {
        let catalog = catalog();
        let list = filter_products(
            &catalog,
            &ProductFilter { search: Some("   ".into()), ..Default::default() },
        );
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_category_filter() {
        let catalog = catalog();
        let list = filter_products(
            &catalog,
            &ProductFilter { category: Some("pipe".into()), ..Default::default() },
        );
        assert_eq!(ids(&list), vec!["PVC-10FT"]);

        let all = filter_products(
            &catalog,
            &ProductFilter { category: Some("all".into()), ..Default::default() },
        );
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_availability_filter() {
        let catalog = catalog();
        let pickup = filter_products(
            &catalog,
            &ProductFilter { availability: Availability::Pickup, ..Default::default() },
        );
        assert_eq!(ids(&pickup), vec!["CON-RISER"]);

        let ship = filter_products(
            &catalog,
            &ProductFilter { availability: Availability::Ship, ..Default::default() },
        );
        assert_eq!(ship.len(), 4);
        assert!(!ids(&ship).contains(&"CON-RISER".to_string()));
    }

    #[test]
    fn test_price_bounds() {
        let catalog = catalog();
        let expensive = filter_products(
            &catalog,
            &ProductFilter { min_price: Some(Decimal::new(100, 0)), ..Default::default() },
        );
        assert_eq!(ids(&expensive), vec!["NS-1000", "ZLR-M53"]);

        let cheap = filter_products(
            &catalog,
            &ProductFilter { max_price: Some(Decimal::new(50, 0)), ..Default::default() },
        );
        assert_eq!(ids(&cheap), vec!["PVC-10FT", "CON-RISER", "TEST-KIT"]);

        let bounded = filter_products(
            &catalog,
            &ProductFilter {
                min_price: Some(Decimal::new(30, 0)),
                max_price: Some(Decimal::new(60, 0)),
                ..Default::default()
            },
        );
        assert_eq!(ids(&bounded), vec!["CON-RISER", "TEST-KIT"]);
    }

    #[test]
    fn test_zero_price_bound_is_ignored() {
        let catalog = catalog();
        let list = filter_products(
            &catalog,
            &ProductFilter {
                min_price: Some(Decimal::ZERO),
                max_price: Some(Decimal::ZERO),
                ..Default::default()
            },
        );
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_bound_is_inclusive() {
        let catalog = catalog();
        let list = filter_products(
            &catalog,
            &ProductFilter {
                min_price: Some(Decimal::new(899, 0)),
                ..Default::default()
            },
        );
        assert_eq!(ids(&list), vec!["NS-1000"]);
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = catalog();
        let asc = filter_products(
            &catalog,
            &ProductFilter { sort: SortKey::PriceAsc, ..Default::default() },
        );
        assert_eq!(ids(&asc), vec!["PVC-10FT", "TEST-KIT", "CON-RISER", "ZLR-M53", "NS-1000"]);

        let desc = filter_products(
            &catalog,
            &ProductFilter { sort: SortKey::PriceDesc, ..Default::default() },
        );
        assert_eq!(ids(&desc), vec!["NS-1000", "ZLR-M53", "CON-RISER", "TEST-KIT", "PVC-10FT"]);
    }

    #[test]
    fn test_sort_by_name() {
        let catalog = catalog();
        let list = filter_products(
            &catalog,
            &ProductFilter { sort: SortKey::NameAsc, ..Default::default() },
        );
        assert_eq!(ids(&list), vec!["CON-RISER", "NS-1000", "PVC-10FT", "TEST-KIT", "ZLR-M53"]);
    }

    #[test]
    fn test_filters_compose() {
        let catalog = catalog();
        let list = filter_products(
            &catalog,
            &ProductFilter {
                availability: Availability::Ship,
                max_price: Some(Decimal::new(50, 0)),
                sort: SortKey::PriceAsc,
                ..Default::default()
            },
        );
        assert_eq!(ids(&list), vec!["PVC-10FT", "TEST-KIT"]);
    }
}
