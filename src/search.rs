//! Browse-side filtering over the listing catalog.
//!
//! Independent of the valuation pipeline: filters read the catalog and
//! nothing here feeds the estimator.

use serde::{Deserialize, Serialize};

use crate::catalog::Listing;
use crate::valuation::rating::GOOD_VALUE_CEILING_PER_M2;

/// Conjunctive browse criteria. Absent or blank fields impose no
/// constraint; area bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub min_m2: Option<f64>,
    #[serde(default)]
    pub max_m2: Option<f64>,
}

impl SearchCriteria {
    fn matches(&self, listing: &Listing) -> bool {
        if let Some(city) = self.city.as_deref().map(str::trim) {
            if !city.is_empty() && listing.city != city {
                return false;
            }
        }
        if let Some(min) = self.min_m2 {
            if listing.m2 < min {
                return false;
            }
        }
        if let Some(max) = self.max_m2 {
            if listing.m2 > max {
                return false;
            }
        }
        if let Some(query) = self.query.as_deref().map(str::trim) {
            if !query.is_empty()
                && !listing
                    .title
                    .to_lowercase()
                    .contains(&query.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Filters listings by the criteria, preserving catalog order.
pub fn search_listings(listings: &[Listing], criteria: &SearchCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect()
}

/// Listings priced below the shared good-value ceiling.
pub fn undervalued_listings(listings: &[Listing]) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| listing.price_per_m2 < GOOD_VALUE_CEILING_PER_M2)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ListingCatalog;

    fn catalog() -> ListingCatalog {
        ListingCatalog::seed()
    }

    #[test]
    fn city_filter_is_exact() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            city: Some("Sarajevo".to_string()),
            ..SearchCriteria::default()
        };

        let results = search_listings(catalog.listings(), &criteria);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|listing| listing.city == "Sarajevo"));
    }

    #[test]
    fn unknown_city_matches_nothing() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            city: Some("Mostar".to_string()),
            ..SearchCriteria::default()
        };

        assert!(search_listings(catalog.listings(), &criteria).is_empty());
        assert!(search_listings(&[], &criteria).is_empty());
    }

    #[test]
    fn area_bounds_are_inclusive() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            min_m2: Some(28.0),
            max_m2: Some(65.0),
            ..SearchCriteria::default()
        };

        let results = search_listings(catalog.listings(), &criteria);
        let ids: Vec<&str> = results.iter().map(|listing| listing.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn title_query_is_case_insensitive_substring() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            query: Some("ilidža".to_string()),
            ..SearchCriteria::default()
        };

        let results = search_listings(catalog.listings(), &criteria);
        let ids: Vec<&str> = results.iter().map(|listing| listing.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn blank_fields_impose_no_constraint() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            query: Some("   ".to_string()),
            city: Some(String::new()),
            ..SearchCriteria::default()
        };

        assert_eq!(
            search_listings(catalog.listings(), &criteria).len(),
            catalog.len()
        );
    }

    #[test]
    fn predicates_are_conjunctive_and_order_is_preserved() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            query: Some("apartment".to_string()),
            city: Some("Sarajevo".to_string()),
            min_m2: Some(20.0),
            max_m2: Some(120.0),
            ..SearchCriteria::default()
        };

        let results = search_listings(catalog.listings(), &criteria);
        let ids: Vec<&str> = results.iter().map(|listing| listing.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = catalog();
        let criteria = SearchCriteria {
            city: Some("Sarajevo".to_string()),
            min_m2: Some(30.0),
            ..SearchCriteria::default()
        };

        let once = search_listings(catalog.listings(), &criteria);
        let twice = search_listings(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn undervalued_uses_the_shared_ceiling() {
        let catalog = catalog();

        let deals = undervalued_listings(catalog.listings());
        let ids: Vec<&str> = deals.iter().map(|listing| listing.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p4"]);
        assert!(deals
            .iter()
            .all(|listing| listing.price_per_m2 < GOOD_VALUE_CEILING_PER_M2));
    }
}
