use crate::catalog::Listing;

/// Mean price-per-m² across listings in the target city.
///
/// Matching is exact on the canonical `city` key; there is no fuzzy matching
/// and no nearest-city fallback. A city with no comparables resolves to the
/// configured citywide reference value rather than an error.
pub fn select_baseline(city: &str, listings: &[Listing], citywide_reference: f64) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for listing in listings.iter().filter(|listing| listing.city == city) {
        sum += listing.price_per_m2;
        count += 1;
    }

    if count == 0 {
        citywide_reference
    } else {
        sum / count as f64
    }
}

/// Number of comparables that would back a baseline for the city. Exposed so
/// reports can qualify how much data an estimate rests on.
pub fn comparable_count(city: &str, listings: &[Listing]) -> usize {
    listings.iter().filter(|listing| listing.city == city).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(city: &str, m2: f64, price: f64) -> Listing {
        Listing {
            id: format!("{city}-{price}"),
            title: format!("Listing in {city}"),
            city: city.to_string(),
            m2,
            floor: 1,
            built: 2000,
            price,
            price_per_m2: price / m2,
            coordinates: None,
        }
    }

    #[test]
    fn baseline_is_the_mean_over_city_matches() {
        let listings = vec![
            listing("Sarajevo", 45.0, 45.0 * 1888.0),
            listing("Sarajevo", 65.0, 65.0 * 1923.0),
            listing("Sarajevo", 28.0, 28.0 * 1500.0),
            listing("Doboj", 95.0, 95.0 * 1000.0),
        ];

        let baseline = select_baseline("Sarajevo", &listings, 1700.0);
        assert!((baseline - 5311.0 / 3.0).abs() < 1e-9);
        assert_eq!(comparable_count("Sarajevo", &listings), 3);
    }

    #[test]
    fn unknown_city_falls_back_to_the_reference_value() {
        let listings = vec![listing("Sarajevo", 45.0, 85_000.0)];

        assert_eq!(select_baseline("Mostar", &listings, 1700.0), 1700.0);
        assert_eq!(select_baseline("Mostar", &[], 1234.5), 1234.5);
        assert_eq!(comparable_count("Mostar", &listings), 0);
    }

    #[test]
    fn matching_is_exact_not_case_insensitive() {
        let listings = vec![listing("Sarajevo", 45.0, 85_000.0)];

        assert_eq!(select_baseline("sarajevo", &listings, 1700.0), 1700.0);
    }
}
