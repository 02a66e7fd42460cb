use chrono::NaiveDate;

use crate::catalog::Listing;

use super::comparables::select_baseline;
use super::config::ValuationConfig;
use super::confidence::ConfidenceEstimator;
use super::domain::{PropertyAttributes, ValuationError, ValuationResult};
use super::rating::ValueRating;

/// Stateless estimator composing the comparable baseline, the factor table,
/// the confidence source, and the value rating.
///
/// Price fields are deterministic for fixed inputs and table; only the
/// confidence percentage varies between calls.
pub struct ValuationEngine {
    config: ValuationConfig,
    confidence: ConfidenceEstimator,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Self {
        let confidence =
            ConfidenceEstimator::new(config.confidence_floor, config.confidence_ceiling);
        Self { config, confidence }
    }

    /// Engine with a pinned confidence sequence, for reproducible runs.
    pub fn seeded(config: ValuationConfig, seed: u64) -> Self {
        let confidence =
            ConfidenceEstimator::seeded(seed, config.confidence_floor, config.confidence_ceiling);
        Self { config, confidence }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Produces an estimate for the target against the given comparables.
    ///
    /// Rounding happens exactly once, at the price-per-m² stage; the total
    /// is that rounded figure times the area, so the two output fields stay
    /// consistent by construction.
    pub fn estimate(
        &self,
        attrs: &PropertyAttributes,
        comparables: &[Listing],
        valuation_date: NaiveDate,
    ) -> Result<ValuationResult, ValuationError> {
        if !attrs.m2.is_finite() || attrs.m2 <= 0.0 {
            return Err(ValuationError::InvalidInput {
                reason: format!("area must be a positive number of m², got {}", attrs.m2),
            });
        }

        let baseline = select_baseline(
            &attrs.city,
            comparables,
            self.config.reference_price_per_m2,
        );
        let adjusted = self.config.factors.adjust(baseline, attrs, valuation_date);

        let estimated_price_per_m2 = adjusted.round();
        let estimated_price = estimated_price_per_m2 * attrs.m2;

        Ok(ValuationResult {
            estimated_price,
            estimated_price_per_m2,
            confidence: self.confidence.sample(),
            rating: ValueRating::classify(estimated_price_per_m2),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::valuation::domain::{Condition, Equipment, Heating, Orientation, PropertyType};

    fn comparables() -> Vec<Listing> {
        // Prices chosen so price/m2 is exactly the intended per-m² figure.
        [(45.0, 1888.0), (65.0, 1923.0), (28.0, 1500.0)]
            .into_iter()
            .enumerate()
            .map(|(index, (m2, per_m2))| Listing {
                id: format!("s{index}"),
                title: format!("Comparable {index}"),
                city: "Sarajevo".to_string(),
                m2,
                floor: 2,
                built: 2005,
                price: m2 * per_m2,
                price_per_m2: per_m2,
                coordinates: None,
            })
            .collect()
    }

    fn attrs() -> PropertyAttributes {
        PropertyAttributes {
            city: "Sarajevo".to_string(),
            m2: 50.0,
            level: 2,
            built: 2023,
            condition: Condition::NewlyBuilt,
            property_type: PropertyType::Apartment,
            heating: Heating::Central,
            equipment: Equipment::Furnished,
            orientation: Orientation::South,
            amenities: BTreeSet::new(),
            coordinates: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
    }

    #[test]
    fn worked_example_produces_the_exact_product() {
        let engine = ValuationEngine::seeded(ValuationConfig::default(), 11);

        let result = engine
            .estimate(&attrs(), &comparables(), date())
            .expect("estimate succeeds");

        assert_eq!(result.estimated_price_per_m2, 2789.0);
        assert_eq!(result.estimated_price, 139_450.0);
        assert_eq!(result.rating, ValueRating::Overpriced);
        assert!((65..=90).contains(&result.confidence));
    }

    #[test]
    fn price_fields_are_deterministic_across_calls() {
        let engine = ValuationEngine::seeded(ValuationConfig::default(), 3);

        let first = engine
            .estimate(&attrs(), &comparables(), date())
            .expect("estimate succeeds");
        let second = engine
            .estimate(&attrs(), &comparables(), date())
            .expect("estimate succeeds");

        assert_eq!(first.estimated_price, second.estimated_price);
        assert_eq!(
            first.estimated_price_per_m2,
            second.estimated_price_per_m2
        );
    }

    #[test]
    fn total_price_is_exactly_per_m2_times_area() {
        let engine = ValuationEngine::seeded(ValuationConfig::default(), 5);

        for m2 in [23.0, 40.0, 61.5, 100.0, 140.0] {
            let mut target = attrs();
            target.m2 = m2;
            let result = engine
                .estimate(&target, &comparables(), date())
                .expect("estimate succeeds");
            assert_eq!(
                result.estimated_price,
                result.estimated_price_per_m2 * m2
            );
        }
    }

    #[test]
    fn larger_area_increases_total_price_at_fixed_per_m2() {
        let engine = ValuationEngine::seeded(ValuationConfig::default(), 5);

        // Both areas share the mid size bucket, so per-m² stays fixed.
        let mut small = attrs();
        small.m2 = 55.0;
        let mut large = attrs();
        large.m2 = 80.0;

        let small_result = engine
            .estimate(&small, &comparables(), date())
            .expect("estimate succeeds");
        let large_result = engine
            .estimate(&large, &comparables(), date())
            .expect("estimate succeeds");

        assert_eq!(
            small_result.estimated_price_per_m2,
            large_result.estimated_price_per_m2
        );
        assert!(large_result.estimated_price > small_result.estimated_price);
    }

    #[test]
    fn unknown_city_uses_the_reference_baseline() {
        let engine = ValuationEngine::seeded(ValuationConfig::default(), 9);

        let mut target = attrs();
        target.city = "Mostar".to_string();
        let with_comparables = engine
            .estimate(&target, &comparables(), date())
            .expect("estimate succeeds");
        let with_empty_store = engine
            .estimate(&target, &[], date())
            .expect("estimate succeeds");

        assert_eq!(
            with_comparables.estimated_price_per_m2,
            with_empty_store.estimated_price_per_m2
        );
    }

    #[test]
    fn non_positive_area_is_rejected() {
        let engine = ValuationEngine::seeded(ValuationConfig::default(), 2);

        let mut target = attrs();
        target.m2 = -10.0;

        assert!(matches!(
            engine.estimate(&target, &comparables(), date()),
            Err(ValuationError::InvalidInput { .. })
        ));
    }
}
