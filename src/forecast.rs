//! Closed-form market forecasts layered over the same listing economics as
//! the valuation engine.
//!
//! Each forecast is a documented heuristic plus bounded noise from a
//! seedable generator; none of them read or influence the valuation
//! pipeline, and none of them are statistical models.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const MIN_DAYS_ON_MARKET: f64 = 2.0;
const MIN_SELL_PROBABILITY: f64 = 5.0;
const SCENARIO_DELTA_RANGE_PCT: i32 = 20;

/// Errors raised while validating forecast input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    #[error("area must be a positive number of m², got {0}")]
    NonPositiveArea(f64),
    #[error("upgrade cost must be positive, got {0}")]
    NonPositiveCost(f64),
    #[error("price must be a finite non-negative number, got {0}")]
    InvalidPrice(f64),
}

/// Expected days on market for a listing at the given price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeToSellEstimate {
    pub days: u32,
}

/// One pricing scenario from the optimization sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceScenario {
    pub price: f64,
    pub sell_probability: u8,
    pub est_days: u32,
}

/// Multi-year neighbourhood price outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighbourhoodOutlook {
    pub address: String,
    pub years: u32,
    pub change_pct: i32,
    pub drivers: String,
}

/// Renovation payoff summary. Fully deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenovationRoi {
    pub new_price: f64,
    pub profit: f64,
    pub roi_pct: i64,
}

/// Forecast heuristics sharing one noise source and the citywide median
/// price-per-m².
#[derive(Debug)]
pub struct ForecastModel {
    rng: Mutex<StdRng>,
    median_price_per_m2: f64,
}

impl ForecastModel {
    pub fn new(median_price_per_m2: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), median_price_per_m2)
    }

    /// Model with a pinned noise sequence, for reproducible runs.
    pub fn seeded(median_price_per_m2: f64, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), median_price_per_m2)
    }

    fn with_rng(rng: StdRng, median_price_per_m2: f64) -> Self {
        Self {
            rng: Mutex::new(rng),
            median_price_per_m2,
        }
    }

    fn noise(&self, span: f64) -> f64 {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(0.0..span)
    }

    /// Days a listing is expected to sit on the market: cheaper relative to
    /// the citywide median sells faster, floored at two days.
    pub fn time_to_sell(&self, price: f64, m2: f64) -> Result<TimeToSellEstimate, ForecastError> {
        validate_area(m2)?;
        validate_price(price)?;

        let per_m2 = (price / m2).round();
        let ratio = per_m2 / self.median_price_per_m2;
        let days = (10.0 + (ratio - 1.0) * 40.0 + self.noise(10.0))
            .round()
            .max(MIN_DAYS_ON_MARKET);

        Ok(TimeToSellEstimate { days: days as u32 })
    }

    /// Sweeps asking-price deltas of ±20% in `step_pct` increments and
    /// reports how each price point trades selling probability against time
    /// on market. Steps below 1% are clamped to 1%.
    pub fn price_scenarios(
        &self,
        base_price: f64,
        m2: f64,
        step_pct: u8,
    ) -> Result<Vec<PriceScenario>, ForecastError> {
        validate_area(m2)?;
        validate_price(base_price)?;

        let step = i32::from(step_pct.max(1));
        let mut scenarios = Vec::new();

        let mut delta = -SCENARIO_DELTA_RANGE_PCT;
        while delta <= SCENARIO_DELTA_RANGE_PCT {
            let price = (base_price * (1.0 + f64::from(delta) / 100.0)).round();
            let pressure = price / m2 / self.median_price_per_m2 - 1.0;

            let sell_probability = (100.0 - pressure * 60.0 + self.noise(10.0))
                .round()
                .max(MIN_SELL_PROBABILITY);
            let est_days = (7.0 + pressure * 50.0 + self.noise(20.0))
                .round()
                .max(MIN_DAYS_ON_MARKET);

            scenarios.push(PriceScenario {
                price,
                sell_probability: sell_probability.min(f64::from(u8::MAX)) as u8,
                est_days: est_days as u32,
            });

            delta += step;
        }

        Ok(scenarios)
    }

    /// Multi-year outlook for an address. The driver narrative and the
    /// swing direction come from one draw so they stay consistent.
    pub fn neighbourhood_outlook(&self, address: &str, years: u32) -> NeighbourhoodOutlook {
        let draw = self.noise(1.0);
        let change_pct = ((draw - 0.3) * 10.0 + f64::from(years) * 1.2).round() as i32;
        let drivers = if draw > 0.6 {
            "New tram line & park planned"
        } else if draw > 0.35 {
            "Planned commercial project"
        } else {
            "Road upgrade and school nearby"
        };

        NeighbourhoodOutlook {
            address: address.to_string(),
            years,
            change_pct,
            drivers: drivers.to_string(),
        }
    }

    /// Renovation payoff at an expected uplift percentage. Deterministic;
    /// the only guard is a positive upgrade cost.
    pub fn renovation_roi(
        &self,
        current_price: f64,
        upgrade_cost: f64,
        uplift_pct: f64,
    ) -> Result<RenovationRoi, ForecastError> {
        validate_price(current_price)?;
        if !upgrade_cost.is_finite() || upgrade_cost <= 0.0 {
            return Err(ForecastError::NonPositiveCost(upgrade_cost));
        }

        let new_price = (current_price * (1.0 + uplift_pct / 100.0)).round();
        let profit = new_price - current_price - upgrade_cost;
        let roi_pct = (profit / upgrade_cost * 100.0).round() as i64;

        Ok(RenovationRoi {
            new_price,
            profit,
            roi_pct,
        })
    }
}

fn validate_area(m2: f64) -> Result<(), ForecastError> {
    if !m2.is_finite() || m2 <= 0.0 {
        return Err(ForecastError::NonPositiveArea(m2));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ForecastError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ForecastError::InvalidPrice(price));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ForecastModel {
        ForecastModel::seeded(1700.0, 99)
    }

    #[test]
    fn time_to_sell_is_floored_at_two_days() {
        let model = model();

        // Price of zero pushes the raw formula deep below the floor.
        let estimate = model.time_to_sell(0.0, 45.0).expect("estimate succeeds");
        assert_eq!(estimate.days, 2);
    }

    #[test]
    fn overpriced_listings_sit_longer_than_median_priced_ones() {
        // Noise spans 10 days, so compare points far enough apart that the
        // ordering cannot be swamped.
        let model = model();

        let at_median = model
            .time_to_sell(1700.0 * 45.0, 45.0)
            .expect("estimate succeeds");
        let double_median = model
            .time_to_sell(2.0 * 1700.0 * 45.0, 45.0)
            .expect("estimate succeeds");

        assert!(double_median.days > at_median.days + 10);
    }

    #[test]
    fn seeded_models_reproduce_forecasts() {
        let a = ForecastModel::seeded(1700.0, 7);
        let b = ForecastModel::seeded(1700.0, 7);

        assert_eq!(
            a.time_to_sell(85_000.0, 45.0).expect("estimate succeeds"),
            b.time_to_sell(85_000.0, 45.0).expect("estimate succeeds")
        );
        assert_eq!(
            a.price_scenarios(85_000.0, 45.0, 5).expect("sweep succeeds"),
            b.price_scenarios(85_000.0, 45.0, 5).expect("sweep succeeds")
        );
    }

    #[test]
    fn scenario_sweep_covers_the_full_delta_range() {
        let model = model();

        let scenarios = model
            .price_scenarios(85_000.0, 45.0, 5)
            .expect("sweep succeeds");

        // -20, -15, ..., +20
        assert_eq!(scenarios.len(), 9);
        assert_eq!(scenarios[0].price, 68_000.0);
        assert_eq!(scenarios[8].price, 102_000.0);
        assert!(scenarios
            .iter()
            .all(|scenario| scenario.sell_probability >= 5 && scenario.est_days >= 2));
    }

    #[test]
    fn scenario_step_is_clamped_to_one_percent() {
        let model = model();

        let scenarios = model
            .price_scenarios(85_000.0, 45.0, 0)
            .expect("sweep succeeds");
        assert_eq!(scenarios.len(), 41);
    }

    #[test]
    fn neighbourhood_outlook_scales_with_the_horizon() {
        let model = model();

        let outlook = model.neighbourhood_outlook("Ilidža, Sarajevo", 3);
        assert_eq!(outlook.years, 3);
        assert!(!outlook.drivers.is_empty());
        // Draw is in [0, 1), so the swing is bounded by the formula.
        assert!(outlook.change_pct >= -3 && outlook.change_pct <= 11);
    }

    #[test]
    fn renovation_roi_matches_the_worked_example() {
        let model = model();

        let roi = model
            .renovation_roi(85_000.0, 3_000.0, 5.0)
            .expect("roi computes");

        assert_eq!(roi.new_price, 89_250.0);
        assert_eq!(roi.profit, 1_250.0);
        assert_eq!(roi.roi_pct, 42);
    }

    #[test]
    fn renovation_roi_rejects_non_positive_cost() {
        let model = model();

        assert!(matches!(
            model.renovation_roi(85_000.0, 0.0, 5.0),
            Err(ForecastError::NonPositiveCost(_))
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let model = model();

        assert!(matches!(
            model.time_to_sell(85_000.0, 0.0),
            Err(ForecastError::NonPositiveArea(_))
        ));
        assert!(matches!(
            model.time_to_sell(f64::NAN, 45.0),
            Err(ForecastError::InvalidPrice(_))
        ));
        assert!(matches!(
            model.price_scenarios(-1.0, 45.0, 5),
            Err(ForecastError::InvalidPrice(_))
        ));
    }
}
