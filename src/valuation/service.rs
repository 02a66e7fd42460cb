use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Listing, ListingCatalog};
use crate::forecast::{
    ForecastError, ForecastModel, NeighbourhoodOutlook, PriceScenario, RenovationRoi,
    TimeToSellEstimate,
};
use crate::search::{search_listings, undervalued_listings, SearchCriteria};

use super::comparables::comparable_count;
use super::config::ValuationConfig;
use super::domain::{ValuationError, ValuationRequest, ValuationResult};
use super::engine::ValuationEngine;
use super::intake;

/// Facade wiring the listing catalog, valuation engine, and forecast model
/// for the HTTP and CLI surfaces.
pub struct ValuationService {
    catalog: Arc<ListingCatalog>,
    engine: ValuationEngine,
    forecaster: ForecastModel,
}

impl ValuationService {
    pub fn new(catalog: Arc<ListingCatalog>, config: ValuationConfig) -> Self {
        let forecaster = ForecastModel::new(config.reference_price_per_m2);
        Self {
            catalog,
            engine: ValuationEngine::new(config),
            forecaster,
        }
    }

    /// Service with pinned random sequences, for reproducible runs.
    pub fn seeded(catalog: Arc<ListingCatalog>, config: ValuationConfig, seed: u64) -> Self {
        let forecaster = ForecastModel::seeded(config.reference_price_per_m2, seed);
        Self {
            catalog,
            engine: ValuationEngine::seeded(config, seed),
            forecaster,
        }
    }

    pub fn catalog(&self) -> &ListingCatalog {
        &self.catalog
    }

    /// Validates the raw request and produces a valuation view.
    pub fn valuate(
        &self,
        request: ValuationRequest,
        valuation_date: NaiveDate,
    ) -> Result<ValuationView, ServiceError> {
        let attrs = intake::attributes_from_request(request)?;
        let comparables = self.catalog.listings();
        let result = self.engine.estimate(&attrs, comparables, valuation_date)?;

        let comparable_listings = comparable_count(&attrs.city, comparables);
        debug!(
            city = %attrs.city,
            comparables = comparable_listings,
            per_m2 = result.estimated_price_per_m2,
            "valuation produced"
        );

        Ok(ValuationView::compose(
            attrs.city,
            comparable_listings,
            result,
        ))
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Listing> {
        search_listings(self.catalog.listings(), criteria)
    }

    pub fn undervalued(&self) -> Vec<Listing> {
        undervalued_listings(self.catalog.listings())
    }

    pub fn time_to_sell(&self, price: f64, m2: f64) -> Result<TimeToSellEstimate, ServiceError> {
        Ok(self.forecaster.time_to_sell(price, m2)?)
    }

    pub fn price_scenarios(
        &self,
        base_price: f64,
        m2: f64,
        step_pct: u8,
    ) -> Result<Vec<PriceScenario>, ServiceError> {
        Ok(self.forecaster.price_scenarios(base_price, m2, step_pct)?)
    }

    pub fn neighbourhood_outlook(&self, address: &str, years: u32) -> NeighbourhoodOutlook {
        self.forecaster.neighbourhood_outlook(address, years)
    }

    pub fn renovation_roi(
        &self,
        current_price: f64,
        upgrade_cost: f64,
        uplift_pct: f64,
    ) -> Result<RenovationRoi, ServiceError> {
        Ok(self
            .forecaster
            .renovation_roi(current_price, upgrade_cost, uplift_pct)?)
    }
}

/// Error raised by the service facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Valuation(#[from] ValuationError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

/// Wire-facing valuation summary returned to the UI collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationView {
    pub city: String,
    pub comparables: usize,
    pub estimated_price: f64,
    pub estimated_price_per_m2: f64,
    pub confidence: u8,
    pub rating: &'static str,
    pub rating_color: &'static str,
}

impl ValuationView {
    fn compose(city: String, comparables: usize, result: ValuationResult) -> Self {
        Self {
            city,
            comparables,
            estimated_price: result.estimated_price,
            estimated_price_per_m2: result.estimated_price_per_m2,
            confidence: result.confidence,
            rating: result.rating.label(),
            rating_color: result.rating.display_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ValuationService {
        ValuationService::seeded(
            Arc::new(ListingCatalog::seed()),
            ValuationConfig::default(),
            17,
        )
    }

    fn request() -> ValuationRequest {
        ValuationRequest {
            city: "Sarajevo".to_string(),
            m2: 50.0,
            level: 2,
            built: 2023,
            condition: "Newly Built".to_string(),
            property_type: "Apartment".to_string(),
            heating: "Central Heating".to_string(),
            equipment: "Fully Furnished".to_string(),
            orientation: "South".to_string(),
            amenities: Vec::new(),
            coordinates: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
    }

    #[test]
    fn valuate_reports_city_and_comparable_count() {
        let view = service()
            .valuate(request(), date())
            .expect("valuation succeeds");

        assert_eq!(view.city, "Sarajevo");
        assert_eq!(view.comparables, 3);
        assert_eq!(
            view.estimated_price,
            view.estimated_price_per_m2 * 50.0
        );
        assert!(!view.rating.is_empty());
    }

    #[test]
    fn intake_failures_surface_as_valuation_errors() {
        let mut bad = request();
        bad.orientation = "Up".to_string();

        assert!(matches!(
            service().valuate(bad, date()),
            Err(ServiceError::Valuation(ValuationError::UnknownCategory {
                field: "orientation",
                ..
            }))
        ));
    }

    #[test]
    fn forecast_failures_surface_as_forecast_errors() {
        assert!(matches!(
            service().time_to_sell(85_000.0, 0.0),
            Err(ServiceError::Forecast(ForecastError::NonPositiveArea(_)))
        ));
    }
}
