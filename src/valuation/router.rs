use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;

use crate::catalog::Listing;
use crate::error::AppError;
use crate::forecast::{NeighbourhoodOutlook, PriceScenario, RenovationRoi, TimeToSellEstimate};
use crate::search::SearchCriteria;

use super::domain::ValuationRequest;
use super::service::{ValuationService, ValuationView};

/// Router builder exposing the valuation, search, and forecast endpoints.
/// Input failures surface as 422 responses through [`AppError`].
pub fn api_router(service: Arc<ValuationService>) -> Router {
    Router::new()
        .route("/api/v1/valuations", post(valuation_handler))
        .route("/api/v1/listings/search", post(search_handler))
        .route("/api/v1/listings/undervalued", get(undervalued_handler))
        .route("/api/v1/forecasts/time-to-sell", post(time_to_sell_handler))
        .route("/api/v1/forecasts/scenarios", post(scenarios_handler))
        .route(
            "/api/v1/forecasts/neighbourhood",
            post(neighbourhood_handler),
        )
        .route(
            "/api/v1/forecasts/renovation-roi",
            post(renovation_roi_handler),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct TimeToSellPayload {
    price: f64,
    m2: f64,
}

#[derive(Debug, Deserialize)]
struct ScenarioPayload {
    base_price: f64,
    m2: f64,
    #[serde(default = "default_step_pct")]
    step_pct: u8,
}

fn default_step_pct() -> u8 {
    5
}

#[derive(Debug, Deserialize)]
struct NeighbourhoodPayload {
    address: String,
    years: u32,
}

#[derive(Debug, Deserialize)]
struct RenovationRoiPayload {
    current_price: f64,
    upgrade_cost: f64,
    expected_uplift_pct: f64,
}

async fn valuation_handler(
    State(service): State<Arc<ValuationService>>,
    Json(request): Json<ValuationRequest>,
) -> Result<Json<ValuationView>, AppError> {
    let valuation_date = Local::now().date_naive();
    let view = service.valuate(request, valuation_date)?;
    Ok(Json(view))
}

async fn search_handler(
    State(service): State<Arc<ValuationService>>,
    Json(criteria): Json<SearchCriteria>,
) -> Json<Vec<Listing>> {
    Json(service.search(&criteria))
}

async fn undervalued_handler(State(service): State<Arc<ValuationService>>) -> Json<Vec<Listing>> {
    Json(service.undervalued())
}

async fn time_to_sell_handler(
    State(service): State<Arc<ValuationService>>,
    Json(payload): Json<TimeToSellPayload>,
) -> Result<Json<TimeToSellEstimate>, AppError> {
    let estimate = service.time_to_sell(payload.price, payload.m2)?;
    Ok(Json(estimate))
}

async fn scenarios_handler(
    State(service): State<Arc<ValuationService>>,
    Json(payload): Json<ScenarioPayload>,
) -> Result<Json<Vec<PriceScenario>>, AppError> {
    let scenarios = service.price_scenarios(payload.base_price, payload.m2, payload.step_pct)?;
    Ok(Json(scenarios))
}

async fn neighbourhood_handler(
    State(service): State<Arc<ValuationService>>,
    Json(payload): Json<NeighbourhoodPayload>,
) -> Json<NeighbourhoodOutlook> {
    Json(service.neighbourhood_outlook(&payload.address, payload.years))
}

async fn renovation_roi_handler(
    State(service): State<Arc<ValuationService>>,
    Json(payload): Json<RenovationRoiPayload>,
) -> Result<Json<RenovationRoi>, AppError> {
    let roi = service.renovation_roi(
        payload.current_price,
        payload.upgrade_cost,
        payload.expected_uplift_pct,
    )?;
    Ok(Json(roi))
}
