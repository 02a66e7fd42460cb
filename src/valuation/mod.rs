//! Comparable-based valuation: baseline selection, feature multipliers,
//! confidence, and value rating, behind one service facade.

pub mod comparables;
pub mod config;
pub mod confidence;
pub mod domain;
pub mod engine;
pub(crate) mod factors;
pub mod intake;
pub mod rating;
pub mod router;
pub mod service;

pub use comparables::{comparable_count, select_baseline};
pub use config::{
    ValuationConfig, DEFAULT_CONFIDENCE_CEILING, DEFAULT_CONFIDENCE_FLOOR,
    DEFAULT_REFERENCE_PRICE_PER_M2,
};
pub use confidence::ConfidenceEstimator;
pub use domain::{
    Amenity, Condition, Equipment, Heating, Orientation, PropertyAttributes, PropertyType,
    ValuationError, ValuationRequest, ValuationResult,
};
pub use engine::ValuationEngine;
pub use factors::FactorTable;
pub use rating::{ValueRating, GOOD_VALUE_CEILING_PER_M2};
pub use router::api_router;
pub use service::{ServiceError, ValuationService, ValuationView};
