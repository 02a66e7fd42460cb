use serde::{Deserialize, Serialize};

use super::factors::FactorTable;

/// Citywide reference price-per-m² used when a city has no comparables.
pub const DEFAULT_REFERENCE_PRICE_PER_M2: f64 = 1700.0;

/// Default inclusive bounds for the presentation confidence percentage.
pub const DEFAULT_CONFIDENCE_FLOOR: u8 = 65;
pub const DEFAULT_CONFIDENCE_CEILING: u8 = 90;

/// Engine settings: the fallback baseline, confidence bounds, and the
/// multiplier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Fallback baseline when no comparable matches the target city.
    pub reference_price_per_m2: f64,
    pub confidence_floor: u8,
    pub confidence_ceiling: u8,
    pub factors: FactorTable,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            reference_price_per_m2: DEFAULT_REFERENCE_PRICE_PER_M2,
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            confidence_ceiling: DEFAULT_CONFIDENCE_CEILING,
            factors: FactorTable::default(),
        }
    }
}
