use serde::{Deserialize, Serialize};

/// Upper bound of the "Good Value" tier, and the ceiling used by the
/// undervalued-listing scan. The two are deliberately one constant.
pub const GOOD_VALUE_CEILING_PER_M2: f64 = 1600.0;

const EXCELLENT_CEILING_PER_M2: f64 = 1400.0;
const FAIR_CEILING_PER_M2: f64 = 1800.0;
const ABOVE_MARKET_CEILING_PER_M2: f64 = 2000.0;

/// Qualitative tier for an adjusted price-per-m².
///
/// Tiers partition the price axis with inclusive lower and exclusive upper
/// bounds; the top tier is unbounded, so classification is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueRating {
    #[serde(rename = "Excellent Value")]
    ExcellentValue,
    #[serde(rename = "Good Value")]
    GoodValue,
    #[serde(rename = "Fair Value")]
    FairValue,
    #[serde(rename = "Above Market")]
    AboveMarket,
    Overpriced,
}

impl ValueRating {
    pub fn classify(price_per_m2: f64) -> Self {
        if price_per_m2 < EXCELLENT_CEILING_PER_M2 {
            Self::ExcellentValue
        } else if price_per_m2 < GOOD_VALUE_CEILING_PER_M2 {
            Self::GoodValue
        } else if price_per_m2 < FAIR_CEILING_PER_M2 {
            Self::FairValue
        } else if price_per_m2 < ABOVE_MARKET_CEILING_PER_M2 {
            Self::AboveMarket
        } else {
            Self::Overpriced
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ExcellentValue => "Excellent Value",
            Self::GoodValue => "Good Value",
            Self::FairValue => "Fair Value",
            Self::AboveMarket => "Above Market",
            Self::Overpriced => "Overpriced",
        }
    }

    /// Badge color hint for the UI collaborator.
    pub const fn display_color(self) -> &'static str {
        match self {
            Self::ExcellentValue => "emerald",
            Self::GoodValue => "green",
            Self::FairValue => "slate",
            Self::AboveMarket => "amber",
            Self::Overpriced => "red",
        }
    }
}
