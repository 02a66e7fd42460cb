use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::GeoPoint;

/// Renovation state of the target property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Newly Built")]
    NewlyBuilt,
    Renovated,
    #[serde(rename = "In Good Condition")]
    Good,
    #[serde(rename = "Needs Renovation")]
    NeedsRenovation,
}

impl Condition {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Newly Built" => Some(Self::NewlyBuilt),
            "Renovated" => Some(Self::Renovated),
            "In Good Condition" => Some(Self::Good),
            "Needs Renovation" => Some(Self::NeedsRenovation),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NewlyBuilt => "Newly Built",
            Self::Renovated => "Renovated",
            Self::Good => "In Good Condition",
            Self::NeedsRenovation => "Needs Renovation",
        }
    }
}

/// Advertised property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    #[serde(rename = "Commercial Property")]
    CommercialProperty,
    Office,
    #[serde(rename = "Vacation Home")]
    VacationHome,
}

impl PropertyType {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Apartment" => Some(Self::Apartment),
            "House" => Some(Self::House),
            "Commercial Property" => Some(Self::CommercialProperty),
            "Office" => Some(Self::Office),
            "Vacation Home" => Some(Self::VacationHome),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::CommercialProperty => "Commercial Property",
            Self::Office => "Office",
            Self::VacationHome => "Vacation Home",
        }
    }
}

/// Installed heating source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Heating {
    #[serde(rename = "Central Heating")]
    Central,
    Gas,
    #[serde(rename = "Electric Heating")]
    Electric,
    #[serde(rename = "Solid Fuel")]
    SolidFuel,
    #[serde(rename = "Floor Heating")]
    FloorHeating,
    #[serde(rename = "Heat Pump")]
    HeatPump,
}

impl Heating {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Central Heating" => Some(Self::Central),
            "Gas" => Some(Self::Gas),
            "Electric Heating" => Some(Self::Electric),
            "Solid Fuel" => Some(Self::SolidFuel),
            "Floor Heating" => Some(Self::FloorHeating),
            "Heat Pump" => Some(Self::HeatPump),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Central => "Central Heating",
            Self::Gas => "Gas",
            Self::Electric => "Electric Heating",
            Self::SolidFuel => "Solid Fuel",
            Self::FloorHeating => "Floor Heating",
            Self::HeatPump => "Heat Pump",
        }
    }
}

/// Furnishing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Equipment {
    #[serde(rename = "Fully Furnished")]
    Furnished,
    #[serde(rename = "Semi-furnished")]
    SemiFurnished,
    Unfurnished,
}

impl Equipment {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Fully Furnished" => Some(Self::Furnished),
            "Semi-furnished" => Some(Self::SemiFurnished),
            "Unfurnished" => Some(Self::Unfurnished),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Furnished => "Fully Furnished",
            Self::SemiFurnished => "Semi-furnished",
            Self::Unfurnished => "Unfurnished",
        }
    }
}

/// Facade orientation, cardinal and intercardinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    North,
    South,
    East,
    West,
    #[serde(rename = "North-East")]
    NorthEast,
    #[serde(rename = "North-West")]
    NorthWest,
    #[serde(rename = "South-East")]
    SouthEast,
    #[serde(rename = "South-West")]
    SouthWest,
}

impl Orientation {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "North" => Some(Self::North),
            "South" => Some(Self::South),
            "East" => Some(Self::East),
            "West" => Some(Self::West),
            "North-East" => Some(Self::NorthEast),
            "North-West" => Some(Self::NorthWest),
            "South-East" => Some(Self::SouthEast),
            "South-West" => Some(Self::SouthWest),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::South => "South",
            Self::East => "East",
            Self::West => "West",
            Self::NorthEast => "North-East",
            Self::NorthWest => "North-West",
            Self::SouthEast => "South-East",
            Self::SouthWest => "South-West",
        }
    }

    /// True for any south-facing variant (S, SE, SW).
    pub const fn faces_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    /// True for any north-facing variant (N, NE, NW).
    pub const fn faces_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }
}

/// Boolean amenity flags captured on the entry form. Utility hookups are
/// tracked for display but carry no price premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Amenity {
    Garage,
    Elevator,
    Water,
    Electricity,
    Gas,
    Internet,
    ParkingCircle,
    Balcony,
    Terrace,
    RegisteredInLandRegistry,
    Alarm,
    VideoSurveillance,
}

impl Amenity {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Garage" => Some(Self::Garage),
            "Elevator" => Some(Self::Elevator),
            "Water" => Some(Self::Water),
            "Electricity" => Some(Self::Electricity),
            "Gas" => Some(Self::Gas),
            "Internet" => Some(Self::Internet),
            "ParkingCircle" => Some(Self::ParkingCircle),
            "Balcony" => Some(Self::Balcony),
            "Terrace" => Some(Self::Terrace),
            "RegisteredInLandRegistry" => Some(Self::RegisteredInLandRegistry),
            "Alarm" => Some(Self::Alarm),
            "VideoSurveillance" => Some(Self::VideoSurveillance),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Garage => "Garage",
            Self::Elevator => "Elevator",
            Self::Water => "Water",
            Self::Electricity => "Electricity",
            Self::Gas => "Gas",
            Self::Internet => "Internet",
            Self::ParkingCircle => "ParkingCircle",
            Self::Balcony => "Balcony",
            Self::Terrace => "Terrace",
            Self::RegisteredInLandRegistry => "RegisteredInLandRegistry",
            Self::Alarm => "Alarm",
            Self::VideoSurveillance => "VideoSurveillance",
        }
    }
}

/// Validated target-property record consumed by the valuation engine.
///
/// Constructed per request, discarded after use. The `city` field is the
/// canonical location key matched against `Listing::city`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    pub city: String,
    pub m2: f64,
    pub level: i32,
    pub built: i32,
    pub condition: Condition,
    pub property_type: PropertyType,
    pub heating: Heating,
    pub equipment: Equipment,
    pub orientation: Orientation,
    pub amenities: BTreeSet<Amenity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

/// Raw valuation request exactly as the form collaborator submits it:
/// categorical fields arrive as display labels, numeric fields are already
/// coerced to numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub city: String,
    pub m2: f64,
    #[serde(default)]
    pub level: i32,
    pub built: i32,
    pub condition: String,
    pub property_type: String,
    pub heating: String,
    pub equipment: String,
    pub orientation: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

/// Estimate produced for a single request; held only for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub estimated_price: f64,
    pub estimated_price_per_m2: f64,
    pub confidence: u8,
    pub rating: super::rating::ValueRating,
}

/// Errors raised while validating valuation input or producing an estimate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValuationError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("unknown {field} category '{value}'")]
    UnknownCategory {
        field: &'static str,
        value: String,
    },
}
