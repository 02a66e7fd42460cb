//! Validation boundary between the form collaborator and the engine.
//!
//! Categorical labels are matched against the documented enumerations and
//! unknown values fail loudly with `UnknownCategory` instead of defaulting,
//! so data-entry mistakes surface at intake rather than as skewed estimates.

use std::collections::BTreeSet;

use super::domain::{
    Amenity, Condition, Equipment, Heating, Orientation, PropertyAttributes, PropertyType,
    ValuationError, ValuationRequest,
};

/// Converts a raw request into validated attributes.
pub fn attributes_from_request(
    request: ValuationRequest,
) -> Result<PropertyAttributes, ValuationError> {
    if !request.m2.is_finite() || request.m2 <= 0.0 {
        return Err(ValuationError::InvalidInput {
            reason: format!("area must be a positive number of m², got {}", request.m2),
        });
    }

    let condition = parse_category(Condition::parse, "condition", &request.condition)?;
    let property_type =
        parse_category(PropertyType::parse, "property type", &request.property_type)?;
    let heating = parse_category(Heating::parse, "heating", &request.heating)?;
    let equipment = parse_category(Equipment::parse, "equipment", &request.equipment)?;
    let orientation = parse_category(Orientation::parse, "orientation", &request.orientation)?;

    let mut amenities = BTreeSet::new();
    for raw in &request.amenities {
        amenities.insert(parse_category(Amenity::parse, "amenity", raw)?);
    }

    Ok(PropertyAttributes {
        city: request.city.trim().to_string(),
        m2: request.m2,
        level: request.level,
        built: request.built,
        condition,
        property_type,
        heating,
        equipment,
        orientation,
        amenities,
        coordinates: request.coordinates,
    })
}

fn parse_category<T>(
    parser: fn(&str) -> Option<T>,
    field: &'static str,
    value: &str,
) -> Result<T, ValuationError> {
    parser(value).ok_or_else(|| ValuationError::UnknownCategory {
        field,
        value: value.trim().to_string(),
    })
}
