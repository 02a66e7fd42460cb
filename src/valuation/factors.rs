//! The centralized feature multiplier table.
//!
//! Every attribute contributes one independent multiplicative factor; the
//! adjusted price-per-m² is the baseline times the product of all factors.
//! The table is data, not code, so call sites can never drift apart the way
//! the per-screen copies in the original demo did.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{Amenity, Condition, Equipment, Heating, Orientation, PropertyAttributes, PropertyType};

/// Per-attribute multipliers applied to the comparable baseline.
///
/// Values may be externalized (the struct is serde-enabled) but the relative
/// ordering within each group and the multiplicative composition are part of
/// the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    pub age_under_5: f64,
    pub age_under_15: f64,
    pub age_under_30: f64,
    pub age_30_plus: f64,

    /// Applied to levels 1 through 4; every other level takes `other_floor`.
    pub preferred_floor: f64,
    pub other_floor: f64,

    pub size_under_40: f64,
    pub size_40_to_100: f64,
    pub size_over_100: f64,

    pub condition_newly_built: f64,
    pub condition_renovated: f64,
    pub condition_good: f64,
    pub condition_needs_renovation: f64,

    pub type_house: f64,
    pub type_apartment: f64,
    pub type_other: f64,

    pub heating_central: f64,
    pub heating_gas: f64,
    pub heating_other: f64,

    pub equipment_furnished: f64,
    pub equipment_semi_furnished: f64,
    pub equipment_unfurnished: f64,

    pub orientation_south: f64,
    pub orientation_neutral: f64,
    pub orientation_north: f64,

    /// Additive premiums summed once and applied as `1 + sum`.
    pub bonus_elevator: f64,
    pub bonus_garage_or_parking: f64,
    pub bonus_balcony: f64,
    pub bonus_terrace: f64,
    pub bonus_alarm: f64,
    pub bonus_video_surveillance: f64,
    pub bonus_land_registry: f64,
}

impl Default for FactorTable {
    fn default() -> Self {
        Self {
            age_under_5: 1.15,
            age_under_15: 1.05,
            age_under_30: 0.95,
            age_30_plus: 0.85,

            preferred_floor: 1.02,
            other_floor: 0.98,

            size_under_40: 1.10,
            size_40_to_100: 1.00,
            size_over_100: 0.95,

            condition_newly_built: 1.15,
            condition_renovated: 1.08,
            condition_good: 1.00,
            condition_needs_renovation: 0.90,

            type_house: 1.10,
            type_apartment: 1.00,
            type_other: 0.95,

            heating_central: 1.05,
            heating_gas: 1.03,
            heating_other: 1.00,

            equipment_furnished: 1.08,
            equipment_semi_furnished: 1.03,
            equipment_unfurnished: 1.00,

            orientation_south: 1.03,
            orientation_neutral: 1.00,
            orientation_north: 0.97,

            bonus_elevator: 0.02,
            bonus_garage_or_parking: 0.03,
            bonus_balcony: 0.02,
            bonus_terrace: 0.03,
            bonus_alarm: 0.01,
            bonus_video_surveillance: 0.01,
            bonus_land_registry: 0.02,
        }
    }
}

impl FactorTable {
    /// Age bucket for a property; future-dated builds land in the newest
    /// bucket.
    pub fn age_factor(&self, age_years: i32) -> f64 {
        if age_years < 5 {
            self.age_under_5
        } else if age_years < 15 {
            self.age_under_15
        } else if age_years < 30 {
            self.age_under_30
        } else {
            self.age_30_plus
        }
    }

    pub fn floor_factor(&self, level: i32) -> f64 {
        if (1..=4).contains(&level) {
            self.preferred_floor
        } else {
            self.other_floor
        }
    }

    pub fn size_factor(&self, m2: f64) -> f64 {
        if m2 < 40.0 {
            self.size_under_40
        } else if m2 <= 100.0 {
            self.size_40_to_100
        } else {
            self.size_over_100
        }
    }

    pub fn condition_factor(&self, condition: Condition) -> f64 {
        match condition {
            Condition::NewlyBuilt => self.condition_newly_built,
            Condition::Renovated => self.condition_renovated,
            Condition::Good => self.condition_good,
            Condition::NeedsRenovation => self.condition_needs_renovation,
        }
    }

    pub fn type_factor(&self, property_type: PropertyType) -> f64 {
        match property_type {
            PropertyType::House => self.type_house,
            PropertyType::Apartment => self.type_apartment,
            PropertyType::CommercialProperty
            | PropertyType::Office
            | PropertyType::VacationHome => self.type_other,
        }
    }

    pub fn heating_factor(&self, heating: Heating) -> f64 {
        match heating {
            Heating::Central => self.heating_central,
            Heating::Gas => self.heating_gas,
            Heating::Electric
            | Heating::SolidFuel
            | Heating::FloorHeating
            | Heating::HeatPump => self.heating_other,
        }
    }

    pub fn equipment_factor(&self, equipment: Equipment) -> f64 {
        match equipment {
            Equipment::Furnished => self.equipment_furnished,
            Equipment::SemiFurnished => self.equipment_semi_furnished,
            Equipment::Unfurnished => self.equipment_unfurnished,
        }
    }

    pub fn orientation_factor(&self, orientation: Orientation) -> f64 {
        if orientation.faces_south() {
            self.orientation_south
        } else if orientation.faces_north() {
            self.orientation_north
        } else {
            self.orientation_neutral
        }
    }

    /// Sum of amenity premiums, applied as `1 + sum`. Garage and
    /// ParkingCircle share one premium even when both are present; utility
    /// hookups add nothing.
    pub fn amenity_multiplier(&self, amenities: &BTreeSet<Amenity>) -> f64 {
        let mut sum = 0.0;

        if amenities.contains(&Amenity::Garage) || amenities.contains(&Amenity::ParkingCircle) {
            sum += self.bonus_garage_or_parking;
        }
        for amenity in amenities {
            sum += match amenity {
                Amenity::Elevator => self.bonus_elevator,
                Amenity::Balcony => self.bonus_balcony,
                Amenity::Terrace => self.bonus_terrace,
                Amenity::Alarm => self.bonus_alarm,
                Amenity::VideoSurveillance => self.bonus_video_surveillance,
                Amenity::RegisteredInLandRegistry => self.bonus_land_registry,
                Amenity::Garage
                | Amenity::ParkingCircle
                | Amenity::Water
                | Amenity::Electricity
                | Amenity::Gas
                | Amenity::Internet => 0.0,
            };
        }

        1.0 + sum
    }

    /// Composes all factors onto the baseline. The result is unrounded; the
    /// engine applies the single rounding at the price-per-m² stage.
    pub fn adjust(
        &self,
        baseline_per_m2: f64,
        attrs: &PropertyAttributes,
        valuation_date: NaiveDate,
    ) -> f64 {
        let age_years = valuation_date.year() - attrs.built;

        baseline_per_m2
            * self.age_factor(age_years)
            * self.floor_factor(attrs.level)
            * self.size_factor(attrs.m2)
            * self.condition_factor(attrs.condition)
            * self.type_factor(attrs.property_type)
            * self.heating_factor(attrs.heating)
            * self.equipment_factor(attrs.equipment)
            * self.orientation_factor(attrs.orientation)
            * self.amenity_multiplier(&attrs.amenities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date")
    }

    #[test]
    fn bucket_boundaries_match_the_table() {
        let table = FactorTable::default();

        assert_eq!(table.age_factor(-1), 1.15);
        assert_eq!(table.age_factor(4), 1.15);
        assert_eq!(table.age_factor(5), 1.05);
        assert_eq!(table.age_factor(14), 1.05);
        assert_eq!(table.age_factor(15), 0.95);
        assert_eq!(table.age_factor(29), 0.95);
        assert_eq!(table.age_factor(30), 0.85);

        assert_eq!(table.floor_factor(0), 0.98);
        assert_eq!(table.floor_factor(1), 1.02);
        assert_eq!(table.floor_factor(4), 1.02);
        assert_eq!(table.floor_factor(5), 0.98);
        assert_eq!(table.floor_factor(-2), 0.98);

        assert_eq!(table.size_factor(39.9), 1.10);
        assert_eq!(table.size_factor(40.0), 1.00);
        assert_eq!(table.size_factor(100.0), 1.00);
        assert_eq!(table.size_factor(100.1), 0.95);
    }

    #[test]
    fn adjust_composes_the_documented_example() {
        let table = FactorTable::default();
        let baseline = 5311.0 / 3.0;

        let adjusted = table.adjust(baseline, &attrs(), date(2026));

        // 1770.33… × 1.15 × 1.02 × 1.00 × 1.15 × 1.00 × 1.05 × 1.08 × 1.03
        let expected = baseline * 1.15 * 1.02 * 1.15 * 1.05 * 1.08 * 1.03;
        assert!((adjusted - expected).abs() < 1e-9);
        assert_eq!(adjusted.round(), 2789.0);
    }

    #[test]
    fn newly_built_never_prices_below_needs_renovation() {
        let table = FactorTable::default();
        let baseline = 1700.0;

        let new = table.adjust(baseline, &attrs(), date(2026));

        let mut worn = attrs();
        worn.condition = Condition::NeedsRenovation;
        let renovation_needed = table.adjust(baseline, &worn, date(2026));

        assert!(new >= renovation_needed);
    }

    #[test]
    fn garage_and_parking_share_one_premium() {
        let table = FactorTable::default();

        let mut garage_only = BTreeSet::new();
        garage_only.insert(Amenity::Garage);

        let mut both = garage_only.clone();
        both.insert(Amenity::ParkingCircle);

        assert_eq!(
            table.amenity_multiplier(&garage_only),
            table.amenity_multiplier(&both)
        );
        assert!((table.amenity_multiplier(&both) - 1.03).abs() < 1e-12);
    }

    #[test]
    fn utility_hookups_add_no_premium() {
        let table = FactorTable::default();

        let mut utilities = BTreeSet::new();
        utilities.insert(Amenity::Water);
        utilities.insert(Amenity::Electricity);
        utilities.insert(Amenity::Gas);
        utilities.insert(Amenity::Internet);

        assert_eq!(table.amenity_multiplier(&utilities), 1.0);
    }

    #[test]
    fn full_amenity_set_sums_each_premium_once() {
        let table = FactorTable::default();

        let all: BTreeSet<Amenity> = [
            Amenity::Garage,
            Amenity::ParkingCircle,
            Amenity::Elevator,
            Amenity::Balcony,
            Amenity::Terrace,
            Amenity::Alarm,
            Amenity::VideoSurveillance,
            Amenity::RegisteredInLandRegistry,
        ]
        .into_iter()
        .collect();

        // 0.03 + 0.02 + 0.02 + 0.03 + 0.01 + 0.01 + 0.02
        assert!((table.amenity_multiplier(&all) - 1.14).abs() < 1e-12);
    }

    #[test]
    fn intercardinal_orientations_follow_their_primary_axis() {
        let table = FactorTable::default();

        assert_eq!(table.orientation_factor(Orientation::SouthEast), 1.03);
        assert_eq!(table.orientation_factor(Orientation::NorthWest), 0.97);
        assert_eq!(table.orientation_factor(Orientation::East), 1.00);
        assert_eq!(table.orientation_factor(Orientation::West), 1.00);
    }
}
