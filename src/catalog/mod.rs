//! Immutable listing reference data backing comparable selection and search.
//!
//! The catalog is loaded once at startup (built-in seed set or a CSV export)
//! and never mutated afterwards. Loading normalizes every listing so that
//! `price_per_m2` is exactly `price / m2`; downstream logic relies on that
//! invariant instead of whatever the data source claims.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Geographic point used for locality display and map placement only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A published listing used as comparable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub city: String,
    pub m2: f64,
    pub floor: i32,
    pub built: i32,
    pub price: f64,
    pub price_per_m2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

/// Errors raised while loading a listing catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to open listing catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse listing catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("listing '{id}' has non-positive area {m2} m²")]
    NonPositiveArea { id: String, m2: f64 },
    #[error("listing '{id}' has non-finite price {price}")]
    InvalidPrice { id: String, price: f64 },
}

/// Read-only listing store shared by the valuation engine and the browse
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCatalog {
    listings: Vec<Listing>,
}

impl ListingCatalog {
    /// Builds a catalog from pre-assembled listings, normalizing each one.
    pub fn from_listings(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let listings = listings
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { listings })
    }

    /// The built-in demo data set for Sarajevo and Doboj. Already
    /// normalized, so construction cannot fail.
    pub fn seed() -> Self {
        Self {
            listings: seed_listings(),
        }
    }

    /// Imports listings from a CSV export with the header row
    /// `Id,Title,City,M2,Floor,Built,Price` (optional `Latitude,Longitude`).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut listings = Vec::new();
        for record in csv_reader.deserialize::<ListingRow>() {
            let row = record?;
            listings.push(normalize(row.into_listing())?);
        }

        Ok(Self { listings })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Listings in source order. Search results preserve this order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

fn normalize(mut listing: Listing) -> Result<Listing, CatalogError> {
    if !listing.m2.is_finite() || listing.m2 <= 0.0 {
        return Err(CatalogError::NonPositiveArea {
            id: listing.id,
            m2: listing.m2,
        });
    }
    if !listing.price.is_finite() || listing.price <= 0.0 {
        return Err(CatalogError::InvalidPrice {
            id: listing.id,
            price: listing.price,
        });
    }

    // Stored per-m² values are display approximations in most exports.
    listing.price_per_m2 = listing.price / listing.m2;
    Ok(listing)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "M2")]
    m2: f64,
    #[serde(rename = "Floor")]
    floor: i32,
    #[serde(rename = "Built")]
    built: i32,
    #[serde(rename = "Price")]
    price: f64,
    #[serde(rename = "Latitude", default)]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<f64>,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Listing {
            id: self.id,
            title: self.title,
            city: self.city,
            m2: self.m2,
            floor: self.floor,
            built: self.built,
            price: self.price,
            price_per_m2: 0.0,
            coordinates,
        }
    }
}

fn seed_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: "p1".to_string(),
            title: "1-bedroom apartment - Ilidža".to_string(),
            city: "Sarajevo".to_string(),
            m2: 45.0,
            floor: 2,
            built: 2005,
            price: 85_000.0,
            price_per_m2: 85_000.0 / 45.0,
            coordinates: Some(GeoPoint {
                latitude: 43.8300,
                longitude: 18.3103,
            }),
        },
        Listing {
            id: "p2".to_string(),
            title: "2-bedroom - Centar".to_string(),
            city: "Sarajevo".to_string(),
            m2: 65.0,
            floor: 3,
            built: 1998,
            price: 125_000.0,
            price_per_m2: 125_000.0 / 65.0,
            coordinates: Some(GeoPoint {
                latitude: 43.8591,
                longitude: 18.4266,
            }),
        },
        Listing {
            id: "p3".to_string(),
            title: "Studio - Ilidža (renovated)".to_string(),
            city: "Sarajevo".to_string(),
            m2: 28.0,
            floor: 1,
            built: 2010,
            price: 42_000.0,
            price_per_m2: 42_000.0 / 28.0,
            coordinates: Some(GeoPoint {
                latitude: 43.8281,
                longitude: 18.3089,
            }),
        },
        Listing {
            id: "p4".to_string(),
            title: "3-bedroom family apartment - Novi Grad".to_string(),
            city: "Doboj".to_string(),
            m2: 95.0,
            floor: 4,
            built: 1985,
            price: 95_000.0,
            price_per_m2: 95_000.0 / 95.0,
            coordinates: None,
        },
    ]
}
