//! Wire schemas for API responses and their normalization.
//!
//! Each endpoint gets exactly one typed schema here. Where the API has served
//! more than one shape for the same endpoint, the schema is an untagged enum
//! and `into_*` collapses it, so callers never inspect raw JSON.

use serde::Deserialize;

use crate::{
    entities::{
        BottlePricing, InventoryItem, PricePoint, PricingSummary, RegionalPrice, StorageLocation,
    },
    errors::{Error, Result},
};

/// `GET /v1/storage-locations`: wrapped or bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationsResponse {
    /// `{ "locations": [...] }`
    Wrapped {
        /// The listed locations
        locations: Vec<StorageLocation>,
    },
    /// `[...]`
    Bare(Vec<StorageLocation>),
}

impl LocationsResponse {
    /// The list regardless of shape.
    #[must_use]
    pub fn into_locations(self) -> Vec<StorageLocation> {
        match self {
            Self::Wrapped { locations } | Self::Bare(locations) => locations,
        }
    }
}

/// `POST /v1/storage-locations`
#[derive(Debug, Deserialize)]
pub struct LocationResponse {
    /// The created location
    pub location: StorageLocation,
}

/// `POST /v1/inventory`: wrapped or bare item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InventoryItemResponse {
    /// `{ "item": {...} }`
    Wrapped {
        /// The created item
        item: InventoryItem,
    },
    /// `{...}`
    Bare(InventoryItem),
}

impl InventoryItemResponse {
    /// The item regardless of shape.
    #[must_use]
    pub fn into_item(self) -> InventoryItem {
        match self {
            Self::Wrapped { item } | Self::Bare(item) => item,
        }
    }
}

/// Catalog fields of the bottle embedded in a pricing response.
#[derive(Debug, Default, Deserialize)]
pub struct BottleRef {
    /// Catalog MSRP
    #[serde(default)]
    pub msrp: Option<f64>,
}

/// `GET /v1/pricing/bottles/{id}`
#[derive(Debug, Deserialize)]
pub struct BottlePricingResponse {
    /// Aggregate over all reports
    pub pricing: PricingSummary,
    /// Catalog data, absent on older servers
    #[serde(default)]
    pub bottle: BottleRef,
    /// Per-region averages
    #[serde(default)]
    pub regional_breakdown: Vec<RegionalPrice>,
    /// Per-period averages, oldest first
    #[serde(default)]
    pub price_trend: Vec<PricePoint>,
}

impl BottlePricingResponse {
    /// Normalizes the payload. When reporters gave no MSRP, the catalog MSRP
    /// stands in for `avg_msrp`.
    #[must_use]
    pub fn into_pricing(self) -> BottlePricing {
        let mut summary = self.pricing;
        if summary.avg_msrp.is_none() {
            summary.avg_msrp = self.bottle.msrp;
        }
        BottlePricing {
            summary,
            msrp: self.bottle.msrp,
            regional_breakdown: self.regional_breakdown,
            price_trend: self.price_trend,
        }
    }
}

/// Error body the API attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error text
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

/// Decodes `body` as `T`, attributing failures to `endpoint`.
pub fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
