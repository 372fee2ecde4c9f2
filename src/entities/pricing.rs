//! Community pricing entities served by `GET /v1/pricing/bottles/{id}`.

use serde::{Deserialize, Serialize};

/// Fewest community reports a summary needs before a deal can be classified.
pub const MIN_PRICING_SAMPLES: u32 = 3;

/// Aggregate of community-reported prices for one bottle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    /// Mean reported purchase price
    pub avg_price: f64,
    /// Mean reported MSRP, when reporters supplied one
    #[serde(default)]
    pub avg_msrp: Option<f64>,
    /// Number of reports behind the averages
    #[serde(default)]
    pub sample_count: u32,
}

impl PricingSummary {
    /// True when enough reports exist to classify a deal.
    #[must_use]
    pub const fn is_sufficient(&self) -> bool {
        self.sample_count >= MIN_PRICING_SAMPLES
    }
}

/// Average price within one region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionalPrice {
    /// Region code (e.g. "CA")
    pub region: String,
    /// Average reported price in the region
    pub avg_price: f64,
    /// Reports behind the average
    #[serde(default)]
    pub sample_count: u32,
}

/// Average price for one period of the trend (e.g. "2025-03")
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Period label
    pub period: String,
    /// Average reported price in the period
    pub avg_price: f64,
    /// Reports behind the average
    #[serde(default)]
    pub sample_count: u32,
}

/// Everything the pricing endpoint knows about one bottle, normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct BottlePricing {
    /// Aggregate used for deal classification
    pub summary: PricingSummary,
    /// Catalog MSRP of the bottle itself
    pub msrp: Option<f64>,
    /// Per-region averages
    pub regional_breakdown: Vec<RegionalPrice>,
    /// Oldest period first
    pub price_trend: Vec<PricePoint>,
}
