//! Pricing query settings.

use serde::Deserialize;

use crate::entities::pricing::MIN_PRICING_SAMPLES;

/// Parameters sent to the pricing endpoint as `months` and `min_samples`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PricingConfig {
    /// How many months of community reports to aggregate
    pub months: u32,
    /// Minimum number of reports the API should require per aggregate
    pub min_samples: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            months: 12,
            min_samples: MIN_PRICING_SAMPLES,
        }
    }
}
