//! Pricing intelligence for the add-to-collection form and bottle sidebar.
//!
//! [`PriceCheck`] ties the cache, the API and the deal evaluator together for
//! one form: every change of bottle or price runs [`PriceCheck::check`], and
//! only the result of the most recent check is kept.

use tokio::sync::RwLock;
use tracing::warn;

use super::{
    deal::{DealAnalysis, evaluate},
    sequence::RequestSequence,
};
use crate::{
    api::CollectionApi,
    cache::PricingCache,
    entities::{BottlePricing, PricePoint, RegionalPrice},
    errors::Result,
};

/// Shown in place of a tier when there is too little pricing data.
pub const NOT_ENOUGH_DATA: &str = "Not enough pricing data yet";

/// Outcome of checking one price for one bottle.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceCheckResult {
    /// Bottle that was checked
    pub bottle_id: i64,
    /// Price entered in the form
    pub paid_price: f64,
    /// None when the API has no pricing for the bottle
    pub pricing: Option<BottlePricing>,
    /// None when the price or the data does not allow a classification
    pub analysis: Option<DealAnalysis>,
}

impl PriceCheckResult {
    /// Tier message, or the neutral hint when no tier could be computed.
    #[must_use]
    pub fn headline(&self) -> String {
        self.analysis
            .as_ref()
            .map_or_else(|| NOT_ENOUGH_DATA.to_string(), DealAnalysis::message)
    }
}

/// Sequenced deal feedback for a single form.
#[derive(Debug, Default)]
pub struct PriceCheck {
    sequence: RequestSequence,
    latest: RwLock<Option<PriceCheckResult>>,
}

impl PriceCheck {
    /// Check state with no result yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates `paid_price` for `bottle_id`, fetching pricing through `cache`.
    ///
    /// Returns `Ok(None)` when a newer check was started while this one waited
    /// for pricing; the older result is discarded.
    ///
    /// # Errors
    /// Network-class errors from the pricing fetch, unless the check was already stale.
    pub async fn check<A: CollectionApi + ?Sized>(
        &self,
        api: &A,
        cache: &PricingCache,
        bottle_id: i64,
        paid_price: f64,
    ) -> Result<Option<PriceCheckResult>> {
        let ticket = self.sequence.begin();
        let fetched = cache.get_or_fetch(api, bottle_id).await;

        let mut latest = self.latest.write().await;
        if !self.sequence.is_current(ticket) {
            warn!("Discarding stale price check for bottle {bottle_id}");
            return Ok(None);
        }
        let pricing = fetched?;

        let analysis = evaluate(paid_price, pricing.as_ref().map(|p| &p.summary));
        let result = PriceCheckResult {
            bottle_id,
            paid_price,
            pricing,
            analysis,
        };
        *latest = Some(result.clone());
        Ok(Some(result))
    }

    /// Result of the most recent completed check.
    pub async fn latest(&self) -> Option<PriceCheckResult> {
        self.latest.read().await.clone()
    }
}

/// Percent change from the oldest to the newest trend point.
///
/// Points with a non-positive average are skipped; None with fewer than two
/// usable points.
#[must_use]
pub fn trend_change_pct(points: &[PricePoint]) -> Option<f64> {
    let mut usable = points.iter().filter(|point| point.avg_price > 0.0);
    let first = usable.next()?;
    let last = usable.last()?;
    Some((last.avg_price - first.avg_price) * 100.0 / first.avg_price)
}

/// Region with the lowest average among those with at least `min_samples` reports.
#[must_use]
pub fn cheapest_region(regions: &[RegionalPrice], min_samples: u32) -> Option<&RegionalPrice> {
    regions
        .iter()
        .filter(|region| region.sample_count >= min_samples && region.avg_price > 0.0)
        .min_by(|a, b| a.avg_price.total_cmp(&b.avg_price))
}
