//! Page-scoped pricing cache.
//!
//! One [`PricingCache`] is created per page and passed by reference to the
//! flows that need pricing. Entries are keyed by bottle id and include "no
//! pricing yet" answers, so a bottle without data is not re-requested on every
//! price edit. Mutations that change a bottle's pricing (adding or removing
//! inventory) must call [`PricingCache::invalidate`].

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::{
    api::CollectionApi,
    config::PricingConfig,
    entities::{BottlePricing, PricingSummary},
    errors::Result,
};

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<i64, Option<BottlePricing>>,
    // Bumped on every invalidation; fetches started under an older
    // generation do not write back.
    generation: u64,
}

/// Pricing per bottle for the lifetime of one page.
#[derive(Debug, Default)]
pub struct PricingCache {
    state: RwLock<CacheState>,
    query: PricingConfig,
}

impl PricingCache {
    /// Empty cache that fetches with the given query parameters.
    #[must_use]
    pub fn new(query: PricingConfig) -> Self {
        Self {
            state: RwLock::default(),
            query,
        }
    }

    /// Cached pricing for `bottle_id`, fetching it on a miss.
    ///
    /// # Errors
    /// Network-class errors from the API. Failures are not cached.
    pub async fn get_or_fetch<A: CollectionApi + ?Sized>(
        &self,
        api: &A,
        bottle_id: i64,
    ) -> Result<Option<BottlePricing>> {
        let generation = {
            let state = self.state.read().await;
            if let Some(entry) = state.entries.get(&bottle_id) {
                trace!("Pricing cache hit for bottle {bottle_id}");
                return Ok(entry.clone());
            }
            state.generation
        };

        debug!("Pricing cache miss for bottle {bottle_id}, fetching");
        let pricing = api.bottle_pricing(bottle_id, self.query).await?;

        let mut state = self.state.write().await;
        if state.generation == generation {
            state.entries.insert(bottle_id, pricing.clone());
        } else {
            debug!("Pricing for bottle {bottle_id} was invalidated mid-fetch, not caching");
        }
        Ok(pricing)
    }

    /// Cached summary without fetching; None on a miss or when the bottle has no pricing.
    pub async fn cached_summary(&self, bottle_id: i64) -> Option<PricingSummary> {
        self.state
            .read()
            .await
            .entries
            .get(&bottle_id)
            .and_then(|entry| entry.as_ref().map(|pricing| pricing.summary.clone()))
    }

    /// Drops the entry for `bottle_id` so the next read refetches it.
    pub async fn invalidate(&self, bottle_id: i64) {
        let mut state = self.state.write().await;
        state.generation += 1;
        if state.entries.remove(&bottle_id).is_some() {
            debug!("Invalidated cached pricing for bottle {bottle_id}");
        }
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.entries.clear();
    }

    /// Number of cached bottles, including those without pricing.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// True when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}
