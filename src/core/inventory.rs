//! Collection (inventory) mutations and list badges.
//!
//! Adding or removing an owned bottle changes the community pricing for that
//! bottle, so both mutations invalidate the page's [`PricingCache`] entry.

use tracing::info;

use super::deal::{DealTier, evaluate};
use crate::{
    api::CollectionApi,
    cache::PricingCache,
    entities::{InventoryItem, NewInventoryItem},
    errors::{Error, Result},
};

/// Records a purchased bottle in the collection.
///
/// # Errors
/// - [`Error::Validation`] for a negative or non-finite purchase price
/// - Any network-class error from the API call
pub async fn add_to_collection<A: CollectionApi + ?Sized>(
    api: &A,
    cache: &PricingCache,
    item: &NewInventoryItem,
) -> Result<InventoryItem> {
    if let Some(price) = item.purchase_price {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::validation(
                "purchase_price",
                "Purchase price must be a non-negative number",
            ));
        }
    }

    let created = api.add_inventory_item(item).await?;
    cache.invalidate(item.bottle_id).await;
    info!(
        "Added bottle {} to the collection as item {}",
        created.bottle_id, created.id
    );
    Ok(created)
}

/// Removes an owned bottle from the collection.
///
/// # Errors
/// Network-class errors from the API call. An item that is already gone is not an error.
pub async fn remove_from_collection<A: CollectionApi + ?Sized>(
    api: &A,
    cache: &PricingCache,
    item: &InventoryItem,
) -> Result<()> {
    api.remove_inventory_item(item.id).await?;
    cache.invalidate(item.bottle_id).await;
    info!("Removed item {} from the collection", item.id);
    Ok(())
}

/// Deal tier for an inventory row, from already cached pricing only.
///
/// Lists render many rows, so this never fetches; rows without cached
/// pricing or without a purchase price get no badge.
pub async fn deal_badge(cache: &PricingCache, item: &InventoryItem) -> Option<DealTier> {
    let paid = item.purchase_price?;
    let summary = cache.cached_summary(item.bottle_id).await?;
    evaluate(paid, Some(&summary)).map(|analysis| analysis.tier)
}
