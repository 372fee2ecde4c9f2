//! Access to the collection REST API.
//!
//! Flows in [`crate::core`] talk to the API only through [`CollectionApi`], so
//! they can run against [`HttpApiClient`] in production and an in-memory fake
//! in tests. Every method returns typed, normalized data; response-shape
//! guessing is confined to [`responses`].

pub mod client;
pub mod responses;

use async_trait::async_trait;

use crate::{
    config::PricingConfig,
    entities::{BottlePricing, InventoryItem, NewInventoryItem, NewStorageLocation, StorageLocation},
    errors::Result,
};

pub use client::HttpApiClient;

/// Operations the collection UI needs from the REST API.
#[async_trait]
pub trait CollectionApi: Send + Sync {
    /// `GET /v1/storage-locations`
    async fn list_storage_locations(&self) -> Result<Vec<StorageLocation>>;

    /// `POST /v1/storage-locations`
    async fn create_storage_location(&self, location: &NewStorageLocation)
    -> Result<StorageLocation>;

    /// `GET /v1/pricing/bottles/{bottle_id}`.
    ///
    /// `Ok(None)` when the API has no pricing for the bottle yet (404).
    async fn bottle_pricing(
        &self,
        bottle_id: i64,
        query: PricingConfig,
    ) -> Result<Option<BottlePricing>>;

    /// `POST /v1/inventory`
    async fn add_inventory_item(&self, item: &NewInventoryItem) -> Result<InventoryItem>;

    /// `DELETE /v1/inventory/{item_id}`. Removing an item that is already gone succeeds.
    async fn remove_inventory_item(&self, item_id: i64) -> Result<()>;
}
