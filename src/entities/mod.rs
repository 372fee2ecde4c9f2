//! Entity module - serde models for the records exchanged with the collection API.

pub mod inventory;
pub mod pricing;
pub mod storage_location;

pub use inventory::{InventoryItem, NewInventoryItem};
pub use pricing::{BottlePricing, MIN_PRICING_SAMPLES, PricePoint, PricingSummary, RegionalPrice};
pub use storage_location::{LocationId, LocationType, NewStorageLocation, StorageLocation};
