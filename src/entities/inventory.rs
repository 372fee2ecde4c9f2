//! Inventory entity - a physical bottle the user owns.
//!
//! Distinct from the catalog bottle it references: two users owning the same
//! bottling each have their own inventory item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::storage_location::LocationId;

/// Inventory item as returned by `POST /v1/inventory`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Server-assigned id
    pub id: i64,
    /// Catalog bottle this item is an instance of
    pub bottle_id: i64,
    /// What the user paid
    #[serde(default)]
    pub purchase_price: Option<f64>,
    /// Where the bottle is kept
    #[serde(default)]
    pub storage_location_id: Option<LocationId>,
    /// Store it was bought from
    #[serde(default)]
    pub purchase_location_id: Option<i64>,
    /// Date of purchase
    #[serde(default)]
    pub purchased_on: Option<NaiveDate>,
}

/// Body of `POST /v1/inventory`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewInventoryItem {
    /// Catalog bottle being added
    pub bottle_id: i64,
    /// What the user paid, must be non-negative
    pub purchase_price: Option<f64>,
    /// Where the bottle will be kept
    pub storage_location_id: Option<LocationId>,
    /// Store it was bought from
    pub purchase_location_id: Option<i64>,
    /// Date of purchase
    pub purchased_on: Option<NaiveDate>,
}
