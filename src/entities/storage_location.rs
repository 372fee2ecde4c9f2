//! Storage location entity - a user-defined place where bottles are kept.
//!
//! Locations nest through `parent_id` to form a forest (room > cabinet > shelf).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque storage location identifier.
///
/// The API has served ids both as strings and as integers, so both are
/// accepted and kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct LocationId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for LocationId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

impl From<LocationId> for String {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl LocationId {
    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of place a location is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// A whole room
    Room,
    /// Cabinet or bar
    Cabinet,
    /// Single shelf
    Shelf,
    /// Closet
    Closet,
    /// Safe or locked box
    Safe,
    /// Anything else
    #[default]
    Other,
}

/// Storage location as served by `GET /v1/storage-locations`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageLocation {
    /// Unique identifier
    pub id: LocationId,
    /// Display name (e.g., "Shelf 1")
    pub name: String,
    /// Containing location, None for a top-level location
    #[serde(default)]
    pub parent_id: Option<LocationId>,
    /// Position among siblings; ties fall back to name
    #[serde(default)]
    pub sort_order: i32,
    /// Preselected in pickers when nothing else is selected
    #[serde(default)]
    pub is_default: bool,
    /// What kind of place this is
    #[serde(rename = "type", default)]
    pub kind: LocationType,
    /// Server-rendered breadcrumb (e.g., "Office > Cabinet > Shelf 1")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
}

/// Body of `POST /v1/storage-locations`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewStorageLocation {
    /// Trimmed, non-empty name
    pub name: String,
    /// Parent location, None for top-level
    pub parent_id: Option<LocationId>,
    /// What kind of place this is
    #[serde(rename = "type")]
    pub kind: LocationType,
}
