//! Core business logic - framework-agnostic location, pricing and collection operations.
//!
//! The two pure units are [`location_tree::build_tree`] and [`deal::evaluate`];
//! everything else wraps them in page-scoped, sequenced state.

pub mod barrel;
pub mod deal;
pub mod inventory;
pub mod location;
pub mod location_tree;
pub mod pricing;
pub mod sequence;

pub use deal::{DealAnalysis, DealTier, evaluate};
pub use location::{LocationSelector, NewLocationForm, create_location};
pub use location_tree::{LocationNode, build_tree, check_hierarchy};
