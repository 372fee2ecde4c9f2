//! Storage location business logic - creation and the location picker.
//!
//! [`create_location`] is the single-call operation. [`LocationSelector`] is
//! the page-scoped state behind a location picker: it holds the most recent
//! authoritative list, derives the tree on demand, tracks the selected
//! location, and runs the create-then-reload flow of the inline "new
//! location" form.

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::{
    location_tree::{LocationNode, build_tree, check_hierarchy},
    sequence::RequestSequence,
};
use crate::{
    api::CollectionApi,
    entities::{LocationId, LocationType, NewStorageLocation, StorageLocation},
    errors::{Error, Result},
};

/// Input of the inline "create new location" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewLocationForm {
    /// Typed name, trimmed on submit
    pub name: String,
    /// Parent picked in the form, None for a top-level location
    pub parent_id: Option<LocationId>,
    /// Kind picked in the form
    pub kind: LocationType,
}

/// Creates a storage location through the API.
///
/// The name is trimmed and must not be empty. The parent is not checked
/// locally; the API decides whether it exists.
///
/// # Errors
/// - [`Error::Validation`] for an empty name, without contacting the API
/// - Any network-class error from the API call
pub async fn create_location<A: CollectionApi + ?Sized>(
    api: &A,
    name: &str,
    parent_id: Option<LocationId>,
    kind: LocationType,
) -> Result<StorageLocation> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "Location name cannot be empty"));
    }

    let request = NewStorageLocation {
        name: name.to_string(),
        parent_id,
        kind,
    };
    let created = api
        .create_storage_location(&request)
        .await
        .inspect_err(|e| error!("Failed to create storage location '{name}': {e}"))?;

    info!("Created storage location '{}' ({})", created.name, created.id);
    Ok(created)
}

#[derive(Debug, Default)]
struct SelectorState {
    locations: Vec<StorageLocation>,
    selected: Option<LocationId>,
}

/// Page-scoped storage location picker state.
///
/// Not shared between pages: two open pages may hold different snapshots of
/// the same locations until each reloads.
#[derive(Debug, Default)]
pub struct LocationSelector {
    state: RwLock<SelectorState>,
    sequence: RequestSequence,
}

impl LocationSelector {
    /// Empty selector; call [`LocationSelector::reload`] to populate it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with a fresh one from the API.
    ///
    /// Returns `Ok(false)` when a newer reload was started while this one was
    /// in flight; the older response is then discarded. When nothing is
    /// selected yet, the location flagged `is_default` becomes the selection.
    ///
    /// # Errors
    /// Network-class errors from the API, unless the request was already stale.
    pub async fn reload<A: CollectionApi + ?Sized>(&self, api: &A) -> Result<bool> {
        let ticket = self.sequence.begin();
        let fetched = api.list_storage_locations().await;

        let mut state = self.state.write().await;
        if !self.sequence.is_current(ticket) {
            warn!("Discarding stale storage location response");
            return Ok(false);
        }
        let locations = fetched?;

        if let Err(e) = check_hierarchy(&locations) {
            warn!("Storage location list is inconsistent: {e}");
        }
        if state.selected.is_none() {
            state.selected = locations
                .iter()
                .find(|location| location.is_default)
                .map(|location| location.id.clone());
        }
        debug!("Loaded {} storage locations", locations.len());
        state.locations = locations;
        Ok(true)
    }

    /// Current hierarchy, rebuilt from the latest list on every call.
    pub async fn nodes(&self) -> Vec<LocationNode> {
        build_tree(&self.state.read().await.locations)
    }

    /// Currently selected location id.
    pub async fn selected(&self) -> Option<LocationId> {
        self.state.read().await.selected.clone()
    }

    /// Replaces the selection; None clears it.
    pub async fn select(&self, id: Option<LocationId>) {
        self.state.write().await.selected = id;
    }

    /// The selected location placed in the current hierarchy.
    pub async fn selected_node(&self) -> Option<LocationNode> {
        let state = self.state.read().await;
        let selected = state.selected.as_ref()?;
        build_tree(&state.locations)
            .into_iter()
            .find(|node| node.id() == selected)
    }

    /// The selected id, or a validation error naming `field` when the form
    /// requires a location and none is chosen.
    pub async fn require_selection(&self, field: &'static str) -> Result<LocationId> {
        self.selected()
            .await
            .ok_or_else(|| Error::validation(field, "Choose a storage location"))
    }

    /// Runs the inline creation flow: create, reload the whole list, select
    /// the new location.
    ///
    /// The form is only borrowed so it stays populated when creation fails.
    /// If creation succeeds but the reload fails, the new location is still
    /// selected and appears once the next reload succeeds.
    ///
    /// # Errors
    /// Validation or network-class errors from [`create_location`].
    pub async fn create_location<A: CollectionApi + ?Sized>(
        &self,
        api: &A,
        form: &NewLocationForm,
    ) -> Result<StorageLocation> {
        let created = create_location(api, &form.name, form.parent_id.clone(), form.kind).await?;

        if let Err(e) = self.reload(api).await {
            warn!(
                "Created storage location '{}' but reloading the list failed: {e}",
                created.name
            );
        }
        self.select(Some(created.id.clone())).await;
        Ok(created)
    }
}
