//! Shared test utilities for cask-keeper.
//!
//! [`FakeApi`] is an in-memory [`CollectionApi`] with scripted delays and
//! failures; the remaining helpers build entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use crate::{
    api::CollectionApi,
    config::PricingConfig,
    entities::{
        BottlePricing, InventoryItem, LocationId, NewInventoryItem, NewStorageLocation,
        PricingSummary, StorageLocation,
    },
    errors::{Error, Result},
};

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Storage location with `sort_order` 0 and no server path.
pub fn location(id: &str, name: &str, parent: Option<&str>) -> StorageLocation {
    location_with_order(id, name, parent, 0)
}

pub fn location_with_order(
    id: &str,
    name: &str,
    parent: Option<&str>,
    sort_order: i32,
) -> StorageLocation {
    StorageLocation {
        id: LocationId::from(id),
        name: name.to_string(),
        parent_id: parent.map(LocationId::from),
        sort_order,
        is_default: false,
        kind: crate::entities::LocationType::Other,
        full_path: None,
    }
}

pub fn summary(avg_price: f64, avg_msrp: Option<f64>, sample_count: u32) -> PricingSummary {
    PricingSummary {
        avg_price,
        avg_msrp,
        sample_count,
    }
}

/// Pricing with the given summary and no regional or trend data.
pub fn bottle_pricing(avg_price: f64, avg_msrp: Option<f64>, sample_count: u32) -> BottlePricing {
    BottlePricing {
        summary: summary(avg_price, avg_msrp, sample_count),
        msrp: avg_msrp,
        regional_breakdown: Vec::new(),
        price_trend: Vec::new(),
    }
}

pub fn new_item(bottle_id: i64, purchase_price: Option<f64>) -> NewInventoryItem {
    NewInventoryItem {
        bottle_id,
        purchase_price,
        storage_location_id: None,
        purchase_location_id: None,
        purchased_on: None,
    }
}

fn server_error(endpoint: &str) -> Error {
    Error::Api {
        status: 500,
        endpoint: endpoint.to_string(),
        message: "Internal Server Error".to_string(),
    }
}

#[derive(Default)]
struct FakeState {
    locations: Vec<StorageLocation>,
    scripted_lists: VecDeque<(Duration, Vec<StorageLocation>)>,
    next_location_id: u64,
    pricing: HashMap<i64, BottlePricing>,
    pricing_delays: HashMap<i64, Duration>,
    inventory: Vec<InventoryItem>,
    next_inventory_id: i64,
    fail_lists: bool,
    fail_creates: bool,
    fail_pricing: bool,
    fail_inventory: bool,
    list_calls: usize,
    create_calls: usize,
    pricing_calls: HashMap<i64, usize>,
}

/// In-memory stand-in for the collection API.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations(locations: Vec<StorageLocation>) -> Self {
        let api = Self::new();
        api.state.lock().unwrap().locations = locations;
        api
    }

    /// Queues one list response, served after `delay`, ahead of the live list.
    pub fn script_list(&self, delay: Duration, locations: Vec<StorageLocation>) {
        self.state
            .lock()
            .unwrap()
            .scripted_lists
            .push_back((delay, locations));
    }

    pub fn set_pricing(&self, bottle_id: i64, pricing: BottlePricing) {
        self.state.lock().unwrap().pricing.insert(bottle_id, pricing);
    }

    pub fn delay_pricing(&self, bottle_id: i64, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .pricing_delays
            .insert(bottle_id, delay);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.state.lock().unwrap().fail_lists = fail;
    }

    pub fn fail_creates(&self, fail: bool) {
        self.state.lock().unwrap().fail_creates = fail;
    }

    pub fn fail_pricing(&self, fail: bool) {
        self.state.lock().unwrap().fail_pricing = fail;
    }

    pub fn fail_inventory(&self, fail: bool) {
        self.state.lock().unwrap().fail_inventory = fail;
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn pricing_calls(&self, bottle_id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .pricing_calls
            .get(&bottle_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn inventory_len(&self) -> usize {
        self.state.lock().unwrap().inventory.len()
    }
}

#[async_trait]
impl CollectionApi for FakeApi {
    async fn list_storage_locations(&self) -> Result<Vec<StorageLocation>> {
        let (delay, response) = {
            let mut state = self.state.lock().unwrap();
            state.list_calls += 1;
            if state.fail_lists {
                return Err(server_error("/v1/storage-locations"));
            }
            match state.scripted_lists.pop_front() {
                Some((delay, locations)) => (delay, locations),
                None => (Duration::ZERO, state.locations.clone()),
            }
        };
        tokio::time::sleep(delay).await;
        Ok(response)
    }

    async fn create_storage_location(
        &self,
        location: &NewStorageLocation,
    ) -> Result<StorageLocation> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if state.fail_creates {
            return Err(server_error("/v1/storage-locations"));
        }
        state.next_location_id += 1;
        let created = StorageLocation {
            id: LocationId::from(format!("new-{}", state.next_location_id)),
            name: location.name.clone(),
            parent_id: location.parent_id.clone(),
            sort_order: 0,
            is_default: false,
            kind: location.kind,
            full_path: None,
        };
        state.locations.push(created.clone());
        Ok(created)
    }

    async fn bottle_pricing(
        &self,
        bottle_id: i64,
        _query: PricingConfig,
    ) -> Result<Option<BottlePricing>> {
        let (delay, response) = {
            let mut state = self.state.lock().unwrap();
            *state.pricing_calls.entry(bottle_id).or_default() += 1;
            if state.fail_pricing {
                return Err(server_error("/v1/pricing/bottles"));
            }
            let delay = state
                .pricing_delays
                .get(&bottle_id)
                .copied()
                .unwrap_or_default();
            (delay, state.pricing.get(&bottle_id).cloned())
        };
        tokio::time::sleep(delay).await;
        Ok(response)
    }

    async fn add_inventory_item(&self, item: &NewInventoryItem) -> Result<InventoryItem> {
        let mut state = self.state.lock().unwrap();
        if state.fail_inventory {
            return Err(server_error("/v1/inventory"));
        }
        state.next_inventory_id += 1;
        let created = InventoryItem {
            id: state.next_inventory_id,
            bottle_id: item.bottle_id,
            purchase_price: item.purchase_price,
            storage_location_id: item.storage_location_id.clone(),
            purchase_location_id: item.purchase_location_id,
            purchased_on: item.purchased_on,
        };
        state.inventory.push(created.clone());
        Ok(created)
    }

    async fn remove_inventory_item(&self, item_id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_inventory {
            return Err(server_error("/v1/inventory"));
        }
        state.inventory.retain(|item| item.id != item_id);
        Ok(())
    }
}
