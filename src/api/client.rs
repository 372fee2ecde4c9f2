//! reqwest-backed implementation of [`CollectionApi`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tracing::debug;

use super::{
    CollectionApi,
    responses::{
        BottlePricingResponse, ErrorBody, InventoryItemResponse, LocationResponse,
        LocationsResponse, decode,
    },
};
use crate::{
    config::{ApiConfig, PricingConfig},
    entities::{BottlePricing, InventoryItem, NewInventoryItem, NewStorageLocation, StorageLocation},
    errors::{Error, Result},
};

const STORAGE_LOCATIONS: &str = "/v1/storage-locations";
const INVENTORY: &str = "/v1/inventory";

/// HTTP client for the collection API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout_secs: u64,
}

impl HttpApiClient {
    /// Builds a client with the configured timeout applied to every request.
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            timeout_secs: config.timeout_secs,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(endpoint));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends `request` and returns the body of a 2xx response.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<String> {
        debug!("API request: {endpoint}");

        let response = request.send().await.map_err(|e| self.transport_error(endpoint, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(endpoint, status, &body))
        }
    }

    fn transport_error(&self, endpoint: &str, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Timeout {
                endpoint: endpoint.to_string(),
                seconds: self.timeout_secs,
            }
        } else {
            Error::Network(error)
        }
    }
}

/// Maps a non-2xx response to the error taxonomy.
fn status_error(endpoint: &str, status: StatusCode, body: &str) -> Error {
    if status == StatusCode::NOT_FOUND {
        return Error::NotFound {
            endpoint: endpoint.to_string(),
        };
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    Error::Api {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
        message,
    }
}

fn pricing_endpoint(bottle_id: i64) -> String {
    format!("/v1/pricing/bottles/{bottle_id}")
}

#[async_trait]
impl CollectionApi for HttpApiClient {
    async fn list_storage_locations(&self) -> Result<Vec<StorageLocation>> {
        let request = self.request(Method::GET, STORAGE_LOCATIONS);
        match self.send(STORAGE_LOCATIONS, request).await {
            Ok(body) => decode::<LocationsResponse>(STORAGE_LOCATIONS, &body)
                .map(LocationsResponse::into_locations),
            Err(e) if e.is_not_found() => {
                debug!("No storage locations yet");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn create_storage_location(
        &self,
        location: &NewStorageLocation,
    ) -> Result<StorageLocation> {
        let request = self.request(Method::POST, STORAGE_LOCATIONS).json(location);
        let body = self.send(STORAGE_LOCATIONS, request).await?;
        decode::<LocationResponse>(STORAGE_LOCATIONS, &body).map(|response| response.location)
    }

    async fn bottle_pricing(
        &self,
        bottle_id: i64,
        query: PricingConfig,
    ) -> Result<Option<BottlePricing>> {
        let endpoint = pricing_endpoint(bottle_id);
        let request = self
            .request(Method::GET, &endpoint)
            .query(&[("months", query.months), ("min_samples", query.min_samples)]);

        match self.send(&endpoint, request).await {
            Ok(body) => decode::<BottlePricingResponse>(&endpoint, &body)
                .map(|response| Some(response.into_pricing())),
            Err(e) if e.is_not_found() => {
                debug!("No pricing data yet for bottle {bottle_id}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn add_inventory_item(&self, item: &NewInventoryItem) -> Result<InventoryItem> {
        let request = self.request(Method::POST, INVENTORY).json(item);
        let body = self.send(INVENTORY, request).await?;
        decode::<InventoryItemResponse>(INVENTORY, &body).map(InventoryItemResponse::into_item)
    }

    async fn remove_inventory_item(&self, item_id: i64) -> Result<()> {
        let endpoint = format!("{INVENTORY}/{item_id}");
        match self.send(&endpoint, self.request(Method::DELETE, &endpoint)).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                debug!("Inventory item {item_id} was already removed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    fn client(base_url: &str) -> HttpApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 3,
        };
        HttpApiClient::new(&config, Some("secret".to_string())).unwrap()
    }

    /// Client for a local test server, bypassing any proxy from the environment.
    fn local_client(base_url: &str, timeout_secs: u64) -> HttpApiClient {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap();
        HttpApiClient {
            client,
            base_url: base_url.to_string(),
            token: None,
            timeout_secs,
        }
    }

    /// Reads one request up to the end of its headers.
    fn read_request_head(stream: &mut std::net::TcpStream) {
        let mut head = Vec::new();
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") {
            match stream.read(&mut byte) {
                Ok(0) | Err(_) => return,
                Ok(_) => head.push(byte[0]),
            }
        }
    }

    /// Serves a single canned response and returns the server's base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request_head(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        base_url
    }

    /// Accepts a single request and never answers it within `hold`.
    fn serve_silently(hold: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request_head(&mut stream);
            thread::sleep(hold);
        });
        base_url
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let api = client("https://cellar.example.com/");
        assert_eq!(
            api.url(STORAGE_LOCATIONS),
            "https://cellar.example.com/v1/storage-locations"
        );
        assert_eq!(
            api.url(&pricing_endpoint(42)),
            "https://cellar.example.com/v1/pricing/bottles/42"
        );
    }

    #[test]
    fn test_request_carries_bearer_token_and_query() {
        let api = client("https://cellar.example.com");
        let request = api
            .request(Method::GET, &pricing_endpoint(7))
            .query(&[("months", 12), ("min_samples", 3)])
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://cellar.example.com/v1/pricing/bottles/7?months=12&min_samples=3"
        );
        assert_eq!(request.headers()["authorization"], "Bearer secret");
    }

    #[test]
    fn test_status_error_not_found() {
        let err = status_error(STORAGE_LOCATIONS, StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_status_error_uses_error_body() {
        let err = status_error(
            STORAGE_LOCATIONS,
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error": "name already taken"}"#,
        );
        match err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "name already taken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_reason() {
        let err = status_error(INVENTORY, StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(err.is_network());
        assert_eq!(err.to_string(), "API error 502 from /v1/inventory: Bad Gateway");
    }

    #[tokio::test]
    async fn test_slow_server_maps_to_timeout() {
        let api = local_client(&serve_silently(Duration::from_secs(3)), 1);

        let err = api.list_storage_locations().await.unwrap_err();
        assert!(err.is_network());
        assert!(matches!(
            err,
            Error::Timeout { seconds: 1, ref endpoint } if endpoint == STORAGE_LOCATIONS
        ));
    }

    #[tokio::test]
    async fn test_missing_location_list_is_empty() -> Result<()> {
        let api = local_client(&serve_once("404 Not Found", ""), 5);
        assert!(api.list_storage_locations().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_location_list_decodes_bare_array() -> Result<()> {
        let api = local_client(
            &serve_once("200 OK", r#"[{"id": 1, "name": "Cabinet"}]"#),
            5,
        );
        let locations = api.list_storage_locations().await?;
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].id.as_str(), "1");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_pricing_is_none() -> Result<()> {
        let api = local_client(&serve_once("404 Not Found", ""), 5);
        let pricing = api.bottle_pricing(42, PricingConfig::default()).await?;
        assert!(pricing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_pricing_server_error_propagates() {
        let api = local_client(
            &serve_once("500 Internal Server Error", r#"{"message": "db down"}"#),
            5,
        );
        let err = api
            .bottle_pricing(42, PricingConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Api { status: 500, ref message, .. } if message == "db down"
        ));
    }

    #[tokio::test]
    async fn test_removing_missing_item_succeeds() -> Result<()> {
        let api = local_client(&serve_once("404 Not Found", ""), 5);
        api.remove_inventory_item(7).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let api = local_client(&serve_once("200 OK", "<html>maintenance</html>"), 5);
        let err = api.list_storage_locations().await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
