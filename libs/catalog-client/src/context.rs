//! Shared client state: the current page of items and the total match count.

use futures::future::{AbortRegistration, Abortable};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::models::{Item, Stats};

/// Parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub page: u64,
    pub limit: u64,
    pub q: String,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            q: String::new(),
        }
    }
}

#[derive(Debug, Default)]
struct ListState {
    items: Vec<Item>,
    total: u64,
}

/// Client for the catalog API that remembers the last listing it loaded.
///
/// State is only replaced by a successful, non-cancelled `fetch_items`;
/// every failure leaves the previous page in place.
pub struct DataContext {
    base_url: String,
    http: reqwest::Client,
    state: RwLock<ListState>,
}

impl DataContext {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self::with_client(base_url, reqwest::Client::builder().build()?))
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            state: RwLock::new(ListState::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Items from the last successful fetch
    pub async fn items(&self) -> Vec<Item> {
        self.state.read().await.items.clone()
    }

    /// Total match count from the last successful fetch
    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    fn items_url(&self, params: &FetchParams) -> String {
        format!(
            "{}/api/items?page={}&limit={}&q={}",
            self.base_url,
            params.page,
            params.limit,
            urlencoding::encode(&params.q)
        )
    }

    /// Loads one page and replaces the held items and total.
    ///
    /// When `abort` fires before the response is in, the call returns
    /// [`FetchError::Cancelled`] and state is left as it was.
    #[instrument(skip(self, abort), fields(page = params.page, limit = params.limit, q = %params.q))]
    pub async fn fetch_items(
        &self,
        params: FetchParams,
        abort: Option<AbortRegistration>,
    ) -> Result<(), FetchError> {
        let url = self.items_url(&params);
        // The state update is part of the abortable future so an aborted
        // fetch cannot land after the one that replaced it.
        let load = async {
            let response = self.http.get(&url).send().await?;
            let body = ensure_success(response).await?.bytes().await?;
            let (items, total) = parse_listing(&body);

            let mut state = self.state.write().await;
            debug!(count = items.len(), total, "Loaded items page");
            state.items = items;
            state.total = total;
            Ok::<_, FetchError>(())
        };

        match abort {
            Some(registration) => Abortable::new(load, registration)
                .await
                .map_err(|_| FetchError::Cancelled)?,
            None => load.await,
        }
    }

    /// Fetch a single item for the detail view
    #[instrument(skip(self))]
    pub async fn fetch_item(&self, id: u64) -> Result<Item, FetchError> {
        let url = format!("{}/api/items/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn fetch_stats(&self) -> Result<Stats, FetchError> {
        let url = format!("{}/api/stats", self.base_url);
        let response = ensure_success(self.http.get(&url).send().await?).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);
    warn!(status = %status, message = %message, "Catalog API request failed");

    Err(FetchError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Lenient read of a listing body: a missing or malformed `items` becomes
/// empty and a missing `total` becomes 0.
fn parse_listing(body: &[u8]) -> (Vec<Item>, u64) {
    let json: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let items = json
        .get("items")
        .cloned()
        .and_then(|items| serde_json::from_value(items).ok())
        .unwrap_or_default();
    let total = json.get("total").and_then(Value::as_u64).unwrap_or(0);

    (items, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_url_encodes_search() {
        let context = DataContext::with_client("http://localhost:3001/", reqwest::Client::new());
        let url = context.items_url(&FetchParams {
            page: 2,
            limit: 100,
            q: "ultra wide & co".to_string(),
        });
        assert_eq!(
            url,
            "http://localhost:3001/api/items?page=2&limit=100&q=ultra%20wide%20%26%20co"
        );
    }

    #[test]
    fn test_default_params() {
        let context = DataContext::with_client("http://api", reqwest::Client::new());
        assert_eq!(
            context.items_url(&FetchParams::default()),
            "http://api/api/items?page=1&limit=20&q="
        );
    }

    #[test]
    fn test_parse_listing_defaults() {
        assert_eq!(parse_listing(b"null"), (vec![], 0));
        assert_eq!(parse_listing(b"not json"), (vec![], 0));
        assert_eq!(parse_listing(br#"{"items": "nope", "total": 3}"#), (vec![], 3));

        let (items, total) = parse_listing(
            br#"{"items": [{"id": 1, "name": "a", "category": "c", "price": 1.5}]}"#,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(total, 0);
    }
}
