//! Meal Store HTTP Client
//!
//! `reqwest` client for a JSON-document backend that exposes the collection
//! as `/meals.json` and single records as `/meals/{id}.json`.

use super::{MealStore, StoredMeals, TransportError};
use crate::meals::{Meal, MealPayload};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// HTTP implementation of [`MealStore`]
pub struct HttpMealStore {
    client: Client,
    config: StoreConfig,
}

/// Connection settings for the meal store
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store (e.g., "http://localhost:9000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds, `None` keeps the transport default
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:9000".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Response to a POST on the collection
///
/// The assigned key is normally under `name`; some stores answer with `id`.
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

impl CreatedResponse {
    fn assigned_id(self) -> Option<String> {
        self.name.or(self.id)
    }
}

impl HttpMealStore {
    /// Create a client for the configured store
    pub fn new(config: StoreConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn collection_url(&self) -> String {
        format!("{}/meals.json", self.base_url())
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/meals/{}.json", self.base_url(), urlencoding::encode(id))
    }

    /// Reject non-2xx responses
    fn check_status(response: Response) -> Result<Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
            })
        }
    }

    /// Decode a JSON body where an empty body and `null` both mean "no data"
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>, TransportError> {
        let text = response.text().await.map_err(TransportError::from_send)?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<T>>(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Turn the collection document into ordered `(key, meal)` pairs
    fn collect_entries(document: Map<String, Value>) -> StoredMeals {
        let mut meals = Vec::with_capacity(document.len());

        for (key, value) in document {
            if !value.is_object() {
                tracing::warn!(key = %key, "Skipping meal entry that is not an object");
                continue;
            }

            match serde_json::from_value::<Meal>(value) {
                Ok(meal) => meals.push((key, meal)),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Skipping unreadable meal entry");
                }
            }
        }

        meals
    }
}

#[async_trait]
impl MealStore for HttpMealStore {
    async fn list_all(&self) -> Result<Option<StoredMeals>, TransportError> {
        let url = self.collection_url();
        tracing::debug!(url = %url, "Listing meals");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::from_send)?;
        let response = Self::check_status(response)?;

        let document: Option<Map<String, Value>> = Self::read_json(response).await?;
        Ok(document.map(Self::collect_entries))
    }

    async fn get_one(&self, id: &str) -> Result<Option<Meal>, TransportError> {
        let url = self.record_url(id);
        tracing::debug!(url = %url, "Fetching meal");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::from_send)?;
        let response = Self::check_status(response)?;

        Self::read_json(response).await
    }

    async fn create(&self, meal: &MealPayload) -> Result<String, TransportError> {
        let url = self.collection_url();
        tracing::debug!(url = %url, "Creating meal");

        let response = self
            .client
            .post(&url)
            .json(meal)
            .send()
            .await
            .map_err(TransportError::from_send)?;
        let response = Self::check_status(response)?;

        let created: Option<CreatedResponse> = Self::read_json(response).await?;
        created
            .and_then(CreatedResponse::assigned_id)
            .ok_or_else(|| TransportError::Decode("missing assigned id".to_string()))
    }

    async fn update(&self, id: &str, meal: &MealPayload) -> Result<(), TransportError> {
        let url = self.record_url(id);
        tracing::debug!(url = %url, "Updating meal");

        let response = self
            .client
            .put(&url)
            .json(meal)
            .send()
            .await
            .map_err(TransportError::from_send)?;
        Self::check_status(response)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        let url = self.record_url(id);
        tracing::debug!(url = %url, "Deleting meal");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(TransportError::from_send)?;
        Self::check_status(response)?;

        Ok(())
    }
}
