//! Remote Meal Store
//!
//! Access to the JSON-document collection `meals` that holds every record.
//!
//! ## Architecture
//!
//! - **MealStore**: the five CRUD operations the view-models depend on
//! - **HttpMealStore**: `reqwest` implementation against `{base_url}/meals.json`
//!
//! Every call is one round trip. There are no retries and no caching; any
//! failure comes back as a [`TransportError`].

mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpMealStore, StoreConfig};

use crate::meals::{Meal, MealPayload};
use async_trait::async_trait;
use thiserror::Error;

/// Entries of the collection as `(key, record)` pairs, in store document order
pub type StoredMeals = Vec<(String, Meal)>;

/// CRUD contract over the `meals` collection
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Fetch the whole collection.
    ///
    /// `Ok(None)` means the store returned no document; callers treat it the
    /// same as an empty collection.
    async fn list_all(&self) -> Result<Option<StoredMeals>, TransportError>;

    /// Fetch one record. `Ok(None)` covers both "not found" and an empty body.
    async fn get_one(&self, id: &str) -> Result<Option<Meal>, TransportError>;

    /// Persist a new record and return the key the store assigned
    async fn create(&self, meal: &MealPayload) -> Result<String, TransportError>;

    /// Overwrite a record in full
    async fn update(&self, id: &str, meal: &MealPayload) -> Result<(), TransportError>;

    /// Remove a record
    async fn delete(&self, id: &str) -> Result<(), TransportError>;
}

/// Failure to complete a store call.
///
/// The variants only shape the log message. Callers handle every variant the
/// same way.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Meal store unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Store returned HTTP {status}")]
    Status { status: u16 },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Classify a `reqwest` send error
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Unavailable
        } else {
            TransportError::Request(err)
        }
    }
}
