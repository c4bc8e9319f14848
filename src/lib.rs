//! # Mealtrack
//!
//! A meal and calorie tracker: list meals with a running calorie total, add,
//! edit and delete them. All records live in a remote JSON-document store;
//! this crate is the client side.
//!
//! ## Modules
//!
//! - [`meals`]: Meal records and the time slot table
//! - [`store`]: Remote store contract and its HTTP client
//! - [`view`]: List and form view-models, text rendering
//! - [`routes`]: Path to page resolution
//! - [`shell`]: Routed page container
//! - [`config`]: File and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mealtrack::{HttpMealStore, Shell, StoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(HttpMealStore::new(StoreConfig::default())?);
//!     let mut shell = Shell::new(store);
//!
//!     shell.open("/").await;
//!     print!("{}", shell.render());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod meals;
pub mod routes;
pub mod shell;
pub mod store;
pub mod view;

pub use config::{Config, ConfigError, LoggingConfig};
pub use meals::{time_display_name, Meal, MealField, MealPayload, TimeSlot};
pub use routes::Route;
pub use shell::{Page, Shell};
pub use store::{HttpMealStore, MealStore, StoreConfig, StoredMeals, TransportError};
pub use view::{
    FetchTicket, FormMode, FormPhase, ListPhase, MealFormViewModel, MealListViewModel,
    SubmitOutcome,
};
