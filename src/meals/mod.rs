//! Meal Records
//!
//! The data model shared by the store client and the view-models:
//!
//! - **Meal**: one recorded eating event, persisted or draft
//! - **MealPayload**: the exact body written to the store
//! - **TimeSlot**: the fixed table of meal slots and their display names

mod types;

pub use types::{time_display_name, Meal, MealField, MealPayload, TimeSlot};
