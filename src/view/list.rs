//! Meal List View-Model
//!
//! Holds the meals shown on the home page, most recent first, together with
//! the calorie total and the advisory loading/deleting flags.
//!
//! Store failures never escape: a failed fetch leaves an empty list, a failed
//! delete leaves the list untouched. Both are logged.

use super::FlagGuard;
use crate::meals::Meal;
use crate::store::{MealStore, StoredMeals, TransportError};
use std::sync::Arc;

/// Lifecycle of the list page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Not mounted yet
    Idle,
    /// A fetch is in flight
    Loading,
    /// Showing the current list
    Ready,
    /// A delete is in flight
    Deleting,
}

/// Identifies one fetch invocation.
///
/// Only the completion carrying the newest ticket is applied; older
/// completions are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// State and orchestration for the meal list
pub struct MealListViewModel {
    store: Arc<dyn MealStore>,
    meals: Vec<Meal>,
    total_calories: u64,
    is_loading: bool,
    is_deleting: bool,
    /// Number of fetches issued so far
    fetch_generation: u64,
}

impl MealListViewModel {
    /// Create an unmounted view-model
    pub fn new(store: Arc<dyn MealStore>) -> Self {
        Self {
            store,
            meals: Vec::new(),
            total_calories: 0,
            is_loading: false,
            is_deleting: false,
            fetch_generation: 0,
        }
    }

    /// Meals in display order (most recently added first)
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Sum of `calories` over [`meals`](Self::meals)
    pub fn total_calories(&self) -> u64 {
        self.total_calories
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn phase(&self) -> ListPhase {
        if self.fetch_generation == 0 {
            ListPhase::Idle
        } else if self.is_loading {
            ListPhase::Loading
        } else if self.is_deleting {
            ListPhase::Deleting
        } else {
            ListPhase::Ready
        }
    }

    /// Initial load when the page is shown
    pub async fn mount(&mut self) {
        self.fetch().await;
    }

    /// Explicit re-fetch trigger
    pub async fn refresh(&mut self) {
        self.fetch().await;
    }

    /// Load the whole collection and rebuild the list and total.
    ///
    /// If the returned future is dropped before the store answers, the
    /// loading flag is lowered and the list is left as it was.
    pub async fn fetch(&mut self) {
        let ticket = self.begin_fetch();
        let store = Arc::clone(&self.store);
        let result = {
            let _loading = FlagGuard::raise(&mut self.is_loading);
            store.list_all().await
        };
        self.complete_fetch(ticket, result);
    }

    /// Enter the loading state and issue a new ticket
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.is_loading = true;
        FetchTicket(self.fetch_generation)
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` when the ticket has been superseded and the result was
    /// discarded.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<StoredMeals>, TransportError>,
    ) -> bool {
        if ticket.0 != self.fetch_generation {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.fetch_generation,
                "Discarding superseded meal list response"
            );
            return false;
        }

        self.meals = match result {
            Ok(Some(entries)) => normalize(entries),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch meals");
                Vec::new()
            }
        };
        self.recompute_total();
        self.is_loading = false;

        tracing::debug!(
            count = self.meals.len(),
            total_calories = self.total_calories,
            "Meal list loaded"
        );
        true
    }

    /// Delete a meal remotely, then drop it from the local list.
    ///
    /// The remote call is made even if `id` is not in the list. Returns
    /// whether the store accepted the delete.
    pub async fn delete(&mut self, id: &str) -> bool {
        let store = Arc::clone(&self.store);
        let result = {
            let _deleting = FlagGuard::raise(&mut self.is_deleting);
            store.delete(id).await
        };
        self.complete_delete(id, result)
    }

    /// Raise the deleting flag
    pub fn begin_delete(&mut self) {
        self.is_deleting = true;
    }

    /// Apply the outcome of a delete and clear the deleting flag
    pub fn complete_delete(&mut self, id: &str, result: Result<(), TransportError>) -> bool {
        let deleted = match result {
            Ok(()) => {
                self.meals.retain(|meal| meal.id.as_deref() != Some(id));
                self.recompute_total();
                tracing::info!(id = %id, "Meal deleted");
                true
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to delete meal");
                false
            }
        };
        self.is_deleting = false;
        deleted
    }

    fn recompute_total(&mut self) {
        self.total_calories = self.meals.iter().map(|m| u64::from(m.calories)).sum();
    }
}

/// Key every entry by its store key and put the newest first
fn normalize(entries: StoredMeals) -> Vec<Meal> {
    entries
        .into_iter()
        .rev()
        .map(|(key, meal)| Meal {
            id: Some(key),
            ..meal
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::{ScriptedStore, StalledStore, StoreCall};
    use std::time::Duration;

    fn sample_store() -> Arc<ScriptedStore> {
        Arc::new(ScriptedStore::with_meals(vec![
            ("m1", Meal::new("breakfast", "Oatmeal", 300)),
            ("m2", Meal::new("lunch", "Salad", 200)),
            ("m3", Meal::new("dinner", "Pasta", 650)),
        ]))
    }

    fn ids(vm: &MealListViewModel) -> Vec<&str> {
        vm.meals().iter().filter_map(|m| m.id.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_fetch_reverses_order_and_sums() {
        let store = sample_store();
        let mut vm = MealListViewModel::new(store.clone());
        assert_eq!(vm.phase(), ListPhase::Idle);

        vm.mount().await;

        assert_eq!(ids(&vm), vec!["m3", "m2", "m1"]);
        assert_eq!(vm.total_calories(), 1150);
        assert_eq!(vm.phase(), ListPhase::Ready);
        assert!(!vm.is_loading());
        assert_eq!(store.calls(), vec![StoreCall::ListAll]);
    }

    #[tokio::test]
    async fn test_string_calories_are_coerced() {
        let meal: Meal = serde_json::from_value(
            serde_json::json!({"time": "lunch", "description": "Salad", "calories": "200"}),
        )
        .unwrap();
        let store = Arc::new(ScriptedStore::with_meals(vec![("a", meal)]));
        let mut vm = MealListViewModel::new(store);

        vm.fetch().await;

        assert_eq!(vm.meals().len(), 1);
        assert_eq!(vm.meals()[0].calories, 200);
        assert_eq!(vm.meals()[0].id.as_deref(), Some("a"));
        assert_eq!(vm.total_calories(), 200);
    }

    #[tokio::test]
    async fn test_no_document_is_empty_list() {
        let store = Arc::new(ScriptedStore::new());
        let mut vm = MealListViewModel::new(store);

        vm.fetch().await;

        assert!(vm.is_empty());
        assert_eq!(vm.total_calories(), 0);
        assert_eq!(vm.phase(), ListPhase::Ready);
    }

    // A failed fetch is indistinguishable from an empty store.
    #[tokio::test]
    async fn test_failed_fetch_clears_previous_state() {
        let store = sample_store();
        let mut vm = MealListViewModel::new(store.clone());
        vm.fetch().await;
        assert_eq!(vm.meals().len(), 3);

        store.set_failing(true);
        vm.refresh().await;

        assert!(vm.is_empty());
        assert_eq!(vm.total_calories(), 0);
        assert!(!vm.is_loading());
        assert_eq!(vm.phase(), ListPhase::Ready);
    }

    #[tokio::test]
    async fn test_refresh_fetches_again() {
        let store = sample_store();
        let mut vm = MealListViewModel::new(store.clone());

        vm.mount().await;
        vm.refresh().await;

        assert_eq!(store.calls(), vec![StoreCall::ListAll, StoreCall::ListAll]);
    }

    #[tokio::test]
    async fn test_delete_removes_and_recomputes() {
        let store = sample_store();
        let mut vm = MealListViewModel::new(store.clone());
        vm.fetch().await;
        let before = vm.total_calories();

        assert!(vm.delete("m2").await);

        assert_eq!(ids(&vm), vec!["m3", "m1"]);
        assert_eq!(vm.total_calories(), before - 200);
        assert!(!vm.is_deleting());
        assert_eq!(
            store.calls(),
            vec![StoreCall::ListAll, StoreCall::Delete("m2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_id_still_calls_store() {
        let store = sample_store();
        let mut vm = MealListViewModel::new(store.clone());
        vm.fetch().await;
        let before: Vec<Meal> = vm.meals().to_vec();

        vm.delete("missing").await;

        assert_eq!(vm.meals(), before.as_slice());
        assert_eq!(vm.total_calories(), 1150);
        assert_eq!(
            store.calls().last(),
            Some(&StoreCall::Delete("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let store = sample_store();
        let mut vm = MealListViewModel::new(store.clone());
        vm.fetch().await;

        store.set_failing(true);
        assert!(!vm.delete("m1").await);

        assert_eq!(ids(&vm), vec!["m3", "m2", "m1"]);
        assert_eq!(vm.total_calories(), 1150);
        assert!(!vm.is_deleting());
        assert_eq!(vm.phase(), ListPhase::Ready);
    }

    #[test]
    fn test_flags_while_in_flight() {
        let mut vm = MealListViewModel::new(Arc::new(ScriptedStore::new()));

        let ticket = vm.begin_fetch();
        assert!(vm.is_loading());
        assert_eq!(vm.phase(), ListPhase::Loading);
        vm.complete_fetch(ticket, Ok(None));

        vm.begin_delete();
        assert_eq!(vm.phase(), ListPhase::Deleting);
        vm.complete_delete("x", Ok(()));
        assert_eq!(vm.phase(), ListPhase::Ready);
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut vm = MealListViewModel::new(Arc::new(ScriptedStore::new()));

        let older = vm.begin_fetch();
        let newer = vm.begin_fetch();

        let fresh = vec![("new".to_string(), Meal::new("dinner", "Soup", 150))];
        assert!(vm.complete_fetch(newer, Ok(Some(fresh))));

        let stale = vec![("old".to_string(), Meal::new("lunch", "Burger", 900))];
        assert!(!vm.complete_fetch(older, Ok(Some(stale))));

        assert_eq!(ids(&vm), vec!["new"]);
        assert_eq!(vm.total_calories(), 150);
    }

    #[test]
    fn test_stale_completion_does_not_end_loading() {
        let mut vm = MealListViewModel::new(Arc::new(ScriptedStore::new()));

        let older = vm.begin_fetch();
        let newer = vm.begin_fetch();

        assert!(!vm.complete_fetch(older, Err(TransportError::Timeout)));
        assert!(vm.is_loading());

        assert!(vm.complete_fetch(newer, Ok(None)));
        assert!(!vm.is_loading());
    }

    #[tokio::test]
    async fn test_abandoned_fetch_lowers_loading() {
        let mut vm = MealListViewModel::new(Arc::new(StalledStore));

        let elapsed = tokio::time::timeout(Duration::from_millis(20), vm.fetch()).await;

        assert!(elapsed.is_err());
        assert!(!vm.is_loading());
        assert_eq!(vm.phase(), ListPhase::Ready);
    }

    #[tokio::test]
    async fn test_abandoned_delete_lowers_deleting() {
        let mut vm = MealListViewModel::new(Arc::new(StalledStore));
        let ticket = vm.begin_fetch();
        vm.complete_fetch(
            ticket,
            Ok(Some(vec![("m1".to_string(), Meal::new("lunch", "Salad", 200))])),
        );

        let elapsed = tokio::time::timeout(Duration::from_millis(20), vm.delete("m1")).await;

        assert!(elapsed.is_err());
        assert!(!vm.is_deleting());
        assert_eq!(vm.phase(), ListPhase::Ready);
        assert_eq!(ids(&vm), vec!["m1"]);
        assert_eq!(vm.total_calories(), 200);
    }
}
