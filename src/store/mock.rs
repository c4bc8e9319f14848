//! Scripted in-memory store for view-model tests

use super::{MealStore, StoredMeals, TransportError};
use crate::meals::{Meal, MealPayload};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A call received by [`ScriptedStore`]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StoreCall {
    ListAll,
    GetOne(String),
    Create(MealPayload),
    Update(String, MealPayload),
    Delete(String),
}

/// Records every call and answers from a fixed script
#[derive(Default)]
pub(crate) struct ScriptedStore {
    calls: Mutex<Vec<StoreCall>>,
    meals: Mutex<Option<StoredMeals>>,
    failing: AtomicBool,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store holding `meals` in document order
    pub(crate) fn with_meals(meals: Vec<(&str, Meal)>) -> Self {
        let store = Self::new();
        *store.meals.lock().unwrap() = Some(
            meals
                .into_iter()
                .map(|(key, meal)| (key.to_string(), meal))
                .collect(),
        );
        store
    }

    /// Make every subsequent call fail (or succeed again)
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            Err(TransportError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MealStore for ScriptedStore {
    async fn list_all(&self) -> Result<Option<StoredMeals>, TransportError> {
        self.record(StoreCall::ListAll)?;
        Ok(self.meals.lock().unwrap().clone())
    }

    async fn get_one(&self, id: &str) -> Result<Option<Meal>, TransportError> {
        self.record(StoreCall::GetOne(id.to_string()))?;
        let meals = self.meals.lock().unwrap();
        Ok(meals
            .iter()
            .flatten()
            .find(|(key, _)| key == id)
            .map(|(_, meal)| meal.clone()))
    }

    async fn create(&self, meal: &MealPayload) -> Result<String, TransportError> {
        self.record(StoreCall::Create(meal.clone()))?;
        let mut meals = self.meals.lock().unwrap();
        let meals = meals.get_or_insert_with(Vec::new);
        let key = format!("-N{:04}", meals.len());
        meals.push((
            key.clone(),
            Meal::new(&meal.time, &meal.description, meal.calories),
        ));
        Ok(key)
    }

    async fn update(&self, id: &str, meal: &MealPayload) -> Result<(), TransportError> {
        self.record(StoreCall::Update(id.to_string(), meal.clone()))?;
        let mut meals = self.meals.lock().unwrap();
        if let Some((_, stored)) = meals.iter_mut().flatten().find(|(key, _)| key == id) {
            *stored = Meal::new(&meal.time, &meal.description, meal.calories);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        self.record(StoreCall::Delete(id.to_string()))?;
        if let Some(meals) = self.meals.lock().unwrap().as_mut() {
            meals.retain(|(key, _)| key != id);
        }
        Ok(())
    }
}

/// Never answers; every call stays pending until the caller gives up
pub(crate) struct StalledStore;

#[async_trait]
impl MealStore for StalledStore {
    async fn list_all(&self) -> Result<Option<StoredMeals>, TransportError> {
        std::future::pending().await
    }

    async fn get_one(&self, _id: &str) -> Result<Option<Meal>, TransportError> {
        std::future::pending().await
    }

    async fn create(&self, _meal: &MealPayload) -> Result<String, TransportError> {
        std::future::pending().await
    }

    async fn update(&self, _id: &str, _meal: &MealPayload) -> Result<(), TransportError> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &str) -> Result<(), TransportError> {
        std::future::pending().await
    }
}
