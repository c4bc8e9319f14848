//! Meal Form View-Model
//!
//! Draft state for the add/edit page. The mode is fixed when the view-model
//! is created from its route and never changes afterwards.

use super::FlagGuard;
use crate::meals::{Meal, MealField, MealPayload, TimeSlot};
use crate::routes::Route;
use crate::store::{MealStore, TransportError};
use std::sync::Arc;

/// Whether the form creates a new meal or edits a stored one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    /// Mode implied by an optional route identifier
    pub fn from_id(id: Option<String>) -> Self {
        match id {
            Some(id) => FormMode::Edit { id },
            None => FormMode::Create,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

/// Lifecycle of the form page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Loading,
    Ready,
    Saving,
}

/// Result of a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The meal was created; the shell should open this route
    Navigate(Route),
    /// Remain on the form (every edit submit, and failed creates)
    Stay,
    /// Required fields are empty; nothing was sent
    Incomplete(Vec<MealField>),
}

/// State and orchestration for the meal form
pub struct MealFormViewModel {
    store: Arc<dyn MealStore>,
    mode: FormMode,
    draft: Meal,
    is_loading: bool,
    is_saving: bool,
    mounted: bool,
}

impl MealFormViewModel {
    /// Create an unmounted form with a blank draft
    pub fn new(store: Arc<dyn MealStore>, mode: FormMode) -> Self {
        Self {
            store,
            mode,
            draft: Meal::draft(),
            is_loading: false,
            is_saving: false,
            mounted: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &Meal {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn phase(&self) -> FormPhase {
        if !self.mounted {
            FormPhase::Idle
        } else if self.is_loading {
            FormPhase::Loading
        } else if self.is_saving {
            FormPhase::Saving
        } else {
            FormPhase::Ready
        }
    }

    /// Page heading
    pub fn title(&self) -> &'static str {
        if self.mode.is_edit() {
            "Edit the meal"
        } else {
            "Add a new meal"
        }
    }

    /// Submit button label
    pub fn submit_label(&self) -> &'static str {
        if self.mode.is_edit() {
            "Save changes"
        } else {
            "Save"
        }
    }

    /// Prepare the draft: blank in create mode, loaded from the store in edit
    /// mode.
    ///
    /// An edit fetch that returns nothing or fails leaves the draft as it was.
    pub async fn mount(&mut self) {
        self.mounted = true;

        let id = match &self.mode {
            FormMode::Create => {
                self.draft = Meal::draft();
                return;
            }
            FormMode::Edit { id } => id.clone(),
        };

        let store = Arc::clone(&self.store);
        let _loading = FlagGuard::raise(&mut self.is_loading);

        match store.get_one(&id).await {
            Ok(Some(meal)) => {
                self.draft = Meal { id: None, ..meal };
                tracing::debug!(id = %id, "Loaded meal for editing");
            }
            Ok(None) => {
                tracing::debug!(id = %id, "No meal stored under id, keeping draft");
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to load meal");
            }
        }
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.draft.time = time.into();
    }

    pub fn set_time_slot(&mut self, slot: TimeSlot) {
        self.set_time(slot.id());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_calories(&mut self, calories: u32) {
        self.draft.calories = calories;
    }

    /// Required fields that are still empty
    pub fn missing_fields(&self) -> Vec<MealField> {
        let mut missing = Vec::new();
        if self.draft.time.is_empty() {
            missing.push(MealField::Time);
        }
        if self.draft.description.is_empty() {
            missing.push(MealField::Description);
        }
        missing
    }

    /// Send the draft to the store.
    ///
    /// Edit mode updates the stored record and stays on the form whatever the
    /// outcome. Create mode navigates back to the list only if the store
    /// accepted the new meal. If the returned future is dropped before the
    /// store answers, the saving flag is lowered.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(missing) => return SubmitOutcome::Incomplete(missing),
        };

        let store = Arc::clone(&self.store);
        let result = {
            let Self {
                mode, is_saving, ..
            } = &mut *self;
            let _saving = FlagGuard::raise(is_saving);

            match mode {
                FormMode::Edit { id } => store.update(id, &payload).await.map(|()| id.clone()),
                FormMode::Create => store.create(&payload).await,
            }
        };

        self.complete_submit(result)
    }

    /// Check required fields, raise the saving flag and build the payload.
    ///
    /// Returns the missing fields instead when the draft is incomplete; the
    /// flag stays down in that case.
    pub fn begin_submit(&mut self) -> Result<MealPayload, Vec<MealField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }

        self.is_saving = true;
        Ok(self.draft.payload())
    }

    /// Apply the store's answer to a submit and lower the saving flag.
    ///
    /// `result` carries the id of the saved meal: the assigned one on create,
    /// the edited one on update.
    pub fn complete_submit(&mut self, result: Result<String, TransportError>) -> SubmitOutcome {
        self.is_saving = false;

        match (&self.mode, result) {
            (FormMode::Edit { .. }, Ok(id)) => {
                tracing::info!(id = %id, "Meal updated");
                SubmitOutcome::Stay
            }
            (FormMode::Edit { id }, Err(e)) => {
                tracing::error!(id = %id, error = %e, "Failed to update meal");
                SubmitOutcome::Stay
            }
            (FormMode::Create, Ok(id)) => {
                tracing::info!(id = %id, "Meal created");
                SubmitOutcome::Navigate(Route::List)
            }
            (FormMode::Create, Err(e)) => {
                tracing::error!(error = %e, "Failed to create meal");
                SubmitOutcome::Stay
            }
        }
    }
}
