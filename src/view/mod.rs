//! View-Models
//!
//! Page state for the two meal pages plus their text rendering:
//!
//! - **MealListViewModel**: the home page list and calorie total
//! - **MealFormViewModel**: the add/edit form
//! - **render**: plain-text output of either page
//!
//! The `is_loading`/`is_saving`/`is_deleting` flags are advisory. They tell the
//! renderer which controls to disable; the view-models never refuse a call
//! because a flag is raised.

mod form;
mod list;
pub mod render;

pub use form::{FormMode, FormPhase, MealFormViewModel, SubmitOutcome};
pub use list::{FetchTicket, ListPhase, MealListViewModel};

/// Raises a flag for the lifetime of the guard.
///
/// The flag is lowered on drop, so it is cleared on every exit path, including
/// when the owning future is dropped mid-request.
pub(crate) struct FlagGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> FlagGuard<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
