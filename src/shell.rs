//! Page Shell
//!
//! Resolves paths to pages, mounts the matching view-model and follows the
//! navigation signal a successful create produces.

use crate::routes::Route;
use crate::store::MealStore;
use crate::view::render;
use crate::view::{FormMode, MealFormViewModel, MealListViewModel, SubmitOutcome};
use std::sync::Arc;

/// The page currently shown
pub enum Page {
    List(MealListViewModel),
    Form(MealFormViewModel),
    NotFound,
}

/// Routed container for the meal pages
pub struct Shell {
    store: Arc<dyn MealStore>,
    route: Route,
    page: Page,
}

impl Shell {
    /// Create a shell on the (not yet mounted) list page
    pub fn new(store: Arc<dyn MealStore>) -> Self {
        let page = Page::List(MealListViewModel::new(Arc::clone(&store)));
        Self {
            store,
            route: Route::List,
            page,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Resolve `path` and show its page
    pub async fn open(&mut self, path: &str) {
        self.navigate(Route::parse(path)).await;
    }

    /// Replace the current page with the one for `route` and mount it
    pub async fn navigate(&mut self, route: Route) {
        tracing::debug!(route = %route, "Opening page");

        self.page = match &route {
            Route::List => {
                let mut list = MealListViewModel::new(Arc::clone(&self.store));
                list.mount().await;
                Page::List(list)
            }
            Route::AddMeal => self.mount_form(FormMode::Create).await,
            Route::EditMeal { id } => self.mount_form(FormMode::Edit { id: id.clone() }).await,
            Route::NotFound { path } => {
                tracing::debug!(path = %path, "No page for path");
                Page::NotFound
            }
        };
        self.route = route;
    }

    async fn mount_form(&self, mode: FormMode) -> Page {
        let mut form = MealFormViewModel::new(Arc::clone(&self.store), mode);
        form.mount().await;
        Page::Form(form)
    }

    /// The list view-model, if the list page is shown
    pub fn list(&self) -> Option<&MealListViewModel> {
        match &self.page {
            Page::List(list) => Some(list),
            _ => None,
        }
    }

    /// The form view-model, if a form page is shown
    pub fn form(&self) -> Option<&MealFormViewModel> {
        match &self.page {
            Page::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Mutable form access for field edits
    pub fn form_mut(&mut self) -> Option<&mut MealFormViewModel> {
        match &mut self.page {
            Page::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Re-fetch the list page. No-op on other pages.
    pub async fn refresh(&mut self) {
        if let Page::List(list) = &mut self.page {
            list.refresh().await;
        }
    }

    /// Submit the current form and follow any navigation it asks for.
    ///
    /// Returns `None` when no form is shown.
    pub async fn submit_form(&mut self) -> Option<SubmitOutcome> {
        let outcome = match &mut self.page {
            Page::Form(form) => form.submit().await,
            _ => return None,
        };

        if let SubmitOutcome::Navigate(route) = &outcome {
            self.navigate(route.clone()).await;
        }
        Some(outcome)
    }

    /// Delete a meal from the list page.
    ///
    /// Returns `None` when the list is not shown, otherwise whether the store
    /// accepted the delete.
    pub async fn delete_meal(&mut self, id: &str) -> Option<bool> {
        match &mut self.page {
            Page::List(list) => Some(list.delete(id).await),
            _ => None,
        }
    }

    /// Render the current page as text
    pub fn render(&self) -> String {
        match &self.page {
            Page::List(list) => render::render_list(list),
            Page::Form(form) => render::render_form(form),
            Page::NotFound => render::render_not_found(),
        }
    }
}
