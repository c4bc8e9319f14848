//! Text Rendering
//!
//! Renders page state as plain text for the terminal shell.

use super::{FormPhase, ListPhase, MealFormViewModel, MealListViewModel};
use crate::meals::time_display_name;
use crate::routes::Route;

/// Shown in place of a page while its data loads
pub const LOADING_INDICATOR: &str = "Loading...";

/// Shown when the list has no meals
pub const EMPTY_LIST_MESSAGE: &str = "There are no meals yet";

/// Render the meal list page.
///
/// While loading, only the indicator is shown.
pub fn render_list(vm: &MealListViewModel) -> String {
    if matches!(vm.phase(), ListPhase::Idle | ListPhase::Loading) {
        return format!("{}\n", LOADING_INDICATOR);
    }

    let mut out = String::new();

    if vm.is_empty() {
        out.push_str(EMPTY_LIST_MESSAGE);
        out.push('\n');
    }

    out.push_str(&format!(
        "Total Calories: {} kcal    [Add Meal: {}]\n",
        vm.total_calories(),
        Route::AddMeal
    ));

    let delete_label = if vm.is_deleting() {
        "[Deleting...]"
    } else {
        "[Delete]"
    };

    for meal in vm.meals() {
        let id = meal.id.as_deref().unwrap_or_default();
        out.push('\n');
        out.push_str(&format!("{}\n", meal.time_name()));
        out.push_str(&format!("  {}\n", meal.description));
        out.push_str(&format!(
            "  {} kcal    [Edit: {}] {} id={}\n",
            meal.calories,
            Route::edit(id),
            delete_label,
            id
        ));
    }

    out
}

/// Render the add/edit form page
pub fn render_form(vm: &MealFormViewModel) -> String {
    if matches!(vm.phase(), FormPhase::Loading) {
        return format!("{}\n", LOADING_INDICATOR);
    }

    let draft = vm.draft();
    let time = if draft.time.is_empty() {
        "(Select the time of the meal)"
    } else {
        time_display_name(&draft.time)
    };
    let description = if draft.description.is_empty() {
        "(Description of the meal)"
    } else {
        draft.description.as_str()
    };
    let button = if vm.is_saving() {
        format!("[Saving... {}]", vm.submit_label())
    } else {
        format!("[{}]", vm.submit_label())
    };

    format!(
        "{}\n  Time:        {}\n  Description: {}\n  Calories:    {} kcal\n{}\n",
        vm.title(),
        time,
        description,
        draft.calories,
        button
    )
}

/// Render the fallback page for unknown paths
pub fn render_not_found() -> String {
    "Not found\n".to_string()
}
