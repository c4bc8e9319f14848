//! Route Table
//!
//! Paths the page shell understands:
//!
//! | Path | Page |
//! |---|---|
//! | `/` | meal list |
//! | `/addMeal` | form, create mode |
//! | `/meals/{id}/edit` | form, edit mode |
//! | anything else | not found |

use std::fmt;

/// A resolved page path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    AddMeal,
    EditMeal { id: String },
    NotFound { path: String },
}

impl Route {
    /// Resolve a path. Query strings, fragments and one trailing slash are
    /// ignored. Paths not starting with `/` are not found.
    pub fn parse(path: &str) -> Route {
        let without_query = path.split(['?', '#']).next().unwrap_or_default();

        let Some(rest) = without_query.strip_prefix('/') else {
            return Route::NotFound {
                path: path.to_string(),
            };
        };
        if rest.is_empty() {
            return Route::List;
        }

        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = rest.split('/').collect();

        match segments.as_slice() {
            ["addMeal"] => Route::AddMeal,
            ["meals", id, "edit"] if !id.is_empty() => Route::EditMeal {
                id: urlencoding::decode(id)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| id.to_string()),
            },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Path that resolves back to this route
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::AddMeal => "/addMeal".to_string(),
            Route::EditMeal { id } => format!("/meals/{}/edit", urlencoding::encode(id)),
            Route::NotFound { path } => path.clone(),
        }
    }

    /// Route of the edit page for a meal
    pub fn edit(id: impl Into<String>) -> Route {
        Route::EditMeal { id: id.into() }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
