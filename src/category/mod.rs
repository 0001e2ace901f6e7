//! Categories for grouping income and expenses.

mod create;
mod db;
mod defaults;
mod delete;
mod domain;
mod edit;
mod list;
mod seed;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_category_endpoint;
#[cfg(test)]
pub use db::get_category;
pub use db::{
    create_category, create_category_table, delete_category, get_categories_by_user,
    update_category,
};
pub(crate) use db::{CATEGORY_COLUMNS, map_row_with_offset as map_category_row_with_offset};
#[cfg(test)]
pub use defaults::DEFAULT_CATEGORIES;
pub use defaults::seed_default_categories;
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryForm, CategoryName, NewCategory};
pub use edit::update_category_endpoint;
pub use list::get_categories_endpoint;
pub use seed::seed_categories_endpoint;

/// The state needed by the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
