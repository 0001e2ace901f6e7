//! Users, which are created the first time someone logs in with an email address.

mod db;
mod domain;
mod get;
mod log_in;
mod preferences;
mod query;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use db::{
    PreferencesUpdate, create_user_table, get_or_create_user, get_user, update_preferences,
};
pub use domain::{Preferences, Theme, User};
pub use get::get_user_endpoint;
pub use log_in::log_in_endpoint;
pub use preferences::update_preferences_endpoint;
pub use query::UserQuery;
pub(crate) use query::parse_user_id;

/// The state needed by the user endpoints.
#[derive(Debug, Clone)]
pub struct UserState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
