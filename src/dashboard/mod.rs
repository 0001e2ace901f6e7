//! The dashboard: headline totals for a user as JSON and as an HTML page.

mod endpoint;
mod page;
mod stats;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use endpoint::get_dashboard_endpoint;
pub use page::get_dashboard_page;
pub use stats::{DashboardStats, build_dashboard_stats};

/// The state needed for the dashboard endpoint and page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
