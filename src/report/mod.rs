//! Filtered transaction reports and their CSV export.

mod endpoint;
mod export;
mod filter;
mod summary;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use endpoint::{export_report_endpoint, get_report_endpoint};
pub use export::write_csv;
pub use filter::ReportQuery;
pub use summary::{ReportSummary, build_report_summary};

/// The state needed for the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
