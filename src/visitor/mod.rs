//! Records page views in a JSON file and shows them to the site admin.

mod endpoints;
mod log;
mod middleware;
mod page;

use axum::extract::FromRef;

use crate::AppState;

pub use endpoints::{clear_visitors_endpoint, get_visitors_endpoint, log_visitor_endpoint};
pub use log::{MAX_VISITOR_LOG_ENTRIES, VisitorLog, VisitorLogEntry};
pub use middleware::visitor_logging_middleware;
pub use page::get_visitors_page;

impl FromRef<AppState> for VisitorLog {
    fn from_ref(state: &AppState) -> Self {
        state.visitor_log.clone()
    }
}
