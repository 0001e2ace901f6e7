use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::TempDir;

use crate::{AppState, PaginationConfig, VisitorLog, db::initialize};

/// An in-memory database with every table created.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");
    connection
}

/// App state backed by an in-memory database and a visitor log in a
/// temporary directory. Keep the [TempDir] alive for as long as the state is used.
pub(crate) fn get_test_app_state() -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let visitor_log = VisitorLog::new(temp_dir.path().join("visitor-logs.json"));

    let state = AppState {
        db_connection: Arc::new(Mutex::new(get_test_connection())),
        visitor_log,
        pagination_config: PaginationConfig::default(),
    };

    (state, temp_dir)
}
