//! Database health check.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;

use crate::{ApiResponse, AppState, Error, app_state::lock_connection, db::list_tables};

/// The state needed for the health check.
#[derive(Debug, Clone)]
pub struct HealthState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for HealthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The result of a successful health check.
#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub connected: bool,
    pub tables: Vec<String>,
}

/// Check that the database can be queried and list its tables.
pub async fn test_db_endpoint(State(state): State<HealthState>) -> Response {
    let tables = lock_connection(&state.db_connection)
        .and_then(|connection| list_tables(&connection));

    match tables {
        Ok(tables) => ApiResponse::success(DatabaseStatus {
            connected: true,
            tables,
        })
        .with_message("Database connection successful")
        .into_response(),
        Err(error) => database_error_response(error),
    }
}

fn database_error_response(error: Error) -> Response {
    tracing::error!("Database health check failed: {error}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Failed to connect to the database",
            "data": { "connected": false },
        })),
    )
        .into_response()
}

#[cfg(test)]
mod test_db_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{Error, build_router, test_utils::get_test_app_state};

    use super::database_error_response;

    #[tokio::test]
    async fn reports_tables() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server.get("/api/test-db").await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "message": "Database connection successful",
            "data": {
                "connected": true,
                "tables": ["categories", "transactions", "users"],
            },
        }));
    }

    #[test]
    fn failure_reports_disconnected() {
        let response = database_error_response(Error::DatabaseLockError);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
