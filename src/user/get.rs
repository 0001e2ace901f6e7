//! Endpoint for fetching a user.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    ApiResponse, ObjectId,
    app_state::lock_connection,
    user::{UserState, get_user},
};

const FAILURE_MESSAGE: &str = "Failed to fetch user";

/// Get the user with the ID in the path.
pub async fn get_user_endpoint(
    State(state): State<UserState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match ObjectId::parse(&user_id) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match get_user(user_id, &connection) {
        Ok(user) => ApiResponse::success(user).into_response(),
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod get_user_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        ObjectId,
        test_utils::{get_test_connection, parse_json_body},
        user::{UserState, get_or_create_user},
    };

    use super::get_user_endpoint;

    fn get_state() -> UserState {
        UserState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        }
    }

    #[tokio::test]
    async fn get_existing_user() {
        let state = get_state();
        let user =
            get_or_create_user("frank@example.com", None, &state.db_connection.lock().unwrap())
                .unwrap();

        let response = get_user_endpoint(State(state), Path(user.id.to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_json_body(response).await;
        assert_eq!(body["data"]["email"], "frank@example.com");
        assert_eq!(body["data"]["_id"], user.id.to_string());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let response =
            get_user_endpoint(State(get_state()), Path(ObjectId::generate().to_string())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = parse_json_body(response).await;
        assert_eq!(body["success"], false);
    }
}
