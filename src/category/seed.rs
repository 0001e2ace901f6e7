//! Endpoint for giving a user the default categories.

use axum::{Json, extract::State, http::StatusCode, response::Response};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    category::{CategoryState, seed_default_categories},
    user::parse_user_id,
};

const FAILURE_MESSAGE: &str = "Failed to seed categories";

/// The JSON body for seeding categories.
#[derive(Debug, Deserialize)]
pub struct SeedCategoriesForm {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Create any missing default categories for a user.
///
/// Responds with 200 if the user already had a full set of categories and 201 otherwise.
pub async fn seed_categories_endpoint(
    State(state): State<CategoryState>,
    WithRejection(Json(form), _): WithRejection<Json<SeedCategoriesForm>, Error>,
) -> Response {
    let user_id = match parse_user_id(form.user_id.as_deref()) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_json_response(FAILURE_MESSAGE),
    };

    match seed_default_categories(user_id, &connection) {
        Ok(outcome) => {
            let status = if outcome.already_seeded {
                StatusCode::OK
            } else {
                StatusCode::CREATED
            };
            let message = outcome.message();

            ApiResponse::success(outcome.categories)
                .with_message(message)
                .with_status(status)
        }
        Err(error) => error.into_json_response(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod seed_categories_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{ObjectId, build_router, test_utils::get_test_app_state};

    #[tokio::test]
    async fn seeding_creates_then_reports_existing() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");
        let body = json!({ "userId": ObjectId::generate().to_string() });

        let first = server.post("/api/seed-categories").json(&body).await;
        let second = server.post("/api/seed-categories").json(&body).await;

        first.assert_status(StatusCode::CREATED);
        let first_body: serde_json::Value = first.json();
        assert_eq!(first_body["message"], "Created 16 new categories");
        assert_eq!(first_body["data"].as_array().unwrap().len(), 16);

        second.assert_status_ok();
        let second_body: serde_json::Value = second.json();
        assert_eq!(
            second_body["message"],
            "Categories already exist for this user"
        );
        assert_eq!(second_body["data"].as_array().unwrap().len(), 16);
    }

    #[tokio::test]
    async fn missing_user_id_is_bad_request() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server.post("/api/seed-categories").json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "success": false,
            "error": "User ID is required",
        }));
    }
}
