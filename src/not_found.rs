//! The response for requests that do not match any route.

use axum::{
    extract::Request,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{ApiResponse, html::error_view};

/// Respond with a JSON error for unknown API routes and a 404 page otherwise.
pub async fn get_404_not_found(request: Request) -> Response {
    if request.uri().path().starts_with("/api/") {
        return ApiResponse::error("Not found").with_status(StatusCode::NOT_FOUND);
    }

    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Something's missing.",
        "Sorry, we can't find that page. You'll find lots to explore on the home page.",
    );

    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{build_router, test_utils::get_test_app_state};

    #[tokio::test]
    async fn unknown_page_gets_html() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Something's missing."));
    }

    #[tokio::test]
    async fn unknown_api_route_gets_json() {
        let (state, _temp_dir) = get_test_app_state();
        let server = TestServer::new(build_router(state)).expect("Could not create test server");

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "success": false, "error": "Not found" }));
    }
}
