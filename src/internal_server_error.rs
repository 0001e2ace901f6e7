//! The page to display when a page handler fails.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{Error, html::error_view};

pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// Render `error` as an HTML error page.
///
/// Client errors show their own message, server errors are logged and shown
/// as a generic 500 page.
pub fn into_page_response(error: Error) -> Response {
    let status = error.status_code();

    if status.is_server_error() {
        tracing::error!("could not render page: {error}");
        return InternalServerError::default().into_response();
    }

    let description = error.to_string();
    let page = error_view(
        status.canonical_reason().unwrap_or("Error"),
        status.as_str(),
        &description,
        "Check the link and try again",
    );

    (status, Html(page.into_string())).into_response()
}

#[cfg(test)]
mod into_page_response_tests {
    use axum::http::StatusCode;

    use crate::{
        Error,
        test_utils::{assert_content_type, assert_valid_html, parse_html_document},
    };

    use super::into_page_response;

    #[tokio::test]
    async fn client_error_shows_message() {
        let response = into_page_response(Error::MissingUserId);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(document.html().contains("User ID is required"));
    }

    #[tokio::test]
    async fn server_error_hides_details() {
        let response = into_page_response(Error::SqlError(rusqlite::Error::InvalidQuery));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let document = parse_html_document(response).await;
        assert!(!document.html().contains("SQL"));
        assert!(document.html().contains("Sorry, something went wrong."));
    }
}
