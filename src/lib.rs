//! Expense Tracker is a web service for recording income and expenses,
//! organising them into categories and looking at where the money goes.
//!
//! This library provides a REST API that speaks JSON, plus a couple of
//! server-rendered HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod analytics;
mod api_response;
mod app_state;
mod budget;
mod category;
mod currency;
mod dashboard;
mod db;
mod demo;
mod endpoints;
mod health;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod object_id;
mod pagination;
mod report;
mod routing;
mod transaction;
mod transaction_type;
mod user;
mod visitor;

#[cfg(test)]
mod test_utils;

pub use api_response::ApiResponse;
pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use object_id::ObjectId;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use visitor::{MAX_VISITOR_LOG_ENTRIES, VisitorLog};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not include the `userId` query parameter or field.
    #[error("User ID is required")]
    MissingUserId,

    /// One or more required fields were missing from the request body.
    #[error("Missing required fields")]
    MissingFields,

    /// A string did not have the shape of an ObjectId.
    #[error("\"{0}\" is not a valid ID")]
    InvalidObjectId(String),

    /// Transaction and budget amounts must be finite numbers greater than zero.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// A transaction or category type other than "income" or "expense".
    #[error("\"{0}\" is not a valid type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// The analytics time range was not one of the supported day counts.
    #[error("{0} is not a supported time range, expected one of 7, 30, 90 or 365 days")]
    InvalidTimeRange(u32),

    /// A date could not be parsed.
    #[error("could not parse the date \"{0}\"")]
    InvalidDate(String),

    /// A currency code that the app does not know about.
    #[error("\"{0}\" is not a supported currency")]
    InvalidCurrency(String),

    /// The request body was not valid JSON for the endpoint.
    #[error("invalid request body: {0}")]
    InvalidJson(String),

    /// The query string could not be parsed.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// Demo data can only be seeded for the demo user.
    #[error("Invalid demo user ID")]
    InvalidDemoUser,

    /// A report export was requested for an empty selection.
    #[error("No data to export")]
    NothingToExport,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a category that does not exist
    #[error("Category not found or update failed")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("Category not found or delete failed")]
    DeleteMissingCategory,

    /// Tried to update a transaction that does not exist
    #[error("Transaction not found or update failed")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("Transaction not found or delete failed")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Reading or writing the visitor log file failed.
    #[error("visitor log I/O failed: {0}")]
    VisitorLogError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while writing CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code that should be sent for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingUserId
            | Error::MissingFields
            | Error::InvalidObjectId(_)
            | Error::InvalidAmount(_)
            | Error::InvalidTransactionType(_)
            | Error::InvalidTimeRange(_)
            | Error::InvalidDate(_)
            | Error::InvalidCurrency(_)
            | Error::InvalidJson(_)
            | Error::InvalidQuery(_)
            | Error::InvalidDemoUser
            | Error::NothingToExport => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::VisitorLogError(_)
            | Error::JSONSerializationError(_)
            | Error::CsvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into a JSON envelope response.
    ///
    /// Client errors (4xx) report their own message. Server errors are logged
    /// and replaced with `failure_message`, e.g. "Failed to fetch categories",
    /// so that internal details never reach the client.
    pub fn into_json_response(self, failure_message: &str) -> Response {
        let status = self.status_code();

        let error_message = if status.is_server_error() {
            tracing::error!("{failure_message}: {self}");
            failure_message.to_owned()
        } else {
            self.to_string()
        };

        ApiResponse::error(error_message).with_status(status)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("An unexpected error occurred")
    }
}
