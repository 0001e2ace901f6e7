//! The report and CSV export endpoints.

use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use time::{OffsetDateTime, macros::format_description};

use crate::{
    ApiResponse, Error,
    app_state::lock_connection,
    report::{ReportQuery, ReportState, ReportSummary, build_report_summary, write_csv},
    transaction::{TransactionWithCategory, get_all_transactions_for_user},
};

const REPORT_FAILURE_MESSAGE: &str = "Failed to generate report";
const EXPORT_FAILURE_MESSAGE: &str = "Failed to export report";

/// A report's summary and the transactions it was computed from.
#[derive(Debug, Serialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub transactions: Vec<TransactionWithCategory>,
}

/// Get the user's transactions that pass the filters, newest first, with a summary.
pub async fn get_report_endpoint(
    State(state): State<ReportState>,
    WithRejection(Query(query), _): WithRejection<Query<ReportQuery>, Error>,
) -> Response {
    match get_filtered_transactions(&state, &query) {
        Ok(transactions) => ApiResponse::success(Report {
            summary: build_report_summary(&transactions),
            transactions,
        })
        .into_response(),
        Err(error) => error.into_json_response(REPORT_FAILURE_MESSAGE),
    }
}

/// Download the user's transactions that pass the filters as a CSV file.
pub async fn export_report_endpoint(
    State(state): State<ReportState>,
    WithRejection(Query(query), _): WithRejection<Query<ReportQuery>, Error>,
) -> Response {
    let transactions = match get_filtered_transactions(&state, &query) {
        Ok(transactions) if transactions.is_empty() => {
            return Error::NothingToExport.into_json_response(EXPORT_FAILURE_MESSAGE);
        }
        Ok(transactions) => transactions,
        Err(error) => return error.into_json_response(EXPORT_FAILURE_MESSAGE),
    };

    let csv = match write_csv(&transactions) {
        Ok(csv) => csv,
        Err(error) => return error.into_json_response(EXPORT_FAILURE_MESSAGE),
    };

    let today = OffsetDateTime::now_utc()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default();
    let disposition = format!("attachment; filename=\"expense-report-{today}.csv\"");

    (
        [
            (CONTENT_TYPE, "text/csv".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response()
}

fn get_filtered_transactions(
    state: &ReportState,
    query: &ReportQuery,
) -> Result<Vec<TransactionWithCategory>, Error> {
    let (user_id, filter) = query.validate()?;
    let connection = lock_connection(&state.db_connection)?;
    let transactions = get_all_transactions_for_user(user_id, &connection)?;

    Ok(filter.apply(transactions))
}
