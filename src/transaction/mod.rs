//! Income and expense transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, PaginationConfig};

pub use create::create_transaction_endpoint;
#[cfg(test)]
pub use db::get_transaction;
pub use db::{
    count_transactions_for_user, create_transaction, create_transaction_table,
    delete_transaction, get_all_transactions_for_user, get_transactions_by_user,
    update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{
    NewTransaction, Transaction, TransactionForm, TransactionUpdate, TransactionWithCategory,
    parse_date_time, validate_amount,
};
pub use edit::update_transaction_endpoint;
pub use list::get_transactions_endpoint;

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
