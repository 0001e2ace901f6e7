//! Whether money is coming in or going out.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The direction of a transaction, shared by categories and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received, e.g. salary.
    Income,
    /// Money spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The lowercase name used in JSON and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Parse an optional type supplied by a client.
///
/// Returns [Error::MissingFields] when absent or empty.
pub(crate) fn parse_required_type(value: Option<&str>) -> Result<TransactionType, Error> {
    match value.map(str::trim) {
        None | Some("") => Err(Error::MissingFields),
        Some(text) => text.parse(),
    }
}

#[cfg(test)]
mod transaction_type_tests {
    use crate::Error;

    use super::{TransactionType, parse_required_type};

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("income".parse(), Ok(TransactionType::Income));
        assert_eq!("expense".parse(), Ok(TransactionType::Expense));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "refund".parse::<TransactionType>(),
            Err(Error::InvalidTransactionType("refund".to_owned()))
        );
    }

    #[test]
    fn missing_type_is_a_missing_field() {
        assert_eq!(parse_required_type(None), Err(Error::MissingFields));
        assert_eq!(parse_required_type(Some(" ")), Err(Error::MissingFields));
    }
}
