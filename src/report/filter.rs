//! Narrowing a user's transactions down to the ones in a report.

use serde::Deserialize;
use time::Date;

use crate::{
    Error, ObjectId,
    transaction::{TransactionWithCategory, parse_date_time},
    transaction_type::TransactionType,
    user::parse_user_id,
};

/// The filter value that disables the type or category filter.
const ALL: &str = "all";

/// The query parameters shared by the report and export endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub user_id: Option<String>,
    /// The first day to include, e.g. "2024-12-01".
    pub start_date: Option<String>,
    /// The last day to include.
    pub end_date: Option<String>,
    /// "income", "expense" or "all".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// A category name or "all".
    pub category: Option<String>,
}

/// The validated report filters. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

impl ReportQuery {
    /// Validate the query into the user ID and the filters to apply.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingUserId] or [Error::InvalidObjectId] for a bad
    /// user ID, [Error::InvalidDate] for a bad date and
    /// [Error::InvalidTransactionType] for a type other than income, expense or all.
    pub fn validate(&self) -> Result<(ObjectId, ReportFilter), Error> {
        let user_id = parse_user_id(self.user_id.as_deref())?;

        let start_date = non_blank(self.start_date.as_deref())
            .map(parse_date)
            .transpose()?;
        let end_date = non_blank(self.end_date.as_deref())
            .map(parse_date)
            .transpose()?;

        let transaction_type = match non_blank(self.transaction_type.as_deref()) {
            None | Some(ALL) => None,
            Some(text) => Some(text.parse()?),
        };

        let category = match non_blank(self.category.as_deref()) {
            None | Some(ALL) => None,
            Some(name) => Some(name.to_owned()),
        };

        Ok((
            user_id,
            ReportFilter {
                start_date,
                end_date,
                transaction_type,
                category,
            },
        ))
    }
}

impl ReportFilter {
    /// Whether `transaction` passes every filter.
    ///
    /// Dates are compared by calendar day in UTC, so both ends are inclusive.
    /// A transaction whose category was deleted never matches a category filter.
    pub fn matches(&self, transaction: &TransactionWithCategory) -> bool {
        let date = transaction.transaction.date.date();

        if self.start_date.is_some_and(|start| date < start) {
            return false;
        }

        if self.end_date.is_some_and(|end| date > end) {
            return false;
        }

        if self
            .transaction_type
            .is_some_and(|wanted| transaction.transaction.transaction_type != wanted)
        {
            return false;
        }

        match &self.category {
            None => true,
            Some(name) => transaction
                .category
                .as_ref()
                .is_some_and(|category| category.name.as_ref() == name),
        }
    }

    /// Keep the transactions that pass every filter, preserving their order.
    pub fn apply(
        &self,
        transactions: Vec<TransactionWithCategory>,
    ) -> Vec<TransactionWithCategory> {
        transactions
            .into_iter()
            .filter(|transaction| self.matches(transaction))
            .collect()
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    parse_date_time(text).map(|date_time| date_time.date())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod report_filter_tests {
    use time::{
        OffsetDateTime,
        macros::{date, datetime},
    };

    use crate::{
        Error, ObjectId,
        category::{Category, CategoryName},
        currency::Currency,
        transaction::{Transaction, TransactionWithCategory},
        transaction_type::TransactionType,
    };

    use super::{ReportFilter, ReportQuery};

    fn transaction(
        transaction_type: TransactionType,
        date: OffsetDateTime,
        category_name: Option<&str>,
    ) -> TransactionWithCategory {
        let user_id = ObjectId::generate();
        let category_id = ObjectId::generate();

        TransactionWithCategory {
            transaction: Transaction {
                id: ObjectId::generate(),
                amount: 10.0,
                description: "Test".to_owned(),
                category_id,
                user_id,
                transaction_type,
                date,
                currency: Currency::Inr,
                created_at: date,
                updated_at: date,
            },
            category: category_name.map(|name| Category {
                id: category_id,
                name: CategoryName::new_unchecked(name),
                icon: "📦".to_owned(),
                color: "#BDC3C7".to_owned(),
                category_type: transaction_type,
                user_id,
                created_at: date,
                updated_at: date,
            }),
        }
    }

    #[test]
    fn all_disables_type_and_category_filters() {
        let user_id = ObjectId::generate();
        let query = ReportQuery {
            user_id: Some(user_id.to_string()),
            transaction_type: Some("all".to_owned()),
            category: Some("all".to_owned()),
            ..Default::default()
        };

        assert_eq!(query.validate(), Ok((user_id, ReportFilter::default())));
    }

    #[test]
    fn invalid_type_is_rejected() {
        let query = ReportQuery {
            user_id: Some(ObjectId::generate().to_string()),
            transaction_type: Some("transfer".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            query.validate(),
            Err(Error::InvalidTransactionType("transfer".to_owned()))
        );
    }

    #[test]
    fn invalid_date_is_rejected() {
        let query = ReportQuery {
            user_id: Some(ObjectId::generate().to_string()),
            start_date: Some("yesterday".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            query.validate(),
            Err(Error::InvalidDate("yesterday".to_owned()))
        );
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = ReportFilter {
            start_date: Some(date!(2024 - 12 - 01)),
            end_date: Some(date!(2024 - 12 - 31)),
            ..Default::default()
        };

        assert!(filter.matches(&transaction(
            TransactionType::Expense,
            datetime!(2024-12-01 00:00 UTC),
            None
        )));
        assert!(filter.matches(&transaction(
            TransactionType::Expense,
            datetime!(2024-12-31 23:59 UTC),
            None
        )));
        assert!(!filter.matches(&transaction(
            TransactionType::Expense,
            datetime!(2024-11-30 23:59 UTC),
            None
        )));
        assert!(!filter.matches(&transaction(
            TransactionType::Expense,
            datetime!(2025-01-01 00:00 UTC),
            None
        )));
    }

    #[test]
    fn filters_by_type_and_category_name() {
        let date = datetime!(2024-12-05 12:00 UTC);
        let transactions = vec![
            transaction(TransactionType::Expense, date, Some("Food & Dining")),
            transaction(TransactionType::Expense, date, Some("Transportation")),
            transaction(TransactionType::Income, date, Some("Food & Dining")),
            transaction(TransactionType::Expense, date, None),
        ];
        let filter = ReportFilter {
            transaction_type: Some(TransactionType::Expense),
            category: Some("Food & Dining".to_owned()),
            ..Default::default()
        };

        let filtered = filter.apply(transactions.clone());

        assert_eq!(filtered, vec![transactions[0].clone()]);
    }
}
