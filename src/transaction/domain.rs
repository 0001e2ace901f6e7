//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::{
    Error, ObjectId, category::Category, currency::Currency, transaction_type::TransactionType,
    user::parse_user_id,
};

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Always greater than zero, [Transaction::transaction_type] gives the direction.
    pub amount: f64,
    pub description: String,
    pub category_id: ObjectId,
    pub user_id: ObjectId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the money moved, as opposed to when the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub currency: Currency,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A transaction together with the category it refers to.
///
/// `category` is `None` when the category has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithCategory {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category: Option<Category>,
}

impl TransactionWithCategory {
    /// The category name, or `default` if the category no longer exists.
    pub fn category_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.category
            .as_ref()
            .map_or(default, |category| category.name.as_ref())
    }
}

/// The validated fields needed to create a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category_id: ObjectId,
    pub user_id: ObjectId,
    pub transaction_type: TransactionType,
    pub date: OffsetDateTime,
    pub currency: Currency,
}

/// The validated fields for updating a transaction.
///
/// `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    pub amount: f64,
    pub description: String,
    pub category_id: ObjectId,
    pub user_id: ObjectId,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<OffsetDateTime>,
    pub currency: Option<Currency>,
}

/// The JSON body for creating and updating transactions.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// An RFC 3339 date-time or a plain `YYYY-MM-DD` date.
    pub date: Option<String>,
    pub currency: Option<String>,
}

impl TransactionForm {
    /// Validate the form for creating a transaction.
    ///
    /// The type defaults to expense, the date to now and the currency to INR.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingFields] if the amount, description, category or user is
    /// missing, or a more specific error if one of the fields is malformed.
    pub fn validate_new(self) -> Result<NewTransaction, Error> {
        let update = self.validate_update()?;

        Ok(NewTransaction {
            amount: update.amount,
            description: update.description,
            category_id: update.category_id,
            user_id: update.user_id,
            transaction_type: update.transaction_type.unwrap_or_default(),
            date: update.date.unwrap_or_else(OffsetDateTime::now_utc),
            currency: update.currency.unwrap_or_default(),
        })
    }

    /// Validate the form for updating a transaction.
    ///
    /// # Errors
    ///
    /// Same as [TransactionForm::validate_new].
    pub fn validate_update(self) -> Result<TransactionUpdate, Error> {
        let (Some(amount), Some(description), Some(category_id), Some(user_id)) = (
            self.amount,
            non_blank(self.description.as_deref()),
            non_blank(self.category_id.as_deref()),
            non_blank(self.user_id.as_deref()),
        ) else {
            return Err(Error::MissingFields);
        };

        let amount = validate_amount(amount)?;
        let category_id = ObjectId::parse(category_id)?;
        let user_id = parse_user_id(Some(user_id))?;

        let transaction_type = non_blank(self.transaction_type.as_deref())
            .map(str::parse::<TransactionType>)
            .transpose()?;
        let date = non_blank(self.date.as_deref())
            .map(parse_date_time)
            .transpose()?;
        let currency = non_blank(self.currency.as_deref())
            .map(str::parse::<Currency>)
            .transpose()?;

        Ok(TransactionUpdate {
            amount,
            description: description.to_owned(),
            category_id,
            user_id,
            transaction_type,
            date,
            currency,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Check that `amount` is a finite number greater than zero.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] otherwise.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}

/// Parse an RFC 3339 date-time, e.g. "2024-12-01T09:30:00Z", or a plain date,
/// e.g. "2024-12-01", which is taken to be midnight UTC.
///
/// The result is always in UTC.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is in neither format.
pub fn parse_date_time(text: &str) -> Result<OffsetDateTime, Error> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(date_time.to_offset(UtcOffset::UTC));
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod transaction_form_tests {
    use time::macros::datetime;

    use crate::{
        Error, ObjectId, currency::Currency, transaction_type::TransactionType,
    };

    use super::{TransactionForm, parse_date_time};

    fn valid_form() -> TransactionForm {
        TransactionForm {
            amount: Some(25.5),
            description: Some("Lunch".to_owned()),
            category_id: Some(ObjectId::generate().to_string()),
            user_id: Some(ObjectId::generate().to_string()),
            transaction_type: None,
            date: None,
            currency: None,
        }
    }

    #[test]
    fn new_transaction_gets_defaults() {
        let transaction = valid_form().validate_new().unwrap();

        assert_eq!(transaction.amount, 25.5);
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.currency, Currency::Inr);
    }

    #[test]
    fn update_leaves_optional_fields_empty() {
        let update = valid_form().validate_update().unwrap();

        assert_eq!(update.transaction_type, None);
        assert_eq!(update.date, None);
        assert_eq!(update.currency, None);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let forms = [
            TransactionForm {
                amount: None,
                ..valid_form()
            },
            TransactionForm {
                description: Some("  ".to_owned()),
                ..valid_form()
            },
            TransactionForm {
                category_id: None,
                ..valid_form()
            },
            TransactionForm {
                user_id: None,
                ..valid_form()
            },
        ];

        for form in forms {
            assert_eq!(form.validate_new(), Err(Error::MissingFields));
        }
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amount in [0.0, -10.0] {
            let form = TransactionForm {
                amount: Some(amount),
                ..valid_form()
            };

            assert_eq!(form.validate_new(), Err(Error::InvalidAmount(amount)));
        }
    }

    #[test]
    fn malformed_category_id_is_rejected() {
        let form = TransactionForm {
            category_id: Some("abc".to_owned()),
            ..valid_form()
        };

        assert_eq!(
            form.validate_new(),
            Err(Error::InvalidObjectId("abc".to_owned()))
        );
    }

    #[test]
    fn parses_both_date_formats() {
        assert_eq!(
            parse_date_time("2024-12-01"),
            Ok(datetime!(2024-12-01 00:00 UTC))
        );
        assert_eq!(
            parse_date_time("2024-12-01T10:30:00+05:30"),
            Ok(datetime!(2024-12-01 05:00 UTC))
        );
        assert_eq!(
            parse_date_time("2024-12-01T00:00:00.000Z"),
            Ok(datetime!(2024-12-01 00:00 UTC))
        );
    }

    #[test]
    fn rejects_other_dates() {
        assert_eq!(
            parse_date_time("01/12/2024"),
            Err(Error::InvalidDate("01/12/2024".to_owned()))
        );
    }
}
