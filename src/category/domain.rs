//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, ObjectId,
    transaction_type::{TransactionType, parse_required_type},
    user::parse_user_id,
};

/// The icon given to categories created without one.
pub const DEFAULT_CATEGORY_ICON: &str = "📦";

/// The colour given to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#BDC3C7";

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::MissingFields] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::MissingFields)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-defined label for income or expenses, e.g. 'Food & Dining' or 'Salary'.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: CategoryName,
    pub icon: String,
    pub color: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    pub user_id: ObjectId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The validated fields needed to create or update a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub icon: String,
    pub color: String,
    pub category_type: TransactionType,
    pub user_id: ObjectId,
}

/// The JSON body for creating and updating categories.
///
/// Every field is optional so that missing fields can be reported with the
/// same error message as empty ones.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    pub user_id: Option<String>,
}

impl CategoryForm {
    /// Check the required fields and fill in the defaults for the optional ones.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingFields] if the name, type or user ID is missing,
    /// and a more specific error if the type or user ID is malformed.
    pub fn validate(self) -> Result<NewCategory, Error> {
        if self.user_id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            return Err(Error::MissingFields);
        }

        let name = CategoryName::new(self.name.as_deref().unwrap_or_default())?;
        let category_type = parse_required_type(self.category_type.as_deref())?;
        let user_id = parse_user_id(self.user_id.as_deref())?;

        Ok(NewCategory {
            name,
            icon: non_empty_or(self.icon, DEFAULT_CATEGORY_ICON),
            color: non_empty_or(self.color, DEFAULT_CATEGORY_COLOR),
            category_type,
            user_id,
        })
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => default.to_owned(),
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(CategoryName::new(""), Err(Error::MissingFields));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(CategoryName::new("\n\t \r"), Err(Error::MissingFields));
    }

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(CategoryName::new(" Food ").unwrap().as_ref(), "Food");
    }
}
