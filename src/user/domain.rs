//! Core user domain types.

use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{ObjectId, currency::Currency};

/// The colour scheme the UI should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl Theme {
    fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("unknown theme \"{other}\"")),
        }
    }
}

impl ToSql for Theme {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Theme {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|error: String| {
            FromSqlError::Other(Box::new(std::io::Error::other(error)))
        })
    }
}

/// Display settings chosen by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// The currency amounts are shown in.
    pub currency: Currency,
    /// The UI colour scheme.
    pub theme: Theme,
    /// A language tag, e.g. "en".
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: Currency::Inr,
            theme: Theme::System,
            language: "en".to_owned(),
        }
    }
}

/// A user of the application.
///
/// Users are never registered explicitly, they are created the first time
/// someone logs in with an email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Derived from the user's email, see [ObjectId::from_email].
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// The normalised email address.
    pub email: String,
    /// The display name.
    pub name: String,
    /// When the user first logged in.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the user was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Display settings.
    pub preferences: Preferences,
}
