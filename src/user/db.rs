//! Database operations for users.

use rusqlite::{Connection, OptionalExtension, Row};
use time::OffsetDateTime;

use crate::{
    Error, ObjectId,
    currency::Currency,
    object_id::normalize_email,
    user::{Preferences, Theme, User},
};

/// Changes to apply to a user's preferences. `None` keeps the stored value.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PreferencesUpdate {
    pub currency: Option<Currency>,
    pub theme: Option<Theme>,
    pub language: Option<String>,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            currency TEXT NOT NULL,
            theme TEXT NOT NULL,
            language TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get the user with the ID derived from `email`, creating it if this is the
/// first time the email has been seen.
///
/// `name` is only used when the user is created. When it is `None`, the part
/// of the email before the '@' is used.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_or_create_user(
    email: &str,
    name: Option<&str>,
    connection: &Connection,
) -> Result<User, Error> {
    let email = normalize_email(email);
    let id = ObjectId::from_email(&email);

    if let Some(user) = find_user(id, connection)? {
        return Ok(user);
    }

    let name = match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => email.split('@').next().unwrap_or_default().to_owned(),
    };
    let now = OffsetDateTime::now_utc();
    let preferences = Preferences::default();

    connection.execute(
        "INSERT INTO users (id, email, name, currency, theme, language, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        (
            id,
            &email,
            &name,
            preferences.currency,
            preferences.theme,
            &preferences.language,
            now,
        ),
    )?;

    tracing::info!("Created user {id} for {email}");

    get_user(id, connection)
}

/// Get the user with `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user.
pub fn get_user(id: ObjectId, connection: &Connection) -> Result<User, Error> {
    find_user(id, connection)?.ok_or(Error::NotFound)
}

fn find_user(id: ObjectId, connection: &Connection) -> Result<Option<User>, Error> {
    connection
        .prepare(
            "SELECT id, email, name, currency, theme, language, created_at, updated_at
             FROM users WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Apply `update` to the preferences of the user with `id` and return the updated user.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user.
pub fn update_preferences(
    id: ObjectId,
    update: PreferencesUpdate,
    connection: &Connection,
) -> Result<User, Error> {
    let rows_affected = connection.execute(
        "UPDATE users SET
            currency = COALESCE(?1, currency),
            theme = COALESCE(?2, theme),
            language = COALESCE(?3, language),
            updated_at = ?4
         WHERE id = ?5",
        (
            update.currency,
            update.theme,
            update.language,
            OffsetDateTime::now_utc(),
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    get_user(id, connection)
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        preferences: Preferences {
            currency: row.get(3)?,
            theme: row.get(4)?,
            language: row.get(5)?,
        },
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
