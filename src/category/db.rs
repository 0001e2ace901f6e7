//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, ObjectId,
    category::{Category, CategoryName, NewCategory},
};

pub(crate) const CATEGORY_COLUMNS: &str =
    "id, name, icon, color, type, user_id, created_at, updated_at";

/// Create a category and return it with its generated ID and timestamps.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    let id = ObjectId::generate();
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(&format!(
            "INSERT INTO categories ({CATEGORY_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             RETURNING {CATEGORY_COLUMNS}"
        ))?
        .query_row(
            (
                id,
                category.name.as_ref(),
                &category.icon,
                &category.color,
                category.category_type,
                category.user_id,
                now,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single category by ID.
#[cfg(test)]
pub fn get_category(category_id: ObjectId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = :id"
        ))?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all of a user's categories ordered alphabetically by name.
pub fn get_categories_by_user(
    user_id: ObjectId,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE user_id = :user_id ORDER BY name ASC"
        ))?
        .query_map(&[(":user_id", &user_id)], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Overwrite a category's fields. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: ObjectId,
    category: NewCategory,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE categories
         SET name = ?1, icon = ?2, color = ?3, type = ?4, user_id = ?5, updated_at = ?6
         WHERE id = ?7",
        (
            category.name.as_ref(),
            &category.icon,
            &category.color,
            category.category_type,
            category.user_id,
            OffsetDateTime::now_utc(),
            category_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Transactions that refer to the category are left untouched.
pub fn delete_category(category_id: ObjectId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM categories WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT NOT NULL,
            color TEXT NOT NULL,
            type TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_categories_user_id ON categories(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    map_row_with_offset(row, 0)
}

/// Map the category columns starting at `offset`, e.g. when the category is
/// joined onto another table.
pub(crate) fn map_row_with_offset(row: &Row, offset: usize) -> Result<Category, rusqlite::Error> {
    let raw_name: String = row.get(offset + 1)?;

    Ok(Category {
        id: row.get(offset)?,
        name: CategoryName::new_unchecked(&raw_name),
        icon: row.get(offset + 2)?,
        color: row.get(offset + 3)?,
        category_type: row.get(offset + 4)?,
        user_id: row.get(offset + 5)?,
        created_at: row.get(offset + 6)?,
        updated_at: row.get(offset + 7)?,
    })
}
