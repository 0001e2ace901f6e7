//! Database operations for transactions.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, ObjectId,
    category::{CATEGORY_COLUMNS, map_category_row_with_offset},
    pagination::Page,
    transaction::{NewTransaction, Transaction, TransactionUpdate, TransactionWithCategory},
};

const TRANSACTION_COLUMNS: &str = "id, amount, description, category_id, user_id, type, date, \
    currency, created_at, updated_at";
const TRANSACTION_COLUMN_COUNT: usize = 10;

/// Create a transaction and return it with its generated ID and timestamps.
///
/// The category ID is stored as given, it is not checked against the category table.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(&format!(
            "INSERT INTO transactions ({TRANSACTION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                ObjectId::generate(),
                transaction.amount,
                &transaction.description,
                transaction.category_id,
                transaction.user_id,
                transaction.transaction_type,
                transaction.date.to_offset(time::UtcOffset::UTC),
                transaction.currency,
                now,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single transaction by ID.
#[cfg(test)]
pub fn get_transaction(id: ObjectId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a page of a user's transactions, newest first, with their categories.
pub fn get_transactions_by_user(
    user_id: ObjectId,
    page: Page,
    connection: &Connection,
) -> Result<Vec<TransactionWithCategory>, Error> {
    let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.skip).unwrap_or(i64::MAX);

    query_with_category(
        &format!("{} LIMIT :limit OFFSET :offset", joined_query()),
        &[
            (":user_id", &user_id as &dyn rusqlite::ToSql),
            (":limit", &limit),
            (":offset", &offset),
        ],
        connection,
    )
}

/// Retrieve every one of a user's transactions, newest first, with their categories.
pub fn get_all_transactions_for_user(
    user_id: ObjectId,
    connection: &Connection,
) -> Result<Vec<TransactionWithCategory>, Error> {
    query_with_category(
        &joined_query(),
        &[(":user_id", &user_id as &dyn rusqlite::ToSql)],
        connection,
    )
}

/// Count a user's transactions.
pub fn count_transactions_for_user(
    user_id: ObjectId,
    connection: &Connection,
) -> Result<usize, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM transactions WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}

fn joined_query() -> String {
    let transaction_columns = TRANSACTION_COLUMNS
        .split(", ")
        .map(|column| format!("t.{column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let category_columns = CATEGORY_COLUMNS
        .split(", ")
        .map(|column| format!("c.{column}"))
        .collect::<Vec<_>>()
        .join(", ");

    // Order by creation time as well to keep transactions on the same date in a stable order.
    format!(
        "SELECT {transaction_columns}, {category_columns} FROM transactions t
         LEFT JOIN categories c ON c.id = t.category_id
         WHERE t.user_id = :user_id
         ORDER BY t.date DESC, t.created_at DESC"
    )
}

fn query_with_category(
    query: &str,
    params: &[(&str, &dyn rusqlite::ToSql)],
    connection: &Connection,
) -> Result<Vec<TransactionWithCategory>, Error> {
    connection
        .prepare(query)?
        .query_map(params, |row| {
            let transaction = map_row(row)?;
            let category_id: Option<ObjectId> = row.get(TRANSACTION_COLUMN_COUNT)?;
            let category = category_id
                .map(|_| map_category_row_with_offset(row, TRANSACTION_COLUMN_COUNT))
                .transpose()?;

            Ok(TransactionWithCategory {
                transaction,
                category,
            })
        })?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Update a transaction. Optional fields in `update` that are `None` keep their stored value.
///
/// # Errors
///
/// Returns [Error::UpdateMissingTransaction] if there is no transaction with `id`.
pub fn update_transaction(
    id: ObjectId,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE transactions SET
            amount = ?1,
            description = ?2,
            category_id = ?3,
            user_id = ?4,
            type = COALESCE(?5, type),
            date = COALESCE(?6, date),
            currency = COALESCE(?7, currency),
            updated_at = ?8
         WHERE id = ?9",
        (
            update.amount,
            &update.description,
            update.category_id,
            update.user_id,
            update.transaction_type,
            update.date,
            update.currency,
            OffsetDateTime::now_utc(),
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete a transaction by ID.
///
/// # Errors
///
/// Returns [Error::DeleteMissingTransaction] if there is no transaction with `id`.
pub fn delete_transaction(id: ObjectId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM transactions WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Initialize the transaction table and indexes.
///
/// `category_id` is deliberately not a foreign key so that deleting a
/// category leaves its transactions alone.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id TEXT PRIMARY KEY,
            amount REAL NOT NULL,
            description TEXT NOT NULL,
            category_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            type TEXT NOT NULL,
            date TEXT NOT NULL,
            currency TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
        user_id: row.get(4)?,
        transaction_type: row.get(5)?,
        date: row.get(6)?,
        currency: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod transaction_query_tests {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        Error, ObjectId,
        category::{CategoryName, NewCategory, create_category, delete_category},
        currency::Currency,
        pagination::Page,
        test_utils::get_test_connection,
        transaction::{NewTransaction, TransactionUpdate},
        transaction_type::TransactionType,
    };

    use super::{
        count_transactions_for_user, create_transaction, delete_transaction,
        get_all_transactions_for_user, get_transaction, get_transactions_by_user,
        update_transaction,
    };

    fn new_transaction(
        amount: f64,
        date: OffsetDateTime,
        category_id: ObjectId,
        user_id: ObjectId,
    ) -> NewTransaction {
        NewTransaction {
            amount,
            description: format!("transaction for {amount}"),
            category_id,
            user_id,
            transaction_type: TransactionType::Expense,
            date,
            currency: Currency::Inr,
        }
    }

    fn food_category(user_id: ObjectId) -> NewCategory {
        NewCategory {
            name: CategoryName::new_unchecked("Food"),
            icon: "🍽️".to_owned(),
            color: "#FF6B6B".to_owned(),
            category_type: TransactionType::Expense,
            user_id,
        }
    }

    #[test]
    fn create_transaction_succeeds() {
        let connection = get_test_connection();
        let user_id = ObjectId::generate();
        let date = datetime!(2024-12-02 00:00 UTC);

        let transaction = create_transaction(
            new_transaction(350.0, date, ObjectId::generate(), user_id),
            &connection,
        )
        .expect("Could not create transaction");

        assert_eq!(transaction.amount, 350.0);
        assert_eq!(transaction.date, date);
        assert_eq!(transaction.user_id, user_id);
        assert_eq!(get_transaction(transaction.id, &connection), Ok(transaction));
    }

    #[test]
    fn get_missing_transaction_fails() {
        let connection = get_test_connection();

        assert_eq!(
            get_transaction(ObjectId::generate(), &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn transactions_are_newest_first_with_category() {
        let connection = get_test_connection();
        let user_id = ObjectId::generate();
        let category = create_category(food_category(user_id), &connection).unwrap();
        let start = datetime!(2024-12-01 00:00 UTC);
        for day in 0..5 {
            create_transaction(
                new_transaction(
                    (day + 1) as f64,
                    start + Duration::days(day),
                    category.id,
                    user_id,
                ),
                &connection,
            )
            .unwrap();
        }

        let got = get_transactions_by_user(user_id, Page { limit: 2, skip: 1 }, &connection)
            .expect("Could not get transactions");

        let amounts: Vec<f64> = got.iter().map(|t| t.transaction.amount).collect();
        assert_eq!(amounts, vec![4.0, 3.0]);
        assert_eq!(got[0].category.as_ref(), Some(&category));
    }

    #[test]
    fn transactions_are_scoped_to_user() {
        let connection = get_test_connection();
        let user_id = ObjectId::generate();
        let other_user_id = ObjectId::generate();
        let now = OffsetDateTime::now_utc();
        create_transaction(
            new_transaction(1.0, now, ObjectId::generate(), user_id),
            &connection,
        )
        .unwrap();
        create_transaction(
            new_transaction(2.0, now, ObjectId::generate(), other_user_id),
            &connection,
        )
        .unwrap();

        let got = get_all_transactions_for_user(user_id, &connection).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].transaction.amount, 1.0);
        assert_eq!(count_transactions_for_user(user_id, &connection), Ok(1));
    }

    #[test]
    fn deleting_category_keeps_category_id() {
        let connection = get_test_connection();
        let user_id = ObjectId::generate();
        let category = create_category(food_category(user_id), &connection).unwrap();
        let transaction = create_transaction(
            new_transaction(25.5, OffsetDateTime::now_utc(), category.id, user_id),
            &connection,
        )
        .unwrap();

        delete_category(category.id, &connection).unwrap();

        let got = get_all_transactions_for_user(user_id, &connection).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].transaction.category_id, category.id);
        assert_eq!(got[0].category, None);
        assert_eq!(
            get_transaction(transaction.id, &connection).unwrap().category_id,
            category.id
        );
    }

    #[test]
    fn update_keeps_omitted_fields() {
        let connection = get_test_connection();
        let user_id = ObjectId::generate();
        let date = datetime!(2024-12-03 00:00 UTC);
        let transaction = create_transaction(
            NewTransaction {
                transaction_type: TransactionType::Income,
                currency: Currency::Usd,
                ..new_transaction(150.0, date, ObjectId::generate(), user_id)
            },
            &connection,
        )
        .unwrap();
        let new_category_id = ObjectId::generate();

        update_transaction(
            transaction.id,
            TransactionUpdate {
                amount: 175.0,
                description: "Fuel".to_owned(),
                category_id: new_category_id,
                user_id,
                transaction_type: None,
                date: None,
                currency: None,
            },
            &connection,
        )
        .expect("Could not update transaction");

        let updated = get_transaction(transaction.id, &connection).unwrap();
        assert_eq!(updated.amount, 175.0);
        assert_eq!(updated.description, "Fuel");
        assert_eq!(updated.category_id, new_category_id);
        assert_eq!(updated.transaction_type, TransactionType::Income);
        assert_eq!(updated.currency, Currency::Usd);
        assert_eq!(updated.date, date);
    }

    #[test]
    fn update_missing_transaction_fails() {
        let connection = get_test_connection();

        let result = update_transaction(
            ObjectId::generate(),
            TransactionUpdate {
                amount: 1.0,
                description: "x".to_owned(),
                category_id: ObjectId::generate(),
                user_id: ObjectId::generate(),
                transaction_type: None,
                date: None,
                currency: None,
            },
            &connection,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn delete_transaction_succeeds() {
        let connection = get_test_connection();
        let transaction = create_transaction(
            new_transaction(
                1.0,
                OffsetDateTime::now_utc(),
                ObjectId::generate(),
                ObjectId::generate(),
            ),
            &connection,
        )
        .unwrap();

        delete_transaction(transaction.id, &connection).expect("Could not delete transaction");

        assert_eq!(get_transaction(transaction.id, &connection), Err(Error::NotFound));
        assert_eq!(
            delete_transaction(transaction.id, &connection),
            Err(Error::DeleteMissingTransaction)
        );
    }
}
