//! The categories every user starts with.

use rusqlite::Connection;

use crate::{
    Error, ObjectId,
    category::{Category, CategoryName, NewCategory, create_category, get_categories_by_user},
    transaction_type::TransactionType,
};

/// A built-in category as `(name, icon, color, type)`.
pub type DefaultCategory = (&'static str, &'static str, &'static str, TransactionType);

/// The expense categories followed by the income categories given to new users.
pub const DEFAULT_CATEGORIES: [DefaultCategory; 16] = [
    ("Food & Dining", "🍽️", "#FF6B6B", TransactionType::Expense),
    ("Transportation", "🚗", "#4ECDC4", TransactionType::Expense),
    ("Shopping", "🛍️", "#45B7D1", TransactionType::Expense),
    ("Entertainment", "🎬", "#96CEB4", TransactionType::Expense),
    ("Bills & Utilities", "💡", "#FFEAA7", TransactionType::Expense),
    ("Healthcare", "🏥", "#DDA0DD", TransactionType::Expense),
    ("Education", "📚", "#98D8C8", TransactionType::Expense),
    ("Travel", "✈️", "#F7DC6F", TransactionType::Expense),
    ("Personal Care", "💄", "#BB8FCE", TransactionType::Expense),
    ("Other", "📦", "#BDC3C7", TransactionType::Expense),
    ("Salary", "💰", "#2ECC71", TransactionType::Income),
    ("Freelance", "💻", "#3498DB", TransactionType::Income),
    ("Investment", "📈", "#9B59B6", TransactionType::Income),
    ("Business", "🏢", "#E67E22", TransactionType::Income),
    ("Gift", "🎁", "#E74C3C", TransactionType::Income),
    ("Other Income", "💵", "#1ABC9C", TransactionType::Income),
];

/// A user with at least this many categories of both types is considered seeded.
const SEEDED_CATEGORY_COUNT: usize = 10;

/// The result of [seed_default_categories].
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOutcome {
    /// The user's existing categories followed by the newly created ones.
    pub categories: Vec<Category>,
    /// How many categories were created.
    pub created_count: usize,
    /// Whether the user already had a full set of categories, in which case nothing was
    /// checked or created.
    pub already_seeded: bool,
}

impl SeedOutcome {
    /// A short description of what happened, suitable for an API response.
    pub fn message(&self) -> String {
        if self.already_seeded {
            "Categories already exist for this user".to_owned()
        } else if self.created_count > 0 {
            format!("Created {} new categories", self.created_count)
        } else {
            "All categories already exist".to_owned()
        }
    }
}

/// Give `user_id` any of the [DEFAULT_CATEGORIES] they are missing.
///
/// A category is only created if the user has no category with the same name and type.
/// Users that already have income and expense categories and at least ten categories in
/// total are left alone.
///
/// # Errors
///
/// Returns an error if a database query fails, in which case no categories are created.
pub fn seed_default_categories(
    user_id: ObjectId,
    connection: &Connection,
) -> Result<SeedOutcome, Error> {
    let existing = get_categories_by_user(user_id, connection)?;

    let has_income = existing
        .iter()
        .any(|category| category.category_type == TransactionType::Income);
    let has_expense = existing
        .iter()
        .any(|category| category.category_type == TransactionType::Expense);

    if has_income && has_expense && existing.len() >= SEEDED_CATEGORY_COUNT {
        return Ok(SeedOutcome {
            categories: existing,
            created_count: 0,
            already_seeded: true,
        });
    }

    let transaction = connection.unchecked_transaction()?;
    let mut categories = existing;
    let mut created_count = 0;

    for (name, icon, color, category_type) in DEFAULT_CATEGORIES {
        let exists = categories.iter().any(|category| {
            category.name.as_ref() == name && category.category_type == category_type
        });

        if exists {
            continue;
        }

        let category = create_category(
            NewCategory {
                name: CategoryName::new_unchecked(name),
                icon: icon.to_owned(),
                color: color.to_owned(),
                category_type,
                user_id,
            },
            &transaction,
        )?;
        categories.push(category);
        created_count += 1;
    }

    transaction.commit()?;

    if created_count > 0 {
        tracing::info!("Created {created_count} default categories for user {user_id}");
    }

    Ok(SeedOutcome {
        categories,
        created_count,
        already_seeded: false,
    })
}
