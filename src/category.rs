//! Transaction categories.
//!
//! Categories are shared by all users and seeded when the database is initialised.

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, db::DbPool};

/// The database ID of a category.
pub type CategoryId = i64;

/// The categories created with the database, as (name, icon) pairs.
pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("Food & Dining", "utensils"),
    ("Shopping", "shopping-bag"),
    ("Transport", "car"),
    ("Bills & Utilities", "receipt"),
    ("Entertainment", "film"),
    ("Health", "heart-pulse"),
    ("Salary", "briefcase"),
    ("Other", "circle-ellipsis"),
];

/// A label for grouping transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name, e.g. "Food & Dining".
    pub name: String,
    /// The name of the icon shown next to the category.
    pub icon: Option<String>,
}

/// Create the category table and insert any missing default categories.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            icon TEXT
        )",
        (),
    )?;

    let mut statement =
        connection.prepare("INSERT OR IGNORE INTO category (name, icon) VALUES (?1, ?2)")?;

    for (name, icon) in DEFAULT_CATEGORIES {
        statement.execute((name, icon))?;
    }

    Ok(())
}

fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        icon: row.get(2)?,
    })
}

/// Get all categories ordered by name.
pub fn get_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, icon FROM category ORDER BY name ASC")?
        .query_map([], map_row_to_category)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// The state needed to list categories.
#[derive(Clone)]
pub struct CategoryState {
    pub db_pool: DbPool,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_pool: state.db_pool.clone(),
        }
    }
}

/// A route handler that responds with every category.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state.db_pool.get()?;

    get_categories(&connection).map(Json)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::test_utils::{get_test_server, sign_up_and_log_in};

    use super::{Category, DEFAULT_CATEGORIES, create_category_table, get_categories};

    #[test]
    fn seeds_default_categories_once() {
        let connection = Connection::open_in_memory().unwrap();

        create_category_table(&connection).unwrap();
        create_category_table(&connection).unwrap();

        let categories = get_categories(&connection).unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert!(
            categories
                .iter()
                .any(|category| category.name == "Salary"
                    && category.icon.as_deref() == Some("briefcase"))
        );
    }

    #[test]
    fn categories_are_sorted_by_name() {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).unwrap();

        let names: Vec<String> = get_categories(&connection)
            .unwrap()
            .into_iter()
            .map(|category| category.name)
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn endpoint_lists_categories() {
        let server = get_test_server();
        let user = sign_up_and_log_in(&server, "Alice", "alice@example.com").await;

        let response = server
            .get("/api/categories")
            .authorization_bearer(&user.token)
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Vec<Category>>().len(),
            DEFAULT_CATEGORIES.len()
        );
    }
}
