use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, UserID};

/// The database ID of a savings goal.
pub type SavingsGoalId = i64;

/// An amount of money a user is saving towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// The ID of the savings goal.
    pub id: SavingsGoalId,
    /// What the money is being saved for.
    pub name: String,
    /// The amount of money the user wants to save.
    pub target_amount: f64,
    /// The amount of money saved so far.
    pub current_amount: f64,
}

impl SavingsGoal {
    /// How far along the goal is, where 1.0 means the target has been reached.
    pub fn progress(&self) -> f64 {
        self.current_amount / self.target_amount
    }
}

/// The validated data for creating or replacing a savings goal.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoalData {
    /// What the money is being saved for.
    pub name: String,
    /// The amount to save, always positive.
    pub target_amount: f64,
    /// The amount saved so far, never negative.
    pub current_amount: f64,
}

pub fn create_savings_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS savings_goal (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            target_amount REAL NOT NULL CHECK (target_amount > 0),
            current_amount REAL NOT NULL DEFAULT 0 CHECK (current_amount >= 0),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_savings_goal(row: &Row) -> Result<SavingsGoal, rusqlite::Error> {
    Ok(SavingsGoal {
        id: row.get(0)?,
        name: row.get(1)?,
        target_amount: row.get(2)?,
        current_amount: row.get(3)?,
    })
}

/// Store a savings goal for `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the goal could not be inserted.
pub fn create_savings_goal(
    goal: SavingsGoalData,
    user_id: UserID,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    connection.execute(
        "INSERT INTO savings_goal (user_id, name, target_amount, current_amount) VALUES (?1, ?2, ?3, ?4)",
        (user_id.as_i64(), &goal.name, goal.target_amount, goal.current_amount),
    )?;

    Ok(SavingsGoal {
        id: connection.last_insert_rowid(),
        name: goal.name,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
    })
}

/// Get the savings goals of `user_id`, most recently added first.
pub fn get_savings_goals(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<SavingsGoal>, Error> {
    connection
        .prepare(
            "SELECT id, name, target_amount, current_amount FROM savings_goal
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC",
        )?
        .query_map([user_id.as_i64()], map_row_to_savings_goal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

type RowsAffected = usize;

/// Replace the name and amounts of the goal `id` owned by `user_id`.
pub fn update_savings_goal(
    id: SavingsGoalId,
    goal: &SavingsGoalData,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE savings_goal SET name = ?1, target_amount = ?2, current_amount = ?3
            WHERE id = ?4 AND user_id = ?5",
            (
                &goal.name,
                goal.target_amount,
                goal.current_amount,
                id,
                user_id.as_i64(),
            ),
        )
        .map_err(Error::from)
}

pub fn delete_savings_goal(
    id: SavingsGoalId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM savings_goal WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )
        .map_err(Error::from)
}
