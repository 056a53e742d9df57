use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, UserID};

/// The database ID of a card.
pub type CardId = i64;

/// A payment card saved by a user.
///
/// Only the last four digits of the card number are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// The ID of the card.
    pub id: CardId,
    /// The name printed on the card.
    pub card_holder: String,
    /// The last four digits of the card number.
    pub last4: String,
    /// The expiry date as entered, e.g. "12/27".
    pub expiry_date: String,
    /// The card network or kind, e.g. "visa".
    #[serde(rename = "type")]
    pub card_type: String,
}

/// The validated data for a card that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    /// The name printed on the card.
    pub card_holder: String,
    /// The last four digits of the card number.
    pub last4: String,
    /// The expiry date as entered, e.g. "12/27".
    pub expiry_date: String,
    /// The card network or kind, e.g. "visa".
    pub card_type: String,
}

pub fn create_card_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS card (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            card_holder TEXT NOT NULL,
            last4 TEXT NOT NULL,
            expiry_date TEXT NOT NULL,
            type TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

/// Get the last four digits of `card_number`.
///
/// Spaces and dashes are ignored.
///
/// # Errors
/// Returns [Error::Validation] if the number contains anything other than
/// digits, spaces and dashes, or has fewer than four digits.
pub fn last_four_digits(card_number: &str) -> Result<String, Error> {
    let digits: String = card_number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if digits.len() < 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation(
            "Card number must contain at least 4 digits.".to_owned(),
        ));
    }

    Ok(digits[digits.len() - 4..].to_owned())
}

fn map_row_to_card(row: &Row) -> Result<Card, rusqlite::Error> {
    Ok(Card {
        id: row.get(0)?,
        card_holder: row.get(1)?,
        last4: row.get(2)?,
        expiry_date: row.get(3)?,
        card_type: row.get(4)?,
    })
}

/// Store a card for `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the card could not be inserted.
pub fn create_card(new_card: NewCard, user_id: UserID, connection: &Connection) -> Result<Card, Error> {
    connection.execute(
        "INSERT INTO card (user_id, card_holder, last4, expiry_date, type) VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            user_id.as_i64(),
            &new_card.card_holder,
            &new_card.last4,
            &new_card.expiry_date,
            &new_card.card_type,
        ),
    )?;

    Ok(Card {
        id: connection.last_insert_rowid(),
        card_holder: new_card.card_holder,
        last4: new_card.last4,
        expiry_date: new_card.expiry_date,
        card_type: new_card.card_type,
    })
}

/// Get the cards of `user_id`, most recently added first.
pub fn get_cards(user_id: UserID, connection: &Connection) -> Result<Vec<Card>, Error> {
    connection
        .prepare(
            "SELECT id, card_holder, last4, expiry_date, type FROM card
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC",
        )?
        .query_map([user_id.as_i64()], map_row_to_card)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

type RowsAffected = usize;

pub fn delete_card(id: CardId, user_id: UserID, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM card WHERE id = ?1 AND user_id = ?2",
            (id, user_id.as_i64()),
        )
        .map_err(Error::from)
}

#[cfg(test)]
mod last_four_digits_tests {
    use crate::Error;

    use super::last_four_digits;

    #[test]
    fn keeps_last_four_digits() {
        assert_eq!(last_four_digits("4111111111111234"), Ok("1234".to_owned()));
    }

    #[test]
    fn ignores_spaces_and_dashes() {
        assert_eq!(last_four_digits("4111 1111-1111 9876"), Ok("9876".to_owned()));
    }

    #[test]
    fn rejects_short_or_non_numeric_numbers() {
        for card_number in ["123", "", "4111abcd11111234", "12 3"] {
            assert!(matches!(
                last_four_digits(card_number),
                Err(Error::Validation(_))
            ));
        }
    }
}
