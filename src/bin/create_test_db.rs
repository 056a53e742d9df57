use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finance_dashboard::{
    NewCard, NewTransaction, PasswordHash, RawPassword, SavingsGoalData, TransactionType,
    create_card, create_savings_goal, create_transaction, get_accounts, initialize_db,
    register_user,
};

const DEMO_EMAIL: &str = "demo@example.com";
const DEMO_PASSWORD: &str = "demo";

// Category IDs in a freshly seeded database.
const FOOD: i64 = 1;
const SHOPPING: i64 = 2;
const TRANSPORT: i64 = 3;
const BILLS: i64 = 4;
const SALARY: i64 = 7;

/// A utility for creating a test database for the REST API server of the finance dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut connection = Connection::open(output_path)?;
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    initialize_db(&mut connection)?;

    println!("Creating demo user {DEMO_EMAIL}...");
    let password_hash = PasswordHash::new(
        &RawPassword::new(DEMO_PASSWORD)?,
        PasswordHash::DEFAULT_COST,
    )?;
    let user = register_user("Demo", DEMO_EMAIL, &password_hash, &mut connection)?;

    let Some(account) = get_accounts(user.id, &connection)?.into_iter().next() else {
        eprintln!("The demo user has no account!");
        exit(1);
    };

    println!("Adding transactions...");
    let today = OffsetDateTime::now_utc().date();

    for months_ago in (0..4).rev() {
        let month_start = today - Duration::days(30 * months_ago);

        let transactions = [
            ("Salary", 4200.0, TransactionType::Income, SALARY, 0),
            ("Rent", 1600.0, TransactionType::Expense, BILLS, 1),
            ("Groceries", 185.4, TransactionType::Expense, FOOD, 3),
            ("Bus pass", 60.0, TransactionType::Expense, TRANSPORT, 5),
            ("New shoes", 120.0, TransactionType::Expense, SHOPPING, 8),
            ("Dinner out", 74.5, TransactionType::Expense, FOOD, 12),
        ];

        for (description, amount, transaction_type, category_id, day_offset) in transactions {
            let date = month_start + Duration::days(day_offset);
            if date > today {
                continue;
            }

            create_transaction(
                NewTransaction {
                    account_id: account.id,
                    category_id,
                    description: description.to_owned(),
                    amount,
                    transaction_type,
                    date,
                },
                user.id,
                &mut connection,
            )?;
        }
    }

    println!("Adding a card and a savings goal...");
    create_card(
        NewCard {
            card_holder: "Demo User".to_owned(),
            last4: "4242".to_owned(),
            expiry_date: "12/29".to_owned(),
            card_type: "visa".to_owned(),
        },
        user.id,
        &connection,
    )?;

    create_savings_goal(
        SavingsGoalData {
            name: "Holiday".to_owned(),
            target_amount: 5000.0,
            current_amount: 1250.0,
        },
        user.id,
        &connection,
    )?;

    println!("Success! Log in with {DEMO_EMAIL} and the password \"{DEMO_PASSWORD}\".");

    Ok(())
}
