use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use movement_tracker::{Amount, MovementType, NewMovement, create_movement, initialize_db};

/// A utility for creating a test database for the movement tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Description, amount in cents, type and how many days ago.
const SAMPLE_MOVEMENTS: [(&str, i64, MovementType, i64); 10] = [
    ("Salary payment", 300000, MovementType::Incomes, 20),
    ("Monthly rent", 120000, MovementType::Expenses, 19),
    ("Electricity bill", 12040, MovementType::Expenses, 15),
    ("Weekly groceries", 8550, MovementType::Expenses, 13),
    ("Freelance design work", 45000, MovementType::Incomes, 10),
    ("Weekly groceries", 9215, MovementType::Expenses, 6),
    ("Cinema tickets", 3000, MovementType::Expenses, 4),
    ("Sold old bike", 15000, MovementType::Incomes, 3),
    ("Internet plan", 5999, MovementType::Expenses, 2),
    ("Coffee with friends", 1250, MovementType::Expenses, 1),
];

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
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample movements...");

    let now = OffsetDateTime::now_utc();

    for (description, cents, movement_type, days_ago) in SAMPLE_MOVEMENTS {
        create_movement(
            NewMovement {
                description: description.to_owned(),
                amount: Amount::new_unchecked(Decimal::new(cents, 2)),
                movement_type,
                movement_date: now.date() - Duration::days(days_ago),
            },
            now,
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
