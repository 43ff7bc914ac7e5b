//! Database initialization.

use rusqlite::Connection;

use crate::{Error, movement::create_movement_table};

/// Create the application tables if they do not exist yet.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_movement_table(connection)?;

    Ok(())
}
