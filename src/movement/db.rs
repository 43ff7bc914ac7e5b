//! Database operations for movements.

use rusqlite::{Connection, Row, ToSql, params, params_from_iter};
use time::OffsetDateTime;

use crate::{
    Error,
    movement::{Movement, MovementId, NewMovement, QuerySpec, TypeFilter, first_day_on_or_after},
};

const SELECT_MOVEMENT: &str = "SELECT id, description, amount, movement_type, movement_date, \
    register_date FROM movement";

/// Create a movement and return it with its generated ID.
///
/// `register_date` records when the movement was entered and should be the
/// current time.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn create_movement(
    movement: NewMovement,
    register_date: OffsetDateTime,
    connection: &Connection,
) -> Result<Movement, Error> {
    connection
        .prepare(
            "INSERT INTO movement (description, amount, movement_type, movement_date, register_date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, description, amount, movement_type, movement_date, register_date",
        )?
        .query_row(
            params![
                movement.description,
                movement.amount,
                movement.movement_type,
                movement.movement_date,
                register_date,
            ],
            map_movement_row,
        )
        .map_err(Error::from)
}

/// Retrieve a single movement by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a movement, or
/// [Error::SqlError] if there is some other SQL error.
pub fn get_movement(id: MovementId, connection: &Connection) -> Result<Movement, Error> {
    connection
        .prepare(&format!("{SELECT_MOVEMENT} WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_movement_row)
        .map_err(Error::from)
}

/// Replace the editable fields of a movement.
///
/// The ID and register date are left untouched.
///
/// # Errors
/// Returns [Error::UpdateMissingMovement] if `id` does not refer to a movement.
pub fn update_movement(
    id: MovementId,
    movement: NewMovement,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE movement
        SET \
            description = ?1, \
            amount = ?2, \
            movement_type = ?3, \
            movement_date = ?4 \
        WHERE id = ?5",
        params![
            movement.description,
            movement.amount,
            movement.movement_type,
            movement.movement_date,
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingMovement);
    }

    Ok(())
}

/// Delete a movement by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingMovement] if `id` does not refer to a movement.
pub fn delete_movement(id: MovementId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM movement WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingMovement);
    }

    Ok(())
}

/// Fetch the movements matching `query` in the order they were created.
///
/// Movement dates are whole days, so the date-time bounds of `query` are
/// converted to the first and last day they admit before querying.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn query_movements(query: &QuerySpec, connection: &Connection) -> Result<Vec<Movement>, Error> {
    let mut conditions: Vec<&str> = Vec::new();
    let mut parameters: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(start) = query.start {
        let Some(first_day) = first_day_on_or_after(start) else {
            return Ok(Vec::new());
        };

        conditions.push("movement_date >= ?");
        parameters.push(Box::new(first_day));
    }

    if let Some(end) = query.end {
        conditions.push("movement_date <= ?");
        parameters.push(Box::new(end.date()));
    }

    if let Some(description) = &query.description {
        // instr is case sensitive, unlike LIKE.
        conditions.push("instr(description, ?) > 0");
        parameters.push(Box::new(description.clone()));
    }

    if let TypeFilter::Only(movement_type) = &query.movement_type {
        conditions.push("movement_type = ?");
        parameters.push(Box::new(movement_type.clone()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    connection
        .prepare(&format!("{SELECT_MOVEMENT}{where_clause} ORDER BY id ASC"))?
        .query_map(params_from_iter(parameters.iter()), map_movement_row)?
        .map(|maybe_movement| maybe_movement.map_err(Error::from))
        .collect()
}

/// Get the total number of movements in the database.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn count_movements(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM movement", [], |row| row.get(0))
        .map_err(Error::from)
}

/// Create the movement table.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_movement_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS movement (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            movement_type TEXT NOT NULL,
            movement_date TEXT NOT NULL,
            register_date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_movement_date ON movement(movement_date);",
    )
}

/// Map a database row to a [Movement].
pub fn map_movement_row(row: &Row) -> Result<Movement, rusqlite::Error> {
    Ok(Movement {
        id: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        movement_type: row.get(3)?,
        movement_date: row.get(4)?,
        register_date: row.get(5)?,
    })
}

#[cfg(test)]
mod movement_store_tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};

    use crate::{
        Error,
        db::initialize,
        movement::{Amount, MovementType, NewMovement},
    };

    use super::{count_movements, create_movement, delete_movement, get_movement, update_movement};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn groceries() -> NewMovement {
        NewMovement {
            description: "Groceries".to_owned(),
            amount: Amount::new_unchecked(dec!(42.15)),
            movement_type: MovementType::Expenses,
            movement_date: date!(2024-01-05),
        }
    }

    #[test]
    fn create_succeeds() {
        let connection = get_test_connection();
        let register_date = datetime!(2024-01-06 08:15:30 UTC);

        let movement = create_movement(groceries(), register_date, &connection)
            .expect("Could not create movement");

        assert_eq!(movement.id, 1);
        assert_eq!(movement.description, "Groceries");
        assert_eq!(movement.amount.as_decimal(), dec!(42.15));
        assert_eq!(movement.movement_type, MovementType::Expenses);
        assert_eq!(movement.movement_date, date!(2024-01-05));
        assert_eq!(movement.register_date, register_date);
    }

    #[test]
    fn each_movement_gets_its_own_register_date() {
        let connection = get_test_connection();

        let first = create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");
        let second = create_movement(groceries(), datetime!(2024-01-07 19:45 UTC), &connection)
            .expect("Could not create movement");

        assert_ne!(first.register_date, second.register_date);
    }

    #[test]
    fn store_does_not_enforce_amount_range() {
        let connection = get_test_connection();
        let movement = NewMovement {
            amount: Amount::new_unchecked(dec!(-100000)),
            ..groceries()
        };

        let got = create_movement(movement, datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");

        assert_eq!(got.amount.as_decimal(), dec!(-100000));
    }

    #[test]
    fn get_returns_created_movement() {
        let connection = get_test_connection();
        let created = create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");

        let got = get_movement(created.id, &connection);

        assert_eq!(got, Ok(created));
    }

    #[test]
    fn get_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_movement(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn update_replaces_fields_but_keeps_register_date() {
        let connection = get_test_connection();
        let created = create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");
        let replacement = NewMovement {
            description: "Monthly salary".to_owned(),
            amount: Amount::new_unchecked(dec!(3200)),
            movement_type: MovementType::Incomes,
            movement_date: date!(2024-01-01),
        };

        update_movement(created.id, replacement.clone(), &connection)
            .expect("Could not update movement");

        let got = get_movement(created.id, &connection).expect("Could not get movement");
        assert_eq!(got.id, created.id);
        assert_eq!(got.description, replacement.description);
        assert_eq!(got.amount, replacement.amount);
        assert_eq!(got.movement_type, replacement.movement_type);
        assert_eq!(got.movement_date, replacement.movement_date);
        assert_eq!(got.register_date, created.register_date);
    }

    #[test]
    fn update_with_invalid_id_returns_error() {
        let connection = get_test_connection();

        assert_eq!(
            update_movement(999, groceries(), &connection),
            Err(Error::UpdateMissingMovement)
        );
    }

    #[test]
    fn delete_succeeds() {
        let connection = get_test_connection();
        let created = create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");

        assert_eq!(delete_movement(created.id, &connection), Ok(()));
        assert_eq!(get_movement(created.id, &connection), Err(Error::NotFound));
    }

    #[test]
    fn delete_with_invalid_id_returns_error() {
        let connection = get_test_connection();

        assert_eq!(
            delete_movement(999, &connection),
            Err(Error::DeleteMissingMovement)
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let connection = get_test_connection();
        let first = create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");
        delete_movement(first.id, &connection).expect("Could not delete movement");

        let second = create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
            .expect("Could not create movement");

        assert!(second.id > first.id);
    }

    #[test]
    fn get_count() {
        let connection = get_test_connection();
        let want_count = 12;
        for _ in 0..want_count {
            create_movement(groceries(), datetime!(2024-01-06 08:00 UTC), &connection)
                .expect("Could not create movement");
        }

        assert_eq!(count_movements(&connection), Ok(want_count));
    }
}
