use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;

use crate::{
    Error,
    movement::{MovementId, MovementState, delete_movement, views::MOVEMENTS_CHANGED_EVENT},
};

/// A route handler for deleting a movement.
///
/// Responds with an empty body so htmx removes the movement's card.
pub async fn delete_movement_endpoint(
    State(state): State<MovementState>,
    Path(movement_id): Path<MovementId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_movement(movement_id, &connection) {
        // The status code has to be 200 OK or htmx will not remove the card.
        Ok(()) => (StatusCode::OK, [(HX_TRIGGER, MOVEMENTS_CHANGED_EVENT)]).into_response(),
        Err(Error::DeleteMissingMovement) => {
            tracing::debug!("tried to delete missing movement {movement_id}");
            Error::DeleteMissingMovement.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not delete movement {movement_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        Error,
        db::initialize,
        movement::{Amount, MovementState, MovementType, NewMovement, create_movement, get_movement},
    };

    use super::delete_movement_endpoint;

    fn must_create_state() -> MovementState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        MovementState {
            local_timezone: "Etc/UTC".to_owned(),
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_movement() {
        let state = must_create_state();
        let movement = create_movement(
            NewMovement {
                description: "Cinema tickets".to_owned(),
                amount: Amount::new_unchecked(dec!(30)),
                movement_type: MovementType::Expenses,
                movement_date: date!(2024-03-15),
            },
            OffsetDateTime::now_utc(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = delete_movement_endpoint(State(state.clone()), Path(movement.id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_movement(movement.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn missing_movement_is_not_found() {
        let response = delete_movement_endpoint(State(must_create_state()), Path(1)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
