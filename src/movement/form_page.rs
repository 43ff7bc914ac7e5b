use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    movement::{
        MovementId, MovementState, get_movement,
        views::{MovementFormMode, MovementFormValues, movement_form_modal},
    },
    timezone::local_now,
};

/// Respond with an empty form for a new movement.
pub async fn get_create_movement_form(State(state): State<MovementState>) -> Response {
    let today = match local_now(&state.local_timezone) {
        Ok(now) => now.date(),
        Err(error) => return error.into_alert_response(),
    };

    movement_form_modal(
        MovementFormMode::Create,
        &MovementFormValues::default(),
        today,
    )
    .into_response()
}

/// Respond with a form prefilled with the movement `movement_id`.
pub async fn get_edit_movement_form(
    State(state): State<MovementState>,
    Path(movement_id): Path<MovementId>,
) -> Response {
    let today = match local_now(&state.local_timezone) {
        Ok(now) => now.date(),
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_movement(movement_id, &connection) {
        Ok(movement) => movement_form_modal(
            MovementFormMode::Edit(movement.id),
            &MovementFormValues::from(&movement),
            today,
        )
        .into_response(),
        Err(Error::NotFound) => {
            tracing::debug!("requested edit form for missing movement {movement_id}");
            Error::NotFound.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not get movement {movement_id}: {error}");
            error.into_alert_response()
        }
    }
}
