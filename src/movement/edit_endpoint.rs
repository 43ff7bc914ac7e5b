use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;

use crate::{
    AppState, Error,
    movement::{
        MovementForm, MovementId, MovementState, get_movement, update_movement,
        validate_movement_form,
        views::{MOVEMENTS_CHANGED_EVENT, movement_card},
    },
    timezone::local_now,
};

/// A route handler for updating a movement, responds with the updated card.
///
/// The form is validated the same way as for new movements.
#[debug_handler(state = AppState)]
pub async fn update_movement_endpoint(
    State(state): State<MovementState>,
    Path(movement_id): Path<MovementId>,
    Form(form): Form<MovementForm>,
) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };

    let changes = match validate_movement_form(&form, now) {
        Ok(changes) => changes,
        Err(error) => {
            tracing::debug!(
                "rejected update to movement {movement_id}, invalid {}: {error}",
                error.field().name()
            );
            return Error::from(error).into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let updated = update_movement(movement_id, changes, &connection)
        .and_then(|()| get_movement(movement_id, &connection));

    match updated {
        Ok(movement) => (
            [(HX_TRIGGER, MOVEMENTS_CHANGED_EVENT)],
            movement_card(&movement),
        )
            .into_response(),
        Err(Error::UpdateMissingMovement) => {
            tracing::debug!("tried to update missing movement {movement_id}");
            Error::UpdateMissingMovement.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not update movement {movement_id}: {error}");
            error.into_alert_response()
        }
    }
}
