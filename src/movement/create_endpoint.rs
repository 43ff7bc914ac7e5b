use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    movement::{
        MovementForm, MovementState, create_movement, validate_movement_form,
        views::{MOVEMENTS_CHANGED_EVENT, movement_card},
    },
    timezone::local_now,
};

/// A route handler for creating a movement, responds with the new movement's card.
///
/// Every field is validated before anything is written. The first invalid
/// field is reported with an alert and a 400 status code.
#[debug_handler(state = AppState)]
pub async fn submit_movement_endpoint(
    State(state): State<MovementState>,
    Form(form): Form<MovementForm>,
) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };

    let new_movement = match validate_movement_form(&form, now) {
        Ok(new_movement) => new_movement,
        Err(error) => {
            tracing::debug!("rejected new movement, invalid {}: {error}", error.field().name());
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

    match create_movement(new_movement, OffsetDateTime::now_utc(), &connection) {
        Ok(movement) => {
            tracing::debug!("created movement {}", movement.id);
            (
                [(HX_TRIGGER, MOVEMENTS_CHANGED_EVENT)],
                movement_card(&movement),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create movement: {error}");
            error.into_alert_response()
        }
    }
}
