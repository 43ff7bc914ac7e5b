use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    movement::{
        ALL_MOVEMENT_TYPES, QuerySpec, compute_balance, first_day_on_or_after, query_movements,
        views::{FilterFormValues, home_view},
    },
    timezone::local_now,
};

/// The state needed for the home page and the movement endpoints.
#[derive(Debug, Clone)]
pub struct MovementState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for managing movements.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for MovementState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the home page with the movements of the last seven days.
pub async fn get_home_page(State(state): State<MovementState>) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_response(),
    };

    let query = QuerySpec::home_view(now);

    let movements = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match query_movements(&query, &connection) {
            Ok(movements) => movements,
            Err(error) => {
                tracing::error!("could not query movements for the home page: {error}");
                return error.into_response();
            }
        }
    };

    let filter = FilterFormValues {
        start_date: query.start.and_then(first_day_on_or_after),
        end_date: query.end.map(|end| end.date()),
        description: String::new(),
        movement_type: ALL_MOVEMENT_TYPES.to_owned(),
    };
    let balance = compute_balance(&movements);

    home_view(&filter, &movements, balance).into_response()
}
