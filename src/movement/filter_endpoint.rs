use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;

use crate::{
    Error,
    movement::{
        FilterCriteria, FilterParams, MovementState, build_filter_query, compute_balance,
        query_movements,
        views::{FilterFormValues, filter_form, movement_list},
    },
};

/// Respond with the movement list and balance for the criteria in the query string.
///
/// Empty parameters leave that criterion unconstrained.
pub async fn filter_movements_endpoint(
    State(state): State<MovementState>,
    Query(params): Query<FilterParams>,
) -> Response {
    let criteria = match FilterCriteria::try_from(params) {
        Ok(criteria) => criteria,
        Err(error) => {
            tracing::debug!("rejected filter request: {error}");
            return error.into_alert_response();
        }
    };
    let query = build_filter_query(criteria);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match query_movements(&query, &connection) {
        Ok(movements) => movement_list(&movements, compute_balance(&movements)).into_response(),
        Err(error) => {
            tracing::error!("could not filter movements with {query:?}: {error}");
            error.into_alert_response()
        }
    }
}

/// Respond with a cleared filter form.
pub async fn get_empty_filter() -> Response {
    filter_form(&FilterFormValues::default()).into_response()
}
