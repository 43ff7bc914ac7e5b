//! Per-field validation for the movement form.
//!
//! Each endpoint re-renders its field with the submitted value and at most one
//! error message. The responses are always 200 OK so htmx swaps the field.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;

use crate::{
    AppState,
    movement::{
        MovementForm, validate_amount, validate_description, validate_movement_date,
        views::{amount_field, description_field, movement_date_field},
    },
    timezone::local_now,
};

/// The state needed to validate movement dates.
#[derive(Debug, Clone)]
pub struct ValidationState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ValidationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Re-render the description field with its error, if any.
pub async fn validate_description_endpoint(Form(form): Form<MovementForm>) -> Response {
    match validate_description(&form.description) {
        Ok(description) => description_field(&description, None),
        Err(error) => description_field(&form.description, Some(&error.to_string())),
    }
    .into_response()
}

/// Re-render the amount field with its error, if any.
///
/// A valid amount is shown trimmed but otherwise exactly as parsed.
pub async fn validate_amount_endpoint(Form(form): Form<MovementForm>) -> Response {
    match validate_amount(&form.amount) {
        Ok(amount) => amount_field(&amount.as_decimal().to_string(), None),
        Err(error) => amount_field(&form.amount, Some(&error.to_string())),
    }
    .into_response()
}

/// Re-render the movement date field with its error, if any.
pub async fn validate_movement_date_endpoint(
    State(state): State<ValidationState>,
    Form(form): Form<MovementForm>,
) -> Response {
    let now = match local_now(&state.local_timezone) {
        Ok(now) => now,
        Err(error) => return error.into_alert_response(),
    };
    let today = now.date();

    match validate_movement_date(&form.movement_date, now) {
        Ok(date) => movement_date_field(&date.to_string(), None, today),
        Err(error) => movement_date_field(&form.movement_date, Some(&error.to_string()), today),
    }
    .into_response()
}
