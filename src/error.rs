//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, movement::ValidationError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A submitted movement failed validation.
    ///
    /// The client should correct the field named by the inner error and try again.
    #[error("invalid movement: {0}")]
    InvalidMovement(ValidationError),

    /// A date in the filter query string is not a `YYYY-MM-DD` date.
    #[error("\"{0}\" is not a valid filter date")]
    InvalidFilterDate(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a movement that does not exist.
    #[error("tried to update a movement that is not in the database")]
    UpdateMissingMovement,

    /// Tried to delete a movement that does not exist.
    #[error("tried to delete a movement that is not in the database")]
    DeleteMissingMovement,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::InvalidMovement(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &invalid_timezone_fix(&timezone),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidMovement(error) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid movement".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::InvalidFilterDate(date) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid filter date".to_owned(),
                    details: format!("\"{date}\" is not a valid date. Use the format YYYY-MM-DD."),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Movement not found".to_owned(),
                    details: "Try refreshing the page to see if the movement has been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingMovement => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Could not update movement".to_owned(),
                    details: "The movement could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingMovement => (
                StatusCode::NOT_FOUND,
                Alert {
                    message: "Could not delete movement".to_owned(),
                    details: "The movement could not be found. \
                    Try refreshing the page to see if the movement has already been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: invalid_timezone_fix(&timezone),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn invalid_timezone_fix(timezone: &str) -> String {
    format!(
        "Could not get local timezone \"{timezone}\". Check your server settings and \
        ensure the timezone has been set to valid, canonical timezone string"
    )
}
