//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/update/{movement_id}', use [format_endpoint].

/// The home page with the movements of the last seven days.
pub const ROOT: &str = "/";
/// The movement list and balance for a set of filter criteria.
pub const FILTER_MOVEMENTS: &str = "/filter-movements";
/// A cleared filter form.
pub const EMPTY_FILTER: &str = "/empty-filter";
/// The form for creating a movement.
pub const CREATE_MOVEMENT_FORM: &str = "/create-movement-form";
/// The form for editing an existing movement.
pub const EDIT_MOVEMENT_FORM: &str = "/edit-movement-form/{movement_id}";
/// The route to create a movement.
pub const SUBMIT_MOVEMENT: &str = "/submit";
/// The route to update a movement.
pub const UPDATE_MOVEMENT: &str = "/update/{movement_id}";
/// The route to delete a movement.
pub const DELETE_MOVEMENT: &str = "/delete/{movement_id}";
/// The route to validate a movement description.
pub const VALIDATE_DESCRIPTION: &str = "/validate/description";
/// The route to validate a movement amount.
pub const VALIDATE_AMOUNT: &str = "/validate/amount";
/// The route to validate a movement date.
pub const VALIDATE_MOVEMENT_DATE: &str = "/validate/movement-date";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/update/{movement_id}', '{movement_id}'
/// is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::FILTER_MOVEMENTS);
        assert_endpoint_is_valid_uri(endpoints::EMPTY_FILTER);
        assert_endpoint_is_valid_uri(endpoints::CREATE_MOVEMENT_FORM);
        assert_endpoint_is_valid_uri(endpoints::EDIT_MOVEMENT_FORM);
        assert_endpoint_is_valid_uri(endpoints::SUBMIT_MOVEMENT);
        assert_endpoint_is_valid_uri(endpoints::UPDATE_MOVEMENT);
        assert_endpoint_is_valid_uri(endpoints::DELETE_MOVEMENT);
        assert_endpoint_is_valid_uri(endpoints::VALIDATE_DESCRIPTION);
        assert_endpoint_is_valid_uri(endpoints::VALIDATE_AMOUNT);
        assert_endpoint_is_valid_uri(endpoints::VALIDATE_MOVEMENT_DATE);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::UPDATE_MOVEMENT, 1);

        assert_eq!(formatted_path, "/update/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
