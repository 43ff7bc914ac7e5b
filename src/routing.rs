//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    movement::{
        delete_movement_endpoint, filter_movements_endpoint, get_create_movement_form,
        get_edit_movement_form, get_empty_filter, get_home_page, submit_movement_endpoint,
        update_movement_endpoint, validate_amount_endpoint, validate_description_endpoint,
        validate_movement_date_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let fragment_routes = Router::new()
        .route(endpoints::FILTER_MOVEMENTS, get(filter_movements_endpoint))
        .route(endpoints::EMPTY_FILTER, get(get_empty_filter))
        .route(endpoints::CREATE_MOVEMENT_FORM, get(get_create_movement_form))
        .route(endpoints::EDIT_MOVEMENT_FORM, get(get_edit_movement_form))
        .route(endpoints::SUBMIT_MOVEMENT, post(submit_movement_endpoint))
        .route(endpoints::UPDATE_MOVEMENT, put(update_movement_endpoint))
        .route(endpoints::DELETE_MOVEMENT, delete(delete_movement_endpoint))
        .route(
            endpoints::VALIDATE_DESCRIPTION,
            post(validate_description_endpoint),
        )
        .route(endpoints::VALIDATE_AMOUNT, post(validate_amount_endpoint))
        .route(
            endpoints::VALIDATE_MOVEMENT_DATE,
            post(validate_movement_date_endpoint),
        );

    page_routes
        .merge(fragment_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::Duration;

    use crate::{
        AppState, endpoints,
        test_utils::assert_valid_html,
        timezone::local_now,
    };

    use super::build_router;

    fn must_create_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().expect("Could not open database in memory."),
            "Etc/UTC",
        )
        .expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn yesterday() -> String {
        (local_now("Etc/UTC").unwrap().date() - Duration::days(1)).to_string()
    }

    fn card_count(text: &str) -> usize {
        Html::parse_fragment(text)
            .select(&Selector::parse("article").unwrap())
            .count()
    }

    #[tokio::test]
    async fn home_page_renders() {
        let server = must_create_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        let html = Html::parse_document(&response.text());
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = must_create_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_error_page_renders() {
        let server = must_create_server();

        let response = server.get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn create_edit_filter_and_delete_movement() {
        let server = must_create_server();

        server
            .post(endpoints::SUBMIT_MOVEMENT)
            .form(&[
                ("description", "Weekly groceries"),
                ("amount", "85.50"),
                ("movement_type", "expenses"),
                ("movement_date", yesterday().as_str()),
            ])
            .await
            .assert_status_ok();
        server
            .post(endpoints::SUBMIT_MOVEMENT)
            .form(&[
                ("description", "Salary payment"),
                ("amount", "3000"),
                ("movement_type", "incomes"),
                ("movement_date", yesterday().as_str()),
            ])
            .await
            .assert_status_ok();

        let response = server
            .get(endpoints::FILTER_MOVEMENTS)
            .add_query_param("movement_type", "expenses")
            .await;
        response.assert_status_ok();
        assert_eq!(card_count(&response.text()), 1);

        server
            .get(&endpoints::format_endpoint(endpoints::EDIT_MOVEMENT_FORM, 1))
            .await
            .assert_status_ok();
        server
            .put(&endpoints::format_endpoint(endpoints::UPDATE_MOVEMENT, 1))
            .form(&[
                ("description", "Weekly groceries and snacks"),
                ("amount", "90"),
                ("movement_type", "expenses"),
                ("movement_date", yesterday().as_str()),
            ])
            .await
            .assert_status_ok();

        let response = server
            .get(endpoints::FILTER_MOVEMENTS)
            .add_query_param("description", "snacks")
            .await;
        assert_eq!(card_count(&response.text()), 1);

        server
            .delete(&endpoints::format_endpoint(endpoints::DELETE_MOVEMENT, 1))
            .await
            .assert_status_ok();
        server
            .delete(&endpoints::format_endpoint(endpoints::DELETE_MOVEMENT, 1))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let response = server.get(endpoints::FILTER_MOVEMENTS).await;
        assert_eq!(card_count(&response.text()), 1);
    }

    #[tokio::test]
    async fn submit_rejects_invalid_form() {
        let server = must_create_server();

        let response = server
            .post(endpoints::SUBMIT_MOVEMENT)
            .form(&[("description", "Rent"), ("amount", "10")])
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validate_description_renders_field() {
        let server = must_create_server();

        let response = server
            .post(endpoints::VALIDATE_DESCRIPTION)
            .form(&[("description", "")])
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("A description is required"));
    }
}
