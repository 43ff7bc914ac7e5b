//! Movements: recorded incomes and expenses, their validation, storage,
//! filtering and the pages for managing them.

mod balance;
mod create_endpoint;
mod db;
mod delete_endpoint;
mod domain;
mod edit_endpoint;
mod filter;
mod filter_endpoint;
mod form_page;
mod home_page;
mod validate_endpoint;
mod validation;
mod views;

pub use balance::compute_balance;
pub use create_endpoint::submit_movement_endpoint;
pub use db::{
    count_movements, create_movement, create_movement_table, delete_movement, get_movement,
    map_movement_row, query_movements, update_movement,
};
pub use delete_endpoint::delete_movement_endpoint;
pub use domain::{Amount, Movement, MovementForm, MovementId, MovementType, NewMovement};
pub use edit_endpoint::update_movement_endpoint;
pub use filter::{
    ALL_MOVEMENT_TYPES, FilterCriteria, FilterParams, HOME_VIEW_DAYS, QuerySpec, TypeFilter,
    build_filter_query, first_day_on_or_after,
};
pub use filter_endpoint::{filter_movements_endpoint, get_empty_filter};
pub use form_page::{get_create_movement_form, get_edit_movement_form};
pub use home_page::{MovementState, get_home_page};
pub use validate_endpoint::{
    ValidationState, validate_amount_endpoint, validate_description_endpoint,
    validate_movement_date_endpoint,
};
pub use validation::{
    FORM_DATE_FORMAT, Field, MIN_DESCRIPTION_LENGTH, ValidationError, validate_amount,
    validate_description, validate_movement_date, validate_movement_form,
};
