//! Validation rules for the fields of a movement form.
//!
//! Each rule is independent and stateless. A rule either accepts the raw
//! value, returning it parsed, or rejects it with exactly one error.

use std::str::FromStr;

use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::movement::{Amount, MovementForm, MovementType, NewMovement};

/// The shortest description that is accepted.
pub const MIN_DESCRIPTION_LENGTH: usize = 5;

/// The format of dates submitted in forms, e.g. `2024-01-31`.
pub const FORM_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The form field that a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The `description` input.
    Description,
    /// The `amount` input.
    Amount,
    /// The `movement_date` input.
    MovementDate,
}

impl Field {
    /// The name of the form input for this field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::MovementDate => "movement_date",
        }
    }
}

/// A user correctable problem with a submitted field.
///
/// The messages are shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The description was empty.
    #[error("A description is required")]
    DescriptionRequired,

    /// The description had fewer than [MIN_DESCRIPTION_LENGTH] characters.
    #[error("Description must be at least 5 characters long")]
    DescriptionTooShort,

    /// The amount was empty or only whitespace.
    #[error("An amount is required")]
    AmountRequired,

    /// The amount was not empty but could not be read as a number.
    #[error("The amount must be a number")]
    AmountNotANumber,

    /// The amount was below zero.
    #[error("The amount cannot be negative")]
    NegativeAmount,

    /// The amount was over [crate::movement::Amount::MAX].
    #[error("The amount cannot greather than 45000")]
    AmountTooLarge,

    /// The date was empty.
    #[error("Movement date is required")]
    MovementDateRequired,

    /// The date was not empty but is not a `YYYY-MM-DD` calendar date.
    #[error("Movement date must be a valid date")]
    MovementDateNotADate,

    /// The date was not before the current local time.
    #[error("Movement date cannot be grether than today")]
    FutureMovementDate,
}

impl ValidationError {
    /// The field that failed validation.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::DescriptionRequired | ValidationError::DescriptionTooShort => {
                Field::Description
            }
            ValidationError::AmountRequired
            | ValidationError::AmountNotANumber
            | ValidationError::NegativeAmount
            | ValidationError::AmountTooLarge => Field::Amount,
            ValidationError::MovementDateRequired
            | ValidationError::MovementDateNotADate
            | ValidationError::FutureMovementDate => Field::MovementDate,
        }
    }

    /// Whether the value could not be parsed at all, as opposed to breaking a rule.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ValidationError::AmountNotANumber | ValidationError::MovementDateNotADate
        )
    }
}

/// Check that a description is present and long enough.
///
/// Length is counted in characters, surrounding whitespace included.
pub fn validate_description(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    if raw.chars().count() < MIN_DESCRIPTION_LENGTH {
        return Err(ValidationError::DescriptionTooShort);
    }

    Ok(raw.to_owned())
}

/// Check that an amount is present, numeric and between 0 and 45000 inclusive.
pub fn validate_amount(raw: &str) -> Result<Amount, ValidationError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::AmountRequired);
    }

    let amount = match Decimal::from_str(raw) {
        Ok(amount) => amount,
        Err(_) => parse_out_of_range_amount(raw)?,
    };

    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount);
    }

    let amount = Amount::new_unchecked(amount);

    if amount > Amount::MAX {
        return Err(ValidationError::AmountTooLarge);
    }

    Ok(amount)
}

/// Read a number that `Decimal` cannot hold, e.g. `1e30`.
///
/// It is still a number, so it is rejected for its sign or size instead of
/// being reported as not a number. Values too small to represent round to zero.
fn parse_out_of_range_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let value: f64 = raw
        .parse()
        .map_err(|_| ValidationError::AmountNotANumber)?;

    if value.is_nan() {
        return Err(ValidationError::AmountNotANumber);
    }

    if value < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }

    if value > 45_000.0 {
        return Err(ValidationError::AmountTooLarge);
    }

    Ok(Decimal::try_from(value).unwrap_or(Decimal::ZERO))
}

/// Check that a movement date is present, a valid `YYYY-MM-DD` date and
/// strictly before `now`.
///
/// The date is compared as midnight at the start of that day, so today is
/// accepted for any `now` after midnight.
pub fn validate_movement_date(raw: &str, now: PrimitiveDateTime) -> Result<Date, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MovementDateRequired);
    }

    let date =
        Date::parse(raw, FORM_DATE_FORMAT).map_err(|_| ValidationError::MovementDateNotADate)?;

    if date.midnight() >= now {
        return Err(ValidationError::FutureMovementDate);
    }

    Ok(date)
}

/// Validate every field of a movement form.
///
/// Fields are checked in the order description, amount, movement date and the
/// first error is returned. The movement type is stored as submitted.
pub fn validate_movement_form(
    form: &MovementForm,
    now: PrimitiveDateTime,
) -> Result<NewMovement, ValidationError> {
    let description = validate_description(&form.description)?;
    let amount = validate_amount(&form.amount)?;
    let movement_date = validate_movement_date(&form.movement_date, now)?;

    Ok(NewMovement {
        description,
        amount,
        movement_type: MovementType::from(form.movement_type.as_str()),
        movement_date,
    })
}
