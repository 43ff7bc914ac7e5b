//! Core movement domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

/// Database identifier for a movement.
pub type MovementId = i64;

/// The direction money moved in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementType {
    /// Money that was earned or received.
    Incomes,
    /// Money that was spent.
    Expenses,
    /// A type outside the known set, kept verbatim.
    ///
    /// Submitted types are not validated, so the store can hold values other
    /// than `incomes` and `expenses`. These never count towards a balance.
    Other(String),
}

impl MovementType {
    /// The string stored in the database and sent in forms.
    pub fn as_str(&self) -> &str {
        match self {
            MovementType::Incomes => "incomes",
            MovementType::Expenses => "expenses",
            MovementType::Other(other) => other,
        }
    }
}

impl From<&str> for MovementType {
    fn from(value: &str) -> Self {
        match value {
            "incomes" => MovementType::Incomes,
            "expenses" => MovementType::Expenses,
            other => MovementType::Other(other.to_owned()),
        }
    }
}

impl Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for MovementType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MovementType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(MovementType::from)
    }
}

/// An exact decimal amount of money.
///
/// Amounts are stored as decimal text so that summing many of them never
/// drifts the way binary floating point does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The largest amount a user may submit.
    pub const MAX: Amount = Amount(Decimal::from_parts(45_000, 0, 0, false, 0));

    /// Wrap a decimal without checking its range.
    ///
    /// Only the validators enforce the range of an amount, the store accepts
    /// any value. Use [crate::movement::validate_amount] for user input.
    pub fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// The wrapped decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(_) => Decimal::from_str(value.as_str()?)
                .map(Amount)
                .map_err(|error| FromSqlError::Other(Box::new(error))),
            ValueRef::Integer(integer) => Ok(Amount(Decimal::from(integer))),
            ValueRef::Real(real) => Decimal::try_from(real)
                .map(Amount)
                .map_err(|error| FromSqlError::Other(Box::new(error))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A recorded income or expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    /// Assigned by the store on creation, never reused.
    pub id: MovementId,
    /// What the money was for.
    pub description: String,
    /// How much money moved.
    pub amount: Amount,
    /// Whether the money came in or went out.
    pub movement_type: MovementType,
    /// When the movement happened.
    pub movement_date: Date,
    /// When the movement was recorded. Set once on creation.
    pub register_date: OffsetDateTime,
}

/// The user editable fields of a movement.
///
/// Used for both creating and updating movements. The store does not check
/// these values, run them through [crate::movement::validate_movement_form]
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    /// What the money was for.
    pub description: String,
    /// How much money moved.
    pub amount: Amount,
    /// Whether money came in or went out.
    pub movement_type: MovementType,
    /// The day the money moved.
    pub movement_date: Date,
}

/// Raw form data for creating or editing a movement.
///
/// Every field is kept as the submitted text so that validation can echo the
/// user's input back with an error message.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MovementForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub movement_type: String,
    #[serde(default)]
    pub movement_date: String,
}
