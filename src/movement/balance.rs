//! The running balance of a set of movements.

use rust_decimal::Decimal;

use crate::movement::{Movement, MovementType};

/// Sum the incomes and subtract the expenses.
///
/// Movements of any other type are ignored. An empty input gives zero.
pub fn compute_balance<'a>(movements: impl IntoIterator<Item = &'a Movement>) -> Decimal {
    movements
        .into_iter()
        .fold(Decimal::ZERO, |balance, movement| match movement.movement_type {
            MovementType::Incomes => balance + movement.amount.as_decimal(),
            MovementType::Expenses => balance - movement.amount.as_decimal(),
            MovementType::Other(_) => balance,
        })
}
