// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overflow-checked decimal arithmetic.
//!
//! The `rust_decimal` operators panic when a result leaves the 96-bit range.
//! Every computation on caller-supplied amounts goes through these helpers and
//! fails with `DomainError::ArithmeticOverflow` instead.

use crate::error::DomainError;
use rust_decimal::Decimal;

fn overflow(operation: &str) -> DomainError {
    DomainError::ArithmeticOverflow {
        operation: operation.to_string(),
    }
}

/// `lhs + rhs`.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` naming `operation` on overflow.
pub fn checked_add(lhs: Decimal, rhs: Decimal, operation: &str) -> Result<Decimal, DomainError> {
    lhs.checked_add(rhs).ok_or_else(|| overflow(operation))
}

/// `lhs - rhs`.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` naming `operation` on overflow.
pub fn checked_sub(lhs: Decimal, rhs: Decimal, operation: &str) -> Result<Decimal, DomainError> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow(operation))
}

/// `lhs × rhs`.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` naming `operation` on overflow.
pub fn checked_mul(lhs: Decimal, rhs: Decimal, operation: &str) -> Result<Decimal, DomainError> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(operation))
}

/// `lhs / rhs`. A zero divisor is reported as an overflow.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` naming `operation` on overflow or
/// division by zero.
pub fn checked_div(lhs: Decimal, rhs: Decimal, operation: &str) -> Result<Decimal, DomainError> {
    lhs.checked_div(rhs).ok_or_else(|| overflow(operation))
}

/// `value / whole × 100`.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` naming `operation` on overflow or
/// a zero `whole`.
pub fn checked_percent_of(
    value: Decimal,
    whole: Decimal,
    operation: &str,
) -> Result<Decimal, DomainError> {
    checked_mul(
        checked_div(value, whole, operation)?,
        Decimal::ONE_HUNDRED,
        operation,
    )
}

/// Sums the values.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` naming `operation` on overflow.
pub fn checked_sum<I>(values: I, operation: &str) -> Result<Decimal, DomainError>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| checked_add(acc, v, operation))
}
