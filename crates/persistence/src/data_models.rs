// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stored representations and the conversions between rows and domain values.
//!
//! Decimals are stored as TEXT to keep them exact, dates as ISO 8601 TEXT,
//! and enums by their wire names.

use comp_engine_domain::parse_date;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Parses a stored decimal column.
pub fn decimal_from_text(column: &str, value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("{column} '{value}' is not a decimal: {e}"))
    })
}

/// Parses an optional stored decimal column.
pub fn optional_decimal_from_text(
    column: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>, PersistenceError> {
    value.map(|v| decimal_from_text(column, v)).transpose()
}

/// Parses a stored ISO 8601 date column.
pub fn date_from_text(column: &str, value: &str) -> Result<Date, PersistenceError> {
    parse_date(value)
        .map_err(|e| PersistenceError::ReconstructionError(format!("{column}: {e}")))
}

/// Parses a stored enum column through its `FromStr` implementation.
pub fn enum_from_text<T>(column: &str, value: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| PersistenceError::ReconstructionError(format!("{column}: {e}")))
}

/// Narrows a stored INTEGER to `u32`.
pub fn u32_from_column(column: &str, value: i32) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}

/// Widens a `u32` for storage in an INTEGER column.
pub fn u32_to_column(column: &str, value: u32) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{column} out of range: {value}"))
    })
}
