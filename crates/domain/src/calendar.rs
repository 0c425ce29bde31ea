// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-month arithmetic on `time::Date`.

use crate::error::DomainError;
use time::{Date, Duration, Month};

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Returns the number of days in the given month.
fn days_in_month(year: i32, month: Month) -> Result<u8, DomainError> {
    let (next_year, next_month) = if month == Month::December {
        (year + 1, Month::January)
    } else {
        (year, month.next())
    };

    Date::from_calendar_date(next_year, next_month, 1)
        .ok()
        .and_then(Date::previous_day)
        .map(Date::day)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the length of {month} {year}"),
        })
}

/// Adds whole calendar months to a date.
///
/// The day of month is clamped to the last day of the target month, so
/// `2024-01-31 + 1 month` is `2024-02-29`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn add_months(date: Date, months: u32) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {months} months to {date}"),
    };

    let month_index: i64 = i64::from(u8::from(date.month())) - 1;
    let total: i64 = i64::from(date.year()) * 12 + month_index + i64::from(months);
    let year: i32 = i32::try_from(total.div_euclid(12)).map_err(|_| overflow())?;
    let month_number: u8 = u8::try_from(total.rem_euclid(12) + 1).map_err(|_| overflow())?;
    let month: Month = Month::try_from(month_number).map_err(|_| overflow())?;

    let day: u8 = date.day().min(days_in_month(year, month)?);
    Date::from_calendar_date(year, month, day).map_err(|_| overflow())
}

/// Adds whole days to a date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn add_days(date: Date, days: u32) -> Result<Date, DomainError> {
    date.checked_add(Duration::days(i64::from(days)))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {days} days to {date}"),
        })
}

/// Counts complete calendar months from `start` to `as_of`.
///
/// A month is complete once the same day of month has been reached. Returns 0
/// when `as_of` precedes `start`.
#[must_use]
pub fn complete_months_between(start: Date, as_of: Date) -> u32 {
    if as_of <= start {
        return 0;
    }

    let years: i64 = i64::from(as_of.year()) - i64::from(start.year());
    let months: i64 =
        i64::from(u8::from(as_of.month())) - i64::from(u8::from(start.month()));
    let mut total: i64 = years * 12 + months;
    if as_of.day() < start.day() {
        total -= 1;
    }

    u32::try_from(total.max(0)).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_date_accepts_iso() {
        assert_eq!(parse_date("2025-03-15").unwrap(), date!(2025 - 03 - 15));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("15/03/2025"),
            Err(DomainError::DateParseError { .. })
        ));
    }

    #[test]
    fn test_add_months_same_day() {
        assert_eq!(
            add_months(date!(2024 - 01 - 15), 12).unwrap(),
            date!(2025 - 01 - 15)
        );
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(
            add_months(date!(2024 - 01 - 31), 1).unwrap(),
            date!(2024 - 02 - 29)
        );
        assert_eq!(
            add_months(date!(2023 - 01 - 31), 1).unwrap(),
            date!(2023 - 02 - 28)
        );
        assert_eq!(
            add_months(date!(2024 - 08 - 31), 3).unwrap(),
            date!(2024 - 11 - 30)
        );
    }

    #[test]
    fn test_add_months_crosses_year_boundary() {
        assert_eq!(
            add_months(date!(2024 - 11 - 10), 3).unwrap(),
            date!(2025 - 02 - 10)
        );
    }

    #[test]
    fn test_add_months_zero_is_identity() {
        assert_eq!(
            add_months(date!(2024 - 05 - 05), 0).unwrap(),
            date!(2024 - 05 - 05)
        );
    }

    #[test]
    fn test_complete_months_between() {
        assert_eq!(
            complete_months_between(date!(2024 - 01 - 15), date!(2024 - 02 - 14)),
            0
        );
        assert_eq!(
            complete_months_between(date!(2024 - 01 - 15), date!(2024 - 02 - 15)),
            1
        );
        assert_eq!(
            complete_months_between(date!(2022 - 06 - 30), date!(2025 - 06 - 01)),
            35
        );
        assert_eq!(
            complete_months_between(date!(2025 - 01 - 01), date!(2024 - 01 - 01)),
            0
        );
    }

    #[test]
    fn test_add_days() {
        assert_eq!(
            add_days(date!(2025 - 12 - 20), 30).unwrap(),
            date!(2026 - 01 - 19)
        );
    }
}
