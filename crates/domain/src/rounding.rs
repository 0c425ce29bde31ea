// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Currency and percentage rounding.
//!
//! All rounding in the engine is half away from zero. `Decimal::round` uses
//! banker's rounding and must not be used for reported figures.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places (currency, percentages).
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole number.
#[must_use]
pub fn round0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a non-negative whole percentage to `u32`, saturating at the bounds.
#[must_use]
pub fn whole_percent(value: Decimal) -> u32 {
    round0(value).to_u32().unwrap_or(if value.is_sign_negative() {
        0
    } else {
        u32::MAX
    })
}

/// Clamps a score to `[0, 100]`.
#[must_use]
pub fn clamp_score(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round2_midpoint_goes_away_from_zero() {
        assert_eq!(round2(dec("1.005")), dec("1.01"));
        assert_eq!(round2(dec("2.125")), dec("2.13"));
        assert_eq!(round2(dec("-2.125")), dec("-2.13"));
    }

    #[test]
    fn test_round0_midpoint_goes_away_from_zero() {
        assert_eq!(round0(dec("100.5")), dec("101"));
        assert_eq!(round0(dec("99.49")), dec("99"));
    }

    #[test]
    fn test_whole_percent_saturates_negative_to_zero() {
        assert_eq!(whole_percent(dec("-3")), 0);
        assert_eq!(whole_percent(dec("104.6")), 105);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(dec("-12")), Decimal::ZERO);
        assert_eq!(clamp_score(dec("130")), Decimal::ONE_HUNDRED);
        assert_eq!(clamp_score(dec("72.5")), dec("72.5"));
    }
}
