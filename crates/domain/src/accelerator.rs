// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commission payouts against tiered accelerator structures.

use crate::arithmetic::{checked_mul, checked_percent_of};
use crate::eligibility::EligibilityCriterion;
use crate::error::DomainError;
use crate::policy::AcceleratorPolicy;
use crate::rounding::round2;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Kind of variable-pay plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    /// Sales commission.
    Sales,
    /// Performance bonus.
    Performance,
    /// Mixed sales and performance.
    Hybrid,
}

impl PlanType {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::Performance => "PERFORMANCE",
            Self::Hybrid => "HYBRID",
        }
    }
}

impl FromStr for PlanType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALES" => Ok(Self::Sales),
            "PERFORMANCE" => Ok(Self::Performance),
            "HYBRID" => Ok(Self::Hybrid),
            _ => Err(DomainError::InvalidEnumValue {
                kind: "plan type",
                value: s.to_string(),
            }),
        }
    }
}

/// A threshold/multiplier pair. `threshold` is an achievement percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorTier {
    /// Minimum achievement percentage for this tier.
    pub threshold: Decimal,
    /// Payout multiplier.
    pub multiplier: Decimal,
}

/// A commission plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionPlan {
    /// The canonical identifier.
    pub plan_id: i64,
    /// Display name.
    pub name: String,
    /// On-target variable pay as a percentage of annual fixed pay.
    pub target_variable_percent: Decimal,
    /// Kind of plan.
    pub plan_type: PlanType,
    /// Tiers in ascending threshold order.
    pub accelerator_tiers: Vec<AcceleratorTier>,
    /// Criteria an employee must satisfy to participate.
    #[serde(default)]
    pub eligibility: Vec<EligibilityCriterion>,
}

/// Result of a payout calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutResult {
    /// `achieved / target × 100`, rounded to 2 dp.
    pub achievement_percent: Decimal,
    /// The tier that applied, or `None` below every threshold.
    pub applied_tier: Option<AcceleratorTier>,
    /// The multiplier used.
    pub multiplier: Decimal,
    /// `target × multiplier`, rounded to 2 dp.
    pub payout_amount: Decimal,
}

/// An immutable record of one employee's result for one plan period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionAchievement {
    /// The canonical identifier. `None` until persisted.
    pub achievement_id: Option<i64>,
    /// The employee.
    pub employee_id: i64,
    /// The plan.
    pub plan_id: i64,
    /// The period, e.g. `2025-Q1`.
    pub period: String,
    /// On-target amount for the period.
    pub target_amount: Decimal,
    /// Amount achieved.
    pub achieved_amount: Decimal,
    /// Achievement percentage.
    pub achievement_percent: Decimal,
    /// Multiplier applied.
    pub multiplier: Decimal,
    /// Payout.
    pub payout_amount: Decimal,
}

impl CommissionAchievement {
    /// Builds an achievement record from a computed payout.
    #[must_use]
    pub fn from_payout(
        employee_id: i64,
        plan_id: i64,
        period: &str,
        target_amount: Decimal,
        achieved_amount: Decimal,
        payout: &PayoutResult,
    ) -> Self {
        Self {
            achievement_id: None,
            employee_id,
            plan_id,
            period: period.to_string(),
            target_amount,
            achieved_amount,
            achievement_percent: payout.achievement_percent,
            multiplier: payout.multiplier,
            payout_amount: payout.payout_amount,
        }
    }
}

/// Validates a plan's accelerator tiers.
///
/// # Errors
///
/// Returns `DomainError::InvalidAcceleratorTiers` if:
/// - A threshold or multiplier is negative
/// - Thresholds are not strictly increasing
pub fn validate_accelerator_tiers(tiers: &[AcceleratorTier]) -> Result<(), DomainError> {
    for tier in tiers {
        if tier.threshold.is_sign_negative() {
            return Err(DomainError::InvalidAcceleratorTiers {
                reason: format!("threshold {} must not be negative", tier.threshold),
            });
        }
        if tier.multiplier.is_sign_negative() {
            return Err(DomainError::InvalidAcceleratorTiers {
                reason: format!("multiplier {} must not be negative", tier.multiplier),
            });
        }
    }

    for pair in tiers.windows(2) {
        if pair[1].threshold <= pair[0].threshold {
            return Err(DomainError::InvalidAcceleratorTiers {
                reason: format!(
                    "thresholds must be strictly increasing, got {} after {}",
                    pair[1].threshold, pair[0].threshold
                ),
            });
        }
    }

    Ok(())
}

/// Calculates a payout from achieved and target amounts.
///
/// The tier with the highest threshold not above the achievement percentage
/// applies; among duplicate thresholds the higher multiplier wins. Below every
/// tier the policy's baseline multiplier applies.
///
/// # Errors
///
/// Returns an error if:
/// - `target_amount` is zero or negative
/// - `achieved_amount` is negative
/// - The achievement percentage or payout overflows
pub fn calculate_payout(
    plan: &CommissionPlan,
    achieved_amount: Decimal,
    target_amount: Decimal,
    policy: &AcceleratorPolicy,
) -> Result<PayoutResult, DomainError> {
    if target_amount <= Decimal::ZERO {
        return Err(DomainError::InvalidTarget { target_amount });
    }
    if achieved_amount < Decimal::ZERO {
        return Err(DomainError::InvalidAchievedAmount { achieved_amount });
    }

    let achievement_percent: Decimal = round2(checked_percent_of(
        achieved_amount,
        target_amount,
        "achievement percent",
    )?);

    let applied_tier: Option<AcceleratorTier> = plan
        .accelerator_tiers
        .iter()
        .filter(|t| t.threshold <= achievement_percent)
        .fold(None, |best: Option<AcceleratorTier>, tier| match best {
            Some(b)
                if b.threshold > tier.threshold
                    || (b.threshold == tier.threshold && b.multiplier >= tier.multiplier) =>
            {
                Some(b)
            }
            _ => Some(*tier),
        });

    let multiplier: Decimal =
        applied_tier.map_or(policy.baseline_multiplier, |tier| tier.multiplier);

    debug!(
        plan_id = plan.plan_id,
        %achievement_percent,
        %multiplier,
        "Selected accelerator tier"
    );

    Ok(PayoutResult {
        achievement_percent,
        applied_tier,
        multiplier,
        payout_amount: round2(checked_mul(target_amount, multiplier, "payout amount")?),
    })
}

/// Validates a period string and returns the number of such periods per year.
///
/// Accepts `YYYY` (1), `YYYY-Qn` with n in 1..=4 (4) and `YYYY-MM` (12).
///
/// # Errors
///
/// Returns `DomainError::InvalidPeriod` for any other shape.
pub fn validate_period(period: &str) -> Result<u32, DomainError> {
    let invalid = || DomainError::InvalidPeriod {
        period: period.to_string(),
    };

    let (year, rest): (&str, Option<&str>) = match period.split_once('-') {
        Some((year, rest)) => (year, Some(rest)),
        None => (period, None),
    };
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    match rest {
        None => Ok(1),
        Some(quarter) if quarter.starts_with('Q') => match &quarter[1..] {
            "1" | "2" | "3" | "4" => Ok(4),
            _ => Err(invalid()),
        },
        Some(month) => {
            if month.len() != 2 || !month.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            match month.parse::<u8>() {
                Ok(1..=12) => Ok(12),
                _ => Err(invalid()),
            }
        }
    }
}

/// Returns the on-target variable amount for one period.
///
/// `annual_fixed × target_variable_percent / 100 / periods_per_year`, rounded
/// to 2 dp.
///
/// # Errors
///
/// Returns `DomainError::InvalidPeriod` if the period is malformed, or
/// `DomainError::ArithmeticOverflow` if the annual target overflows.
pub fn target_amount_for_period(
    annual_fixed: Decimal,
    plan: &CommissionPlan,
    period: &str,
) -> Result<Decimal, DomainError> {
    let periods_per_year: u32 = validate_period(period)?;
    let annual_target: Decimal = checked_mul(
        annual_fixed,
        plan.target_variable_percent,
        "period target amount",
    )?;
    Ok(round2(
        annual_target / Decimal::ONE_HUNDRED / Decimal::from(periods_per_year),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(threshold: &str, multiplier: &str) -> AcceleratorTier {
        AcceleratorTier {
            threshold: dec(threshold),
            multiplier: dec(multiplier),
        }
    }

    fn plan(tiers: Vec<AcceleratorTier>) -> CommissionPlan {
        CommissionPlan {
            plan_id: 1,
            name: String::from("Field Sales"),
            target_variable_percent: dec("20"),
            plan_type: PlanType::Sales,
            accelerator_tiers: tiers,
            eligibility: Vec::new(),
        }
    }

    fn standard_plan() -> CommissionPlan {
        plan(vec![tier("80", "0.8"), tier("100", "1.0"), tier("120", "1.3")])
    }

    #[test]
    fn test_95_percent_uses_80_tier() {
        let result: PayoutResult = calculate_payout(
            &standard_plan(),
            dec("95000"),
            dec("100000"),
            &AcceleratorPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.achievement_percent, dec("95"));
        assert_eq!(result.multiplier, dec("0.8"));
        assert_eq!(result.payout_amount, dec("80000"));
        assert_eq!(result.applied_tier, Some(tier("80", "0.8")));
    }

    #[test]
    fn test_150_percent_uses_top_tier() {
        let result: PayoutResult = calculate_payout(
            &standard_plan(),
            dec("150000"),
            dec("100000"),
            &AcceleratorPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.multiplier, dec("1.3"));
        assert_eq!(result.payout_amount, dec("130000"));
    }

    #[test]
    fn test_below_every_tier_uses_baseline() {
        let result: PayoutResult = calculate_payout(
            &standard_plan(),
            dec("50"),
            dec("100"),
            &AcceleratorPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.applied_tier, None);
        assert_eq!(result.multiplier, Decimal::ONE);
        assert_eq!(result.payout_amount, dec("100"));
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let result: PayoutResult = calculate_payout(
            &standard_plan(),
            dec("120"),
            dec("100"),
            &AcceleratorPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.multiplier, dec("1.3"));
    }

    #[test]
    fn test_duplicate_thresholds_higher_multiplier_wins() {
        let p: CommissionPlan = plan(vec![tier("100", "1.1"), tier("100", "1.4"), tier("100", "1.2")]);
        let result: PayoutResult =
            calculate_payout(&p, dec("100"), dec("100"), &AcceleratorPolicy::default()).unwrap();
        assert_eq!(result.multiplier, dec("1.4"));
    }

    #[test]
    fn test_achievement_percent_rounds_to_two_places() {
        let result: PayoutResult = calculate_payout(
            &standard_plan(),
            dec("1"),
            dec("3"),
            &AcceleratorPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.achievement_percent, dec("33.33"));
    }

    #[test]
    fn test_invalid_target_rejected() {
        let policy: AcceleratorPolicy = AcceleratorPolicy::default();
        assert!(matches!(
            calculate_payout(&standard_plan(), dec("10"), Decimal::ZERO, &policy),
            Err(DomainError::InvalidTarget { .. })
        ));
        assert!(matches!(
            calculate_payout(&standard_plan(), dec("10"), dec("-5"), &policy),
            Err(DomainError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_negative_achieved_rejected() {
        assert!(matches!(
            calculate_payout(
                &standard_plan(),
                dec("-1"),
                dec("100"),
                &AcceleratorPolicy::default()
            ),
            Err(DomainError::InvalidAchievedAmount { .. })
        ));
    }

    #[test]
    fn test_achievement_percent_overflow_is_an_error() {
        let result = calculate_payout(
            &standard_plan(),
            dec("70000000000000000000000000000"),
            dec("0.01"),
            &AcceleratorPolicy::default(),
        );
        assert!(matches!(result, Err(DomainError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn test_payout_amount_overflow_is_an_error() {
        // At 100% the 1.0 tier keeps the payout in range; a 1.3 tier does not.
        let target: Decimal = dec("70000000000000000000000000000");
        let ok: PayoutResult =
            calculate_payout(&standard_plan(), target, target, &AcceleratorPolicy::default())
                .unwrap();
        assert_eq!(ok.payout_amount, target);

        let boosted: CommissionPlan = plan(vec![tier("100", "1.3")]);
        let result = calculate_payout(&boosted, target, target, &AcceleratorPolicy::default());
        assert!(matches!(
            result,
            Err(DomainError::ArithmeticOverflow { ref operation }) if operation == "payout amount"
        ));
    }

    #[test]
    fn test_target_amount_overflow_is_an_error() {
        let result = target_amount_for_period(
            dec("70000000000000000000000000000"),
            &standard_plan(),
            "2025",
        );
        assert!(matches!(result, Err(DomainError::ArithmeticOverflow { .. })));
    }

    #[test]
    fn test_validate_tiers() {
        assert!(validate_accelerator_tiers(&standard_plan().accelerator_tiers).is_ok());
        assert!(validate_accelerator_tiers(&[]).is_ok());
        assert!(matches!(
            validate_accelerator_tiers(&[tier("100", "1"), tier("100", "1.2")]),
            Err(DomainError::InvalidAcceleratorTiers { .. })
        ));
        assert!(matches!(
            validate_accelerator_tiers(&[tier("120", "1"), tier("100", "1.2")]),
            Err(DomainError::InvalidAcceleratorTiers { .. })
        ));
        assert!(matches!(
            validate_accelerator_tiers(&[tier("100", "-1")]),
            Err(DomainError::InvalidAcceleratorTiers { .. })
        ));
    }

    #[test]
    fn test_validate_period() {
        assert_eq!(validate_period("2025").unwrap(), 1);
        assert_eq!(validate_period("2025-Q1").unwrap(), 4);
        assert_eq!(validate_period("2025-Q4").unwrap(), 4);
        assert_eq!(validate_period("2025-07").unwrap(), 12);
        for bad in ["25", "2025-Q5", "2025-Q", "2025-13", "2025-00", "2025-7", "abcd", ""] {
            assert!(
                matches!(validate_period(bad), Err(DomainError::InvalidPeriod { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_target_amount_for_period() {
        let p: CommissionPlan = standard_plan();
        assert_eq!(
            target_amount_for_period(dec("1200000"), &p, "2025-Q2").unwrap(),
            dec("60000")
        );
        assert_eq!(
            target_amount_for_period(dec("1200000"), &p, "2025-03").unwrap(),
            dec("20000")
        );
        assert_eq!(
            target_amount_for_period(dec("1000"), &p, "2025-03").unwrap(),
            dec("16.67")
        );
    }
}
