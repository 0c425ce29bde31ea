// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate pay-equity scoring.
//!
//! The composite score is a weighted average of three sub-scores:
//!
//! - gender: how close the average pay of the binary gender groups is
//! - compa: share of resolved employees inside the compa-ratio policy window
//! - outlier: penalty for employees paid outside their band's min/max
//!
//! A sub-score that cannot be computed is `None` and its weight is
//! redistributed over the others.

use crate::arithmetic::{checked_mul, checked_sum};
use crate::compa_ratio::{PopulationResolution, UnresolvedEmployee, resolve_population};
use crate::error::DomainError;
use crate::policy::{EnginePolicy, EquityWeights};
use crate::rounding::{clamp_score, round2};
use crate::types::{Employee, Gender, SalaryBand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::debug;

/// Sub-scores of the equity score. `None` means not applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EquityComponents {
    /// Gender-gap score.
    pub gender_score: Option<Decimal>,
    /// Compa-ratio distribution score.
    pub compa_score: Option<Decimal>,
    /// Outlier score.
    pub outlier_score: Option<Decimal>,
}

/// The pay-equity score of a population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityScore {
    /// Composite score in `[0, 100]`, or `None` when nothing is applicable.
    pub score: Option<Decimal>,
    /// Sub-scores.
    pub components: EquityComponents,
    /// Employees in the input.
    pub employees_considered: usize,
    /// Employees without an effective band.
    pub unresolved: Vec<UnresolvedEmployee>,
    /// Signed gap between the higher and lower paid gender group, in percent.
    pub gender_gap_percent: Option<Decimal>,
    /// Resolved employees with pay inside band min/max.
    pub band_in_range_count: usize,
    /// Resolved employees inside the compa-ratio policy window.
    pub policy_in_range_count: usize,
    /// Resolved employees outside band min/max.
    pub outlier_count: usize,
}

fn average(values: &[Decimal]) -> Result<Option<Decimal>, DomainError> {
    if values.is_empty() {
        return Ok(None);
    }
    let sum: Decimal = checked_sum(values.iter().copied(), "average pay")?;
    Ok(Some(sum / Decimal::from(values.len())))
}

/// Computes the gap between male and female average pay.
///
/// The higher-paid group is the reference, so the result is never negative.
/// Returns `None` when either group is empty.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if a group's total pay overflows.
pub fn gender_gap_percent(employees: &[Employee]) -> Result<Option<Decimal>, DomainError> {
    let pay_of = |gender: Gender| -> Vec<Decimal> {
        employees
            .iter()
            .filter(|e| e.gender == gender)
            .map(|e| e.annual_fixed)
            .collect()
    };

    let (Some(male), Some(female)): (Option<Decimal>, Option<Decimal>) =
        (average(&pay_of(Gender::Male))?, average(&pay_of(Gender::Female))?)
    else {
        return Ok(None);
    };
    let (higher, lower): (Decimal, Decimal) = if male >= female {
        (male, female)
    } else {
        (female, male)
    };

    if higher.is_zero() {
        return Ok(Some(Decimal::ZERO));
    }
    Ok(Some((higher - lower) / higher * Decimal::ONE_HUNDRED))
}

fn weighted_composite(components: &EquityComponents, weights: &EquityWeights) -> Option<Decimal> {
    let applicable: Vec<(Decimal, Decimal)> = [
        (components.gender_score, weights.gender),
        (components.compa_score, weights.compa),
        (components.outlier_score, weights.outlier),
    ]
    .into_iter()
    .filter_map(|(score, weight)| score.map(|s| (s, weight)))
    .collect();

    let weight_sum: Decimal = applicable.iter().map(|(_, w)| *w).sum();
    if applicable.is_empty() || weight_sum.is_zero() {
        return None;
    }

    let weighted: Decimal = applicable.iter().map(|(s, w)| *s * *w).sum();
    Some(round2(weighted / weight_sum))
}

/// Computes the pay-equity score of a population.
///
/// # Arguments
///
/// * `employees` - The population
/// * `bands` - All salary band rows
/// * `on` - Date used to select effective bands
/// * `policy` - Engine policy (compa window and equity constants)
///
/// # Returns
///
/// The score with its components and counts. An empty population yields a
/// `None` score.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if pay totals or weighted
/// penalties leave the representable range.
pub fn compute_equity_score(
    employees: &[Employee],
    bands: &[SalaryBand],
    on: Date,
    policy: &EnginePolicy,
) -> Result<EquityScore, DomainError> {
    let resolution: PopulationResolution =
        resolve_population(employees, bands, on, &policy.compa)?;
    let resolved_count: usize = resolution.resolved.len();

    let band_in_range_count: usize = resolution
        .resolved
        .iter()
        .filter(|r| !r.status.is_outlier())
        .count();
    let policy_in_range_count: usize = resolution
        .resolved
        .iter()
        .filter(|r| r.within_policy_range)
        .count();
    let outlier_count: usize = resolved_count - band_in_range_count;

    let gap: Option<Decimal> = gender_gap_percent(employees)?;
    let gender_score: Option<Decimal> = gap
        .map(|g| {
            checked_mul(g.abs(), policy.equity.gender_sensitivity, "gender penalty")
                .map(|penalty| round2(clamp_score(Decimal::ONE_HUNDRED - penalty)))
        })
        .transpose()?;

    let (compa_score, outlier_score): (Option<Decimal>, Option<Decimal>) = if resolved_count == 0 {
        (None, None)
    } else {
        let total: Decimal = Decimal::from(resolved_count);
        let in_window: Decimal =
            Decimal::from(policy_in_range_count) / total * Decimal::ONE_HUNDRED;
        let outlier_percent: Decimal = Decimal::from(outlier_count) / total * Decimal::ONE_HUNDRED;
        let outlier_penalty: Decimal = checked_mul(
            outlier_percent,
            policy.equity.outlier_weight,
            "outlier penalty",
        )?;
        (
            Some(round2(in_window)),
            Some(round2(clamp_score(Decimal::ONE_HUNDRED - outlier_penalty))),
        )
    };

    let components: EquityComponents = EquityComponents {
        gender_score,
        compa_score,
        outlier_score,
    };
    let score: Option<Decimal> = weighted_composite(&components, &policy.equity.weights);

    debug!(
        employees = employees.len(),
        resolved = resolved_count,
        outliers = outlier_count,
        ?score,
        "Computed equity score"
    );

    Ok(EquityScore {
        score,
        components,
        employees_considered: employees.len(),
        unresolved: resolution.unresolved,
        gender_gap_percent: gap.map(round2),
        band_in_range_count,
        policy_in_range_count,
        outlier_count,
    })
}
