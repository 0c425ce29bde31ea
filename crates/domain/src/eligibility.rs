// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plan eligibility criteria and their interpreter.

use crate::calendar::complete_months_between;
use crate::error::DomainError;
use crate::types::{Employee, EmploymentType, Gender};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// A single eligibility predicate.
///
/// Serialized as `{"type": "MIN_BAND_LEVEL", "value": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityCriterion {
    /// Band level (trailing digits of the band code) at least this value.
    MinBandLevel(u8),
    /// Complete months since joining at least this value.
    MinTenureMonths(u32),
    /// Performance rating present and at least this value.
    MinPerformanceRating(Decimal),
    /// Gender is one of these.
    Genders(Vec<Gender>),
    /// Employment type is one of these.
    EmploymentTypes(Vec<EmploymentType>),
}

impl EligibilityCriterion {
    /// Returns the wire name of the criterion kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MinBandLevel(_) => "MIN_BAND_LEVEL",
            Self::MinTenureMonths(_) => "MIN_TENURE_MONTHS",
            Self::MinPerformanceRating(_) => "MIN_PERFORMANCE_RATING",
            Self::Genders(_) => "GENDERS",
            Self::EmploymentTypes(_) => "EMPLOYMENT_TYPES",
        }
    }

    /// Evaluates the predicate for one employee on a given date.
    #[must_use]
    pub fn is_satisfied_by(&self, employee: &Employee, on: Date) -> bool {
        match self {
            Self::MinBandLevel(min) => employee.band.level().is_some_and(|level| level >= *min),
            Self::MinTenureMonths(min) => {
                complete_months_between(employee.date_of_joining, on) >= *min
            }
            Self::MinPerformanceRating(min) => {
                employee.performance_rating.is_some_and(|rating| rating >= *min)
            }
            Self::Genders(genders) => genders.contains(&employee.gender),
            Self::EmploymentTypes(types) => types.contains(&employee.employment_type),
        }
    }
}

/// The outcome of evaluating a list of criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    /// True when every criterion passed.
    pub eligible: bool,
    /// Kinds of the criteria that failed, in list order.
    pub failed: Vec<String>,
}

/// Evaluates all criteria against an employee. An empty list admits everyone.
#[must_use]
pub fn evaluate_eligibility(
    criteria: &[EligibilityCriterion],
    employee: &Employee,
    on: Date,
) -> EligibilityDecision {
    let failed: Vec<String> = criteria
        .iter()
        .filter(|c| !c.is_satisfied_by(employee, on))
        .map(|c| c.kind().to_string())
        .collect();

    EligibilityDecision {
        eligible: failed.is_empty(),
        failed,
    }
}

/// Like [`evaluate_eligibility`], but fails when the employee is not eligible.
///
/// # Errors
///
/// Returns `DomainError::NotEligible` listing the failed criteria.
pub fn require_eligibility(
    criteria: &[EligibilityCriterion],
    employee: &Employee,
    on: Date,
) -> Result<(), DomainError> {
    let decision: EligibilityDecision = evaluate_eligibility(criteria, employee, on);
    if decision.eligible {
        Ok(())
    } else {
        Err(DomainError::NotEligible {
            employee_id: employee.employee_id,
            failed: decision.failed,
        })
    }
}
