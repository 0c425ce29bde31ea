// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use thiserror::Error;
use time::Date;

/// Errors that can occur during domain validation and computation.
///
/// Every variant is a machine-readable failure reason. Callers translate these
/// into user-facing messages; the engine never degrades to approximate output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No salary band with the given code is effective on the computation date.
    #[error("No salary band '{band_code}' is effective on {on}")]
    NoEffectiveBand {
        /// The band code that was looked up.
        band_code: String,
        /// The computation date.
        on: Date,
    },
    /// A salary band violates `0 <= min < mid < max`.
    #[error("Invalid salary band '{band_code}': {reason}")]
    InvalidBandRange {
        /// The band code.
        band_code: String,
        /// Description of the violated constraint.
        reason: String,
    },
    /// A band code is empty or malformed.
    #[error("Invalid band code: {0}")]
    InvalidBandCode(String),
    /// Grant parameters are malformed.
    #[error("Invalid grant: {reason}")]
    InvalidGrant {
        /// Description of the violated constraint.
        reason: String,
    },
    /// The grant is not in a state that allows issuing a schedule.
    #[error("Grant {grant_id} is not active (status {status})")]
    GrantNotActive {
        /// The grant identifier.
        grant_id: i64,
        /// The grant's current status.
        status: String,
    },
    /// Generated vesting events would release more units than the grant holds.
    #[error("Vesting events release {released} units but the grant holds {total_units}")]
    VestingUnitsExceeded {
        /// Units released by the schedule.
        released: i64,
        /// Units in the grant.
        total_units: i64,
    },
    /// The payout target amount is zero or negative.
    #[error("Invalid target amount {target_amount}: must be greater than zero")]
    InvalidTarget {
        /// The rejected target amount.
        target_amount: Decimal,
    },
    /// The achieved amount is negative.
    #[error("Invalid achieved amount {achieved_amount}: must not be negative")]
    InvalidAchievedAmount {
        /// The rejected achieved amount.
        achieved_amount: Decimal,
    },
    /// Accelerator tiers are malformed.
    #[error("Invalid accelerator tiers: {reason}")]
    InvalidAcceleratorTiers {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A commission period string is malformed.
    #[error("Invalid period '{period}': expected YYYY, YYYY-Qn or YYYY-MM")]
    InvalidPeriod {
        /// The rejected period.
        period: String,
    },
    /// An employee does not satisfy a plan's eligibility criteria.
    #[error("Employee {employee_id} is not eligible: failed {failed:?}")]
    NotEligible {
        /// The employee identifier.
        employee_id: i64,
        /// Names of the criteria that failed.
        failed: Vec<String>,
    },
    /// Employee fields are malformed.
    #[error("Invalid employee: {reason}")]
    InvalidEmployee {
        /// Description of the violated constraint.
        reason: String,
    },
    /// The engine policy configuration is inconsistent.
    #[error("Invalid engine policy: {reason}")]
    InvalidPolicy {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A scenario definition is malformed.
    #[error("Invalid scenario: {reason}")]
    InvalidScenario {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A rule action would project a negative salary.
    #[error("Rule {rule_index} projects a negative salary {projected} for employee {employee_id}")]
    NegativeProjection {
        /// The employee identifier.
        employee_id: i64,
        /// Zero-based index of the rule.
        rule_index: usize,
        /// The rejected projection.
        projected: Decimal,
    },
    /// An unknown enum value was supplied.
    #[error("Invalid {kind} value '{value}'")]
    InvalidEnumValue {
        /// The enum being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Decimal arithmetic left the representable range.
    #[error("Amount arithmetic overflow while computing {operation}")]
    ArithmeticOverflow {
        /// Description of the computation that failed.
        operation: String,
    },
    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}
