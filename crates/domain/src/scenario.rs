// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! What-if scenario definitions.
//!
//! A scenario is an ordered list of filter/action rules. Running it is the job
//! of the simulation engine; this module only defines the rules, validates
//! them and decides whether a filter matches an employee.

use crate::error::DomainError;
use crate::types::{BandCode, Employee};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle of a scenario.
///
/// `Draft` may be run any number of times. `Applied` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioStatus {
    /// Editable and runnable.
    #[default]
    Draft,
    /// Committed to employee records.
    Applied,
}

impl ScenarioStatus {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Applied => "APPLIED",
        }
    }

    /// Returns whether the scenario may still be run or applied.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns whether a transition to `target` is allowed.
    ///
    /// The only transition is `Draft` to `Applied`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Draft, Self::Applied))
    }
}

impl FromStr for ScenarioStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "APPLIED" => Ok(Self::Applied),
            _ => Err(DomainError::InvalidEnumValue {
                kind: "scenario status",
                value: s.to_string(),
            }),
        }
    }
}

/// An inclusive range with optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RangeFilter {
    /// Lower bound, inclusive.
    #[serde(default)]
    pub min: Option<Decimal>,
    /// Upper bound, inclusive.
    #[serde(default)]
    pub max: Option<Decimal>,
}

impl RangeFilter {
    /// Returns whether `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

/// The filter half of a rule. Present predicates are ANDed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuleFilter {
    /// Band code equality.
    #[serde(default)]
    pub band: Option<BandCode>,
    /// Department equality, case-insensitive.
    #[serde(default)]
    pub department: Option<String>,
    /// Current compa-ratio range.
    #[serde(default)]
    pub compa_ratio: Option<RangeFilter>,
    /// Performance rating range.
    #[serde(default)]
    pub performance_rating: Option<RangeFilter>,
}

impl RuleFilter {
    /// Returns whether evaluating this filter needs the employee's band.
    #[must_use]
    pub const fn needs_band(&self) -> bool {
        self.compa_ratio.is_some()
    }

    /// Returns whether the band, department and rating predicates match.
    ///
    /// The compa-ratio predicate is not consulted, so this can be evaluated
    /// for an employee whose band does not resolve.
    #[must_use]
    pub fn matches_without_compa(&self, employee: &Employee) -> bool {
        if let Some(band) = &self.band
            && band != &employee.band
        {
            return false;
        }

        if let Some(department) = &self.department
            && !department.trim().eq_ignore_ascii_case(employee.department.trim())
        {
            return false;
        }

        if let Some(range) = &self.performance_rating {
            match employee.performance_rating {
                Some(rating) if range.contains(rating) => {}
                _ => return false,
            }
        }

        true
    }

    /// Returns whether the filter matches an employee.
    ///
    /// `current_compa` is the employee's compa-ratio against the effective
    /// band, or `None` when no band resolves. A compa-ratio predicate never
    /// matches without one, and a rating predicate never matches an employee
    /// without a rating.
    #[must_use]
    pub fn matches(&self, employee: &Employee, current_compa: Option<u32>) -> bool {
        if !self.matches_without_compa(employee) {
            return false;
        }

        match (&self.compa_ratio, current_compa) {
            (None, _) => true,
            (Some(range), Some(compa)) => range.contains(Decimal::from(compa)),
            (Some(_), None) => false,
        }
    }
}

/// The action half of a rule.
///
/// Serialized as `{"type": "RAISE_PERCENT", "value": "10"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    /// `current × (1 + v / 100)`.
    RaisePercent(Decimal),
    /// `current + v`.
    RaiseFlat(Decimal),
    /// The band midpoint.
    SetToBenchmark,
    /// `mid × v / 100`.
    SetCompaRatio(Decimal),
}

impl RuleAction {
    /// Returns whether applying this action needs the employee's band.
    #[must_use]
    pub const fn needs_band(&self) -> bool {
        matches!(self, Self::SetToBenchmark | Self::SetCompaRatio(_))
    }
}

/// A filter/action pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRule {
    /// Which employees the rule applies to.
    #[serde(default)]
    pub filter: RuleFilter,
    /// What happens to their pay.
    pub action: RuleAction,
}

impl ScenarioRule {
    /// Returns whether evaluating this rule needs the employee's band.
    #[must_use]
    pub const fn needs_band(&self) -> bool {
        self.filter.needs_band() || self.action.needs_band()
    }
}

/// A compensation what-if scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// The canonical identifier.
    pub scenario_id: i64,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Rules in evaluation order. The last matching rule wins.
    pub rules: Vec<ScenarioRule>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ScenarioStatus,
    /// When the scenario was applied (ISO 8601), if it has been.
    #[serde(default)]
    pub applied_at: Option<String>,
}

/// Validates a scenario's rules.
///
/// # Errors
///
/// Returns `DomainError::InvalidScenario` if:
/// - The name is empty
/// - There are no rules
/// - A `RAISE_PERCENT` value is -100 or lower
/// - A `SET_COMPA_RATIO` value is zero or negative
/// - A filter range has `min > max`
pub fn validate_scenario(name: &str, rules: &[ScenarioRule]) -> Result<(), DomainError> {
    let invalid = |reason: String| DomainError::InvalidScenario { reason };

    if name.trim().is_empty() {
        return Err(invalid(String::from("name must not be empty")));
    }
    if rules.is_empty() {
        return Err(invalid(String::from("at least one rule is required")));
    }

    for (idx, rule) in rules.iter().enumerate() {
        match rule.action {
            RuleAction::RaisePercent(v) if v <= -Decimal::ONE_HUNDRED => {
                return Err(invalid(format!(
                    "rule {idx}: RAISE_PERCENT must be greater than -100, got {v}"
                )));
            }
            RuleAction::SetCompaRatio(v) if v <= Decimal::ZERO => {
                return Err(invalid(format!(
                    "rule {idx}: SET_COMPA_RATIO must be greater than 0, got {v}"
                )));
            }
            _ => {}
        }

        for (label, range) in [
            ("compa_ratio", rule.filter.compa_ratio),
            ("performance_rating", rule.filter.performance_rating),
        ] {
            if range.is_some_and(|r| r.is_inverted()) {
                return Err(invalid(format!("rule {idx}: {label} range has min > max")));
            }
        }

        if let Some(department) = &rule.filter.department
            && department.trim().is_empty()
        {
            return Err(invalid(format!("rule {idx}: department filter is empty")));
        }
    }

    Ok(())
}
