// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod accelerator;
mod arithmetic;
mod calendar;
mod compa_ratio;
mod eligibility;
mod equity;
mod error;
mod policy;
mod rounding;
mod scenario;
mod types;
mod validation;
mod vesting;

#[cfg(test)]
mod tests;

pub use accelerator::{
    AcceleratorTier, CommissionAchievement, CommissionPlan, PayoutResult, PlanType,
    calculate_payout, target_amount_for_period, validate_accelerator_tiers, validate_period,
};
pub use arithmetic::{
    checked_add, checked_div, checked_mul, checked_percent_of, checked_sub, checked_sum,
};
pub use calendar::{add_days, add_months, complete_months_between, parse_date};
pub use compa_ratio::{
    BandStatus, CompaRatioResult, PopulationResolution, UnresolvedEmployee, band_status_for,
    compa_ratio_for, resolve_compa_ratio, resolve_population, select_effective_band,
};
pub use eligibility::{
    EligibilityCriterion, EligibilityDecision, evaluate_eligibility, require_eligibility,
};
pub use equity::{EquityComponents, EquityScore, compute_equity_score, gender_gap_percent};
pub use error::DomainError;
pub use policy::{
    AcceleratorPolicy, CompaPolicy, EnginePolicy, EquityPolicy, EquityWeights, SimulationPolicy,
    VestingPolicy,
};
pub use rounding::{clamp_score, round0, round2, whole_percent};
pub use scenario::{
    RangeFilter, RuleAction, RuleFilter, Scenario, ScenarioRule, ScenarioStatus,
    validate_scenario,
};
pub use types::{BandCode, Employee, EmploymentType, Gender, SalaryBand};
pub use validation::{validate_band, validate_employee, validate_grant};
pub use vesting::{
    GrantStatus, RsuGrant, RsuVestingEvent, VestingSummary, generate_vesting_schedule,
    refresh_vesting_status, summarize_vesting, upcoming_vesting_events, vested_units,
};
