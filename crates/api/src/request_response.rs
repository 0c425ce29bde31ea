// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use comp_engine::ScenarioRunResult;
use comp_engine_audit::AuditEvent;
use comp_engine_domain::{
    AcceleratorTier, BandCode, CommissionAchievement, EligibilityCriterion,
    Employee, EmploymentType, Gender, PayoutResult, PlanType, RsuGrant, RsuVestingEvent, Scenario,
    ScenarioRule,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::notifications::Notification;

/// The result of an API operation that informs the notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// Notifications produced by this operation.
    pub notifications: Vec<Notification>,
}

/// API request to add an employee to the population.
///
/// The identifier is supplied by the caller (the HR system of record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// The employee identifier.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Band code, e.g. `P2`.
    pub band: String,
    /// Annual fixed pay.
    pub annual_fixed: Decimal,
    /// Gender.
    pub gender: Gender,
    /// Date of joining.
    pub date_of_joining: Date,
    /// Department.
    pub department: String,
    /// Employment type. Defaults to `FULL_TIME`.
    #[serde(default)]
    pub employment_type: EmploymentType,
    /// Performance rating on the 1.0 to 5.0 scale.
    #[serde(default)]
    pub performance_rating: Option<Decimal>,
}

impl CreateEmployeeRequest {
    /// Builds the domain employee this request describes.
    #[must_use]
    pub fn to_employee(&self) -> Employee {
        Employee {
            employee_id: self.employee_id,
            name: self.name.trim().to_string(),
            band: BandCode::new(&self.band),
            annual_fixed: self.annual_fixed,
            gender: self.gender,
            date_of_joining: self.date_of_joining,
            department: self.department.trim().to_string(),
            employment_type: self.employment_type,
            performance_rating: self.performance_rating,
            compa_ratio: None,
        }
    }
}

/// API request to add a salary band row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBandRequest {
    /// Band code.
    pub band_code: String,
    /// Range minimum.
    pub min_salary: Decimal,
    /// Range midpoint.
    pub mid_salary: Decimal,
    /// Range maximum.
    pub max_salary: Decimal,
    /// First date on which the row applies.
    pub effective_date: Date,
    /// Optional job area.
    #[serde(default)]
    pub job_area_id: Option<i64>,
}

/// API request to create an RSU grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGrantRequest {
    /// The grantee.
    pub employee_id: i64,
    /// Date the grant was made.
    pub grant_date: Date,
    /// Units granted.
    pub total_units: i64,
    /// Months from grant date to the cliff.
    pub cliff_months: u32,
    /// Months from grant date to the end of vesting.
    pub vesting_schedule_months: u32,
    /// Share price on the grant date.
    pub price_at_grant: Decimal,
    /// Latest known share price. Defaults to `price_at_grant`.
    #[serde(default)]
    pub current_price: Option<Decimal>,
}

/// API response for a created grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGrantResponse {
    /// The stored grant.
    pub grant: RsuGrant,
    /// Its vesting schedule.
    pub events: Vec<RsuVestingEvent>,
    /// A success message.
    pub message: String,
}

/// API request to create a commission plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    /// Display name.
    pub name: String,
    /// Variable pay as a percentage of annual fixed pay.
    pub target_variable_percent: Decimal,
    /// Plan type.
    pub plan_type: PlanType,
    /// Accelerator tiers, ascending by threshold.
    pub accelerator_tiers: Vec<AcceleratorTier>,
    /// Eligibility criteria, all of which must hold.
    #[serde(default)]
    pub eligibility: Vec<EligibilityCriterion>,
}

/// API request to preview a payout under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRequest {
    /// Amount achieved.
    pub achieved_amount: Decimal,
    /// Target amount.
    pub target_amount: Decimal,
}

/// API request to record a commission achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAchievementRequest {
    /// The employee.
    pub employee_id: i64,
    /// The plan.
    pub plan_id: i64,
    /// The period, e.g. `2025-Q1`.
    pub period: String,
    /// Amount achieved in the period.
    pub achieved_amount: Decimal,
    /// Explicit target. When absent it is derived from the plan and pay.
    #[serde(default)]
    pub target_amount: Option<Decimal>,
    /// Date eligibility is evaluated on. Defaults to today.
    #[serde(default)]
    pub on: Option<Date>,
}

/// API response for a recorded achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementResponse {
    /// The stored achievement.
    pub achievement: CommissionAchievement,
    /// The payout calculation.
    pub payout: PayoutResult,
    /// A success message.
    pub message: String,
}

/// API request to create a `DRAFT` scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScenarioRequest {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered rules.
    pub rules: Vec<ScenarioRule>,
}

/// API response for an applied scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyScenarioResponse {
    /// The scenario in its `APPLIED` state.
    pub scenario: Scenario,
    /// The run the committed changes came from.
    pub run: ScenarioRunResult,
    /// The persisted audit event.
    pub audit_event: AuditEvent,
    /// A success message.
    pub message: String,
}
