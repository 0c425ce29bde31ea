// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::simulation::{ScenarioRunResult, run_scenario};
use crate::state::{
    AchievementRecord, CompensationSnapshot, EmployeePayUpdate, ScenarioApplication,
    VestingIssuance,
};
use comp_engine_audit::{Action, Actor, AuditEvent, AuditSubject, Cause, StateSnapshot};
use comp_engine_domain::{
    CommissionAchievement, CommissionPlan, DomainError, Employee, EnginePolicy, GrantStatus,
    PayoutResult, RsuGrant, RsuVestingEvent, Scenario, ScenarioStatus, calculate_payout,
    generate_vesting_schedule, require_eligibility, target_amount_for_period, validate_period,
};
use rust_decimal::Decimal;
use time::Date;
use tracing::info;

/// Applies a scenario, producing the employee updates and audit event.
///
/// The projection is recomputed from the snapshot; a previous run is never
/// reused. Nothing is written here: the caller commits the whole
/// `ScenarioApplication` atomically or not at all.
///
/// # Arguments
///
/// * `scenario` - The scenario to apply; must be `DRAFT`
/// * `snapshot` - The population and bands
/// * `policy` - The engine policy
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(ScenarioApplication)` with the scenario in its `APPLIED` state
/// * `Err(CoreError)` if the scenario cannot be applied
///
/// # Errors
///
/// Returns an error if:
/// - The scenario is already `APPLIED`
/// - The rules are invalid or project a negative salary
pub fn apply_scenario(
    scenario: &Scenario,
    snapshot: &CompensationSnapshot,
    policy: &EnginePolicy,
    actor: Actor,
    cause: Cause,
) -> Result<ScenarioApplication, CoreError> {
    if !scenario.status.can_transition_to(ScenarioStatus::Applied) {
        return Err(CoreError::ScenarioAlreadyApplied {
            scenario_id: scenario.scenario_id,
        });
    }

    let run: ScenarioRunResult = run_scenario(scenario, snapshot, &policy.simulation)?;

    let updates: Vec<EmployeePayUpdate> = run
        .projections
        .iter()
        .map(|p| EmployeePayUpdate {
            employee_id: p.employee_id,
            previous_annual_fixed: p.current,
            annual_fixed: p.projected,
            compa_ratio: p.projected_compa,
        })
        .collect();

    let mut applied: Scenario = scenario.clone();
    applied.status = ScenarioStatus::Applied;

    let before: StateSnapshot = StateSnapshot::new(format!(
        "status={},affected={},cost={}",
        scenario.status.as_str(),
        run.affected_count,
        run.current_cost
    ));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "status={},affected={},cost={}",
        applied.status.as_str(),
        run.affected_count,
        run.projected_cost
    ));
    let action: Action = Action::new(
        String::from("ApplyScenario"),
        Some(format!(
            "Applied scenario '{}' to {} employees (delta {})",
            scenario.name, run.affected_count, run.delta
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        AuditSubject::Scenario(scenario.scenario_id),
        actor,
        cause,
        action,
        before,
        after,
    );

    info!(
        scenario_id = scenario.scenario_id,
        affected = run.affected_count,
        delta = %run.delta,
        "Prepared scenario application"
    );

    Ok(ScenarioApplication {
        scenario: applied,
        updates,
        run,
        audit_event,
    })
}

/// Generates the vesting schedule for a newly created grant.
///
/// # Arguments
///
/// * `grant` - The grant; must not be `CANCELLED`
/// * `as_of` - Reference date for the vested flags
/// * `policy` - The engine policy
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The grant is cancelled
/// - The grant parameters are invalid
pub fn issue_vesting_schedule(
    grant: &RsuGrant,
    as_of: Date,
    policy: &EnginePolicy,
    actor: Actor,
    cause: Cause,
) -> Result<VestingIssuance, CoreError> {
    if grant.status == GrantStatus::Cancelled {
        return Err(CoreError::DomainViolation(DomainError::GrantNotActive {
            grant_id: grant.grant_id,
            status: grant.status.as_str().to_string(),
        }));
    }

    let events: Vec<RsuVestingEvent> = generate_vesting_schedule(grant, as_of, &policy.vesting)?;

    let before: StateSnapshot = StateSnapshot::new(format!(
        "grant_id={},events=0",
        grant.grant_id
    ));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "grant_id={},events={},total_units={}",
        grant.grant_id,
        events.len(),
        grant.total_units
    ));
    let action: Action = Action::new(
        String::from("IssueVestingSchedule"),
        Some(format!(
            "Issued {} vesting events for {} units to employee {}",
            events.len(),
            grant.total_units,
            grant.employee_id
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        AuditSubject::Grant(grant.grant_id),
        actor,
        cause,
        action,
        before,
        after,
    );

    Ok(VestingIssuance {
        events,
        audit_event,
    })
}

/// Inputs for recording a commission achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementInput<'a> {
    /// The plan.
    pub plan: &'a CommissionPlan,
    /// The employee.
    pub employee: &'a Employee,
    /// The period, e.g. `2025-Q1`.
    pub period: &'a str,
    /// Amount achieved in the period.
    pub achieved_amount: Decimal,
    /// Explicit target. When absent it is derived from the plan and pay.
    pub target_amount: Option<Decimal>,
    /// Date eligibility is evaluated on.
    pub on: Date,
}

/// Computes a payout and builds the immutable achievement record.
///
/// # Errors
///
/// Returns an error if:
/// - The period is malformed
/// - The employee fails the plan's eligibility criteria
/// - The target is zero or negative, or the achieved amount is negative
pub fn record_commission_achievement(
    input: &AchievementInput<'_>,
    policy: &EnginePolicy,
    actor: Actor,
    cause: Cause,
) -> Result<AchievementRecord, CoreError> {
    validate_period(input.period)?;
    require_eligibility(&input.plan.eligibility, input.employee, input.on)?;

    let target_amount: Decimal = match input.target_amount {
        Some(target) => target,
        None => target_amount_for_period(input.employee.annual_fixed, input.plan, input.period)?,
    };
    let payout: PayoutResult = calculate_payout(
        input.plan,
        input.achieved_amount,
        target_amount,
        &policy.accelerator,
    )?;

    let achievement: CommissionAchievement = CommissionAchievement::from_payout(
        input.employee.employee_id,
        input.plan.plan_id,
        input.period,
        target_amount,
        input.achieved_amount,
        &payout,
    );

    let before: StateSnapshot = StateSnapshot::new(format!(
        "employee_id={},plan_id={},period={}",
        input.employee.employee_id, input.plan.plan_id, input.period
    ));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "achievement_percent={},multiplier={},payout={}",
        payout.achievement_percent, payout.multiplier, payout.payout_amount
    ));
    let action: Action = Action::new(
        String::from("RecordCommissionAchievement"),
        Some(format!(
            "Recorded {} for plan '{}' in {}",
            payout.payout_amount, input.plan.name, input.period
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        AuditSubject::Employee(input.employee.employee_id),
        actor,
        cause,
        action,
        before,
        after,
    );

    Ok(AchievementRecord {
        achievement,
        payout,
        audit_event,
    })
}
