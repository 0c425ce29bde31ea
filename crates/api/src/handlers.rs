// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Orchestrator operations.
//!
//! Each operation reads what it needs from the store, invokes the pure engine
//! functions, persists their outputs, and translates every failure into an
//! `ApiError`. The engine itself never touches the store mid-computation.

use std::collections::BTreeMap;

use comp_engine::{
    AchievementInput, AchievementRecord, ApplyGate, ApplyPermit, CompensationSnapshot,
    ScenarioApplication, ScenarioRunResult, VestingIssuance, issue_vesting_schedule,
    record_commission_achievement,
};
use comp_engine_audit::{Actor, AuditEvent, AuditSubject, Cause};
use comp_engine_domain::{
    BandCode, CommissionAchievement, CommissionPlan, CompaRatioResult, Employee, EnginePolicy,
    EquityScore, GrantStatus, PayoutResult, RsuGrant, RsuVestingEvent, SalaryBand, Scenario,
    VestingSummary, calculate_payout, compute_equity_score, refresh_vesting_status,
    resolve_compa_ratio, select_effective_band, summarize_vesting, upcoming_vesting_events,
    validate_accelerator_tiers, validate_employee, validate_scenario,
};
use comp_engine_persistence::{CommittedApplication, Persistence};
use rust_decimal::Decimal;
use time::Date;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::notifications::Notification;
use crate::request_response::{
    AchievementResponse, ApiResult, ApplyScenarioResponse, CreateBandRequest,
    CreateEmployeeRequest, CreateGrantRequest, CreateGrantResponse, CreatePlanRequest,
    CreateScenarioRequest, PayoutRequest, RecordAchievementRequest,
};

// ============================================================================
// Employees & Bands
// ============================================================================

/// Adds an employee to the population.
///
/// # Errors
///
/// Returns an error if:
/// - A required field is empty or the rating is out of range
/// - An employee with the same identifier already exists
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
) -> Result<Employee, ApiError> {
    info!(
        employee_id = request.employee_id,
        band = %request.band,
        "Handling create_employee request"
    );

    let employee: Employee = request.to_employee();
    validate_employee(&employee).map_err(translate_domain_error)?;
    persistence
        .insert_employee(&employee)
        .map_err(translate_persistence_error)?;

    Ok(employee)
}

/// Lists the population ordered by identifier.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_employees(persistence: &mut Persistence) -> Result<Vec<Employee>, ApiError> {
    persistence
        .list_employees()
        .map_err(translate_persistence_error)
}

/// Resolves one employee's compa-ratio and writes the derived value back.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `policy` - The engine policy
/// * `employee_id` - The employee
/// * `on` - The computation date used to select the effective band
///
/// # Errors
///
/// Returns an error if:
/// - The employee does not exist
/// - No band with the employee's code is effective on `on`
/// - The compa-ratio overflows
pub fn get_compa_ratio(
    persistence: &mut Persistence,
    policy: &EnginePolicy,
    employee_id: i64,
    on: Date,
) -> Result<CompaRatioResult, ApiError> {
    info!(employee_id, %on, "Handling get_compa_ratio request");

    let employee: Employee = persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)?;
    let bands: Vec<SalaryBand> = persistence
        .list_bands()
        .map_err(translate_persistence_error)?;

    let band: &SalaryBand =
        select_effective_band(&bands, &employee.band, on).map_err(translate_domain_error)?;
    let result: CompaRatioResult =
        resolve_compa_ratio(&employee, band, &policy.compa).map_err(translate_domain_error)?;

    persistence
        .update_compa_ratio(employee_id, Some(result.compa_ratio))
        .map_err(translate_persistence_error)?;

    Ok(result)
}

/// Adds a salary band row.
///
/// # Errors
///
/// Returns an error if the code is empty or the range violates
/// `0 <= min < mid < max`.
pub fn create_band(
    persistence: &mut Persistence,
    request: &CreateBandRequest,
) -> Result<SalaryBand, ApiError> {
    info!(
        band_code = %request.band_code,
        effective_date = %request.effective_date,
        "Handling create_band request"
    );

    let mut band: SalaryBand = SalaryBand::new(
        BandCode::new(&request.band_code),
        request.min_salary,
        request.mid_salary,
        request.max_salary,
        request.effective_date,
    )
    .map_err(translate_domain_error)?;
    if let Some(job_area_id) = request.job_area_id {
        band = band.with_job_area(job_area_id);
    }

    let band_id: i64 = persistence
        .insert_band(&band)
        .map_err(translate_persistence_error)?;

    Ok(band.with_id(band_id))
}

/// Lists every band row in insertion order.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_bands(persistence: &mut Persistence) -> Result<Vec<SalaryBand>, ApiError> {
    persistence.list_bands().map_err(translate_persistence_error)
}

// ============================================================================
// Grants & Vesting
// ============================================================================

/// Creates a grant together with its vesting schedule.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `policy` - The engine policy
/// * `request` - The grant parameters
/// * `as_of` - Reference date for the initial vested flags
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The grant parameters are invalid
/// - The grantee does not exist
pub fn create_grant(
    persistence: &mut Persistence,
    policy: &EnginePolicy,
    request: &CreateGrantRequest,
    as_of: Date,
    actor: Actor,
    cause: Cause,
) -> Result<CreateGrantResponse, ApiError> {
    info!(
        employee_id = request.employee_id,
        total_units = request.total_units,
        actor_id = %actor.id,
        "Handling create_grant request"
    );

    let grant: RsuGrant = RsuGrant {
        grant_id: 0,
        employee_id: request.employee_id,
        grant_date: request.grant_date,
        total_units: request.total_units,
        cliff_months: request.cliff_months,
        vesting_schedule_months: request.vesting_schedule_months,
        price_at_grant: request.price_at_grant,
        current_price: request.current_price.unwrap_or(request.price_at_grant),
        status: GrantStatus::Active,
    };

    let issuance: VestingIssuance =
        issue_vesting_schedule(&grant, as_of, policy, actor, cause).map_err(translate_core_error)?;
    let grant_id: i64 = persistence
        .persist_vesting_issuance(&grant, &issuance)
        .map_err(translate_persistence_error)?;

    let events: Vec<RsuVestingEvent> = issuance
        .events
        .into_iter()
        .map(|mut event| {
            event.grant_id = grant_id;
            event
        })
        .collect();

    Ok(CreateGrantResponse {
        message: format!(
            "Created grant {grant_id} with {} vesting events",
            events.len()
        ),
        grant: RsuGrant { grant_id, ..grant },
        events,
    })
}

/// Summarizes a grant's vested position as of a date.
///
/// The stored vested flags are brought up to date as of `today` when they
/// have drifted; the summary itself is computed as of `as_of`.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `grant_id` - The grant
/// * `as_of` - The date the summary is computed for
/// * `today` - The current date the stored flags should reflect
///
/// # Errors
///
/// Returns an error if:
/// - The grant does not exist
/// - The stored events release more units than the grant holds
pub fn get_vesting_summary(
    persistence: &mut Persistence,
    grant_id: i64,
    as_of: Date,
    today: Date,
) -> Result<VestingSummary, ApiError> {
    info!(grant_id, %as_of, "Handling get_vesting_summary request");

    let grant: RsuGrant = persistence
        .get_grant(grant_id)
        .map_err(translate_persistence_error)?;
    let stored: Vec<RsuVestingEvent> = persistence
        .list_vesting_events(grant_id)
        .map_err(translate_persistence_error)?;

    let current: Vec<RsuVestingEvent> = refresh_vesting_status(&stored, today);
    if current != stored {
        let updated: usize = persistence
            .update_vesting_flags(grant_id, &current)
            .map_err(translate_persistence_error)?;
        debug!(grant_id, updated, "Refreshed stored vesting flags");
    }

    summarize_vesting(&grant, &current, as_of).map_err(translate_domain_error)
}

/// Lists vesting events of active grants falling in `(from, from + days]`.
///
/// Every listed event also yields a `VestingUpcoming` notification.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the window end overflows.
pub fn list_upcoming_vesting(
    persistence: &mut Persistence,
    from: Date,
    days: u32,
) -> Result<ApiResult<Vec<RsuVestingEvent>>, ApiError> {
    info!(%from, days, "Handling list_upcoming_vesting request");

    let events: Vec<RsuVestingEvent> = persistence
        .list_active_vesting_events()
        .map_err(translate_persistence_error)?;
    let upcoming: Vec<RsuVestingEvent> =
        upcoming_vesting_events(&events, from, days).map_err(translate_domain_error)?;

    let mut grantees: BTreeMap<i64, i64> = BTreeMap::new();
    let mut notifications: Vec<Notification> = Vec::with_capacity(upcoming.len());
    for event in &upcoming {
        let employee_id: i64 = if let Some(employee_id) = grantees.get(&event.grant_id) {
            *employee_id
        } else {
            let grant: RsuGrant = persistence
                .get_grant(event.grant_id)
                .map_err(translate_persistence_error)?;
            grantees.insert(grant.grant_id, grant.employee_id);
            grant.employee_id
        };
        notifications.push(Notification::vesting_upcoming(event, employee_id));
    }

    Ok(ApiResult {
        response: upcoming,
        notifications,
    })
}

// ============================================================================
// Plans & Achievements
// ============================================================================

/// Creates a commission plan.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The target variable percentage is negative
/// - The accelerator tiers are not strictly increasing or have a negative
///   multiplier
pub fn create_plan(
    persistence: &mut Persistence,
    request: &CreatePlanRequest,
) -> Result<CommissionPlan, ApiError> {
    info!(
        name = %request.name,
        tiers = request.accelerator_tiers.len(),
        "Handling create_plan request"
    );

    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("Plan name cannot be empty"),
        });
    }
    if request.target_variable_percent < Decimal::ZERO {
        return Err(ApiError::InvalidInput {
            field: String::from("target_variable_percent"),
            message: format!(
                "Target variable percent must not be negative, got {}",
                request.target_variable_percent
            ),
        });
    }
    validate_accelerator_tiers(&request.accelerator_tiers).map_err(translate_domain_error)?;

    let mut plan: CommissionPlan = CommissionPlan {
        plan_id: 0,
        name: request.name.trim().to_string(),
        target_variable_percent: request.target_variable_percent,
        plan_type: request.plan_type,
        accelerator_tiers: request.accelerator_tiers.clone(),
        eligibility: request.eligibility.clone(),
    };
    plan.plan_id = persistence
        .insert_plan(&plan)
        .map_err(translate_persistence_error)?;

    Ok(plan)
}

/// Previews the payout for an achievement under a plan. Nothing is stored.
///
/// # Errors
///
/// Returns an error if:
/// - The plan does not exist
/// - The target is zero or negative, or the achieved amount is negative
pub fn calculate_plan_payout(
    persistence: &mut Persistence,
    policy: &EnginePolicy,
    plan_id: i64,
    request: &PayoutRequest,
) -> Result<PayoutResult, ApiError> {
    info!(plan_id, "Handling calculate_plan_payout request");

    let plan: CommissionPlan = persistence
        .get_plan(plan_id)
        .map_err(translate_persistence_error)?;

    calculate_payout(
        &plan,
        request.achieved_amount,
        request.target_amount,
        &policy.accelerator,
    )
    .map_err(translate_domain_error)
}

/// Records a commission achievement and its payout.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `policy` - The engine policy
/// * `request` - The achievement
/// * `today` - Eligibility date when the request does not give one
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The plan or employee does not exist
/// - The period is malformed or already recorded
/// - The employee is not eligible for the plan
/// - The target is zero or negative, or the achieved amount is negative
pub fn record_achievement(
    persistence: &mut Persistence,
    policy: &EnginePolicy,
    request: &RecordAchievementRequest,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<AchievementResponse, ApiError> {
    info!(
        employee_id = request.employee_id,
        plan_id = request.plan_id,
        period = %request.period,
        actor_id = %actor.id,
        "Handling record_achievement request"
    );

    let plan: CommissionPlan = persistence
        .get_plan(request.plan_id)
        .map_err(translate_persistence_error)?;
    let employee: Employee = persistence
        .get_employee(request.employee_id)
        .map_err(translate_persistence_error)?;

    let input: AchievementInput<'_> = AchievementInput {
        plan: &plan,
        employee: &employee,
        period: &request.period,
        achieved_amount: request.achieved_amount,
        target_amount: request.target_amount,
        on: request.on.unwrap_or(today),
    };
    let record: AchievementRecord =
        record_commission_achievement(&input, policy, actor, cause).map_err(translate_core_error)?;
    let achievement: CommissionAchievement = persistence
        .persist_achievement(&record)
        .map_err(translate_persistence_error)?;

    Ok(AchievementResponse {
        message: format!(
            "Recorded payout {} for employee {} in {}",
            achievement.payout_amount, achievement.employee_id, achievement.period
        ),
        achievement,
        payout: record.payout,
    })
}

// ============================================================================
// Equity
// ============================================================================

/// Computes the pay-equity score of the whole population.
///
/// # Errors
///
/// Returns an error if the store cannot be read or a pay total overflows.
pub fn get_equity_score(
    persistence: &mut Persistence,
    policy: &EnginePolicy,
    on: Date,
) -> Result<EquityScore, ApiError> {
    info!(%on, "Handling get_equity_score request");

    let snapshot: CompensationSnapshot = persistence
        .load_snapshot(on)
        .map_err(translate_persistence_error)?;

    compute_equity_score(&snapshot.employees, &snapshot.bands, on, policy)
        .map_err(translate_domain_error)
}

// ============================================================================
// Scenarios
// ============================================================================

/// Creates a `DRAFT` scenario.
///
/// # Errors
///
/// Returns an error if the name is empty or the rules are invalid.
pub fn create_scenario(
    persistence: &mut Persistence,
    request: &CreateScenarioRequest,
) -> Result<Scenario, ApiError> {
    info!(
        name = %request.name,
        rules = request.rules.len(),
        "Handling create_scenario request"
    );

    validate_scenario(&request.name, &request.rules).map_err(translate_domain_error)?;

    persistence
        .insert_scenario(
            request.name.trim(),
            request.description.as_deref(),
            &request.rules,
        )
        .map_err(translate_persistence_error)
}

/// Lists every scenario ordered by identifier.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_scenarios(persistence: &mut Persistence) -> Result<Vec<Scenario>, ApiError> {
    persistence
        .list_scenarios()
        .map_err(translate_persistence_error)
}

/// Runs a scenario against the current population. Nothing is written.
///
/// # Errors
///
/// Returns an error if:
/// - The scenario does not exist or has been applied
/// - A rule projects a negative salary
pub fn run_scenario(
    persistence: &mut Persistence,
    policy: &EnginePolicy,
    scenario_id: i64,
    on: Date,
) -> Result<ScenarioRunResult, ApiError> {
    info!(scenario_id, %on, "Handling run_scenario request");

    let scenario: Scenario = persistence
        .get_scenario(scenario_id)
        .map_err(translate_persistence_error)?;
    let snapshot: CompensationSnapshot = persistence
        .load_snapshot(on)
        .map_err(translate_persistence_error)?;

    comp_engine::run_scenario(&scenario, &snapshot, &policy.simulation)
        .map_err(translate_core_error)
}

/// Applies a scenario: recomputes its projection and commits every pay change.
///
/// The scenario is claimed in `gate` for the whole operation, so a second
/// apply of the same scenario is rejected while this one is in flight. The
/// commit itself is all-or-nothing.
///
/// # Arguments
///
/// * `persistence` - The store
/// * `gate` - The per-scenario apply gate
/// * `policy` - The engine policy
/// * `scenario_id` - The scenario
/// * `on` - The computation date
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The scenario does not exist
/// - The scenario is already applied or being applied (`StateConflict`)
/// - A rule projects a negative salary
/// - Any employee write fails, in which case nothing is changed
pub fn apply_scenario(
    persistence: &mut Persistence,
    gate: &ApplyGate,
    policy: &EnginePolicy,
    scenario_id: i64,
    on: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<ApplyScenarioResponse>, ApiError> {
    info!(
        scenario_id,
        %on,
        actor_id = %actor.id,
        "Handling apply_scenario request"
    );

    let permit: ApplyPermit = gate.try_begin(scenario_id).map_err(translate_core_error)?;

    let scenario: Scenario = persistence
        .get_scenario(scenario_id)
        .map_err(translate_persistence_error)?;
    let snapshot: CompensationSnapshot = persistence
        .load_snapshot(on)
        .map_err(translate_persistence_error)?;

    let application: ScenarioApplication =
        comp_engine::apply_scenario(&scenario, &snapshot, policy, actor, cause)
            .map_err(translate_core_error)?;
    let committed: CommittedApplication = persistence
        .commit_scenario_application(&application)
        .map_err(translate_persistence_error)?;
    drop(permit);

    let mut applied: Scenario = application.scenario;
    applied.applied_at = Some(committed.applied_at.clone());

    let notification: Notification = Notification::ScenarioApplied {
        scenario_id,
        name: applied.name.clone(),
        affected_count: application.run.affected_count,
        delta: application.run.delta,
        applied_at: committed.applied_at,
    };

    Ok(ApiResult {
        response: ApplyScenarioResponse {
            message: format!(
                "Applied scenario '{}' to {} employees",
                applied.name, application.run.affected_count
            ),
            scenario: applied,
            run: application.run,
            audit_event: committed.audit_event,
        },
        notifications: vec![notification],
    })
}

// ============================================================================
// Audit
// ============================================================================

/// Retrieves the audit timeline, optionally for one subject.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    subject: Option<AuditSubject>,
) -> Result<Vec<AuditEvent>, ApiError> {
    info!(?subject, "Handling get_audit_timeline request");

    persistence
        .get_audit_timeline(subject)
        .map_err(translate_persistence_error)
}

/// Retrieves one audit event by its identifier.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no event has this identifier.
pub fn get_audit_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<AuditEvent, ApiError> {
    info!(event_id, "Handling get_audit_event request");

    persistence
        .get_audit_event(event_id)
        .map_err(translate_persistence_error)
}
