// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The scenario simulation engine.
//!
//! Every rule is evaluated against the employee's original pay. Matching rules
//! are folded in order, so the last match decides the projection. Running a
//! scenario never touches the store.

use crate::error::CoreError;
use crate::state::CompensationSnapshot;
use comp_engine_domain::{
    BandCode, DomainError, Employee, RuleAction, SalaryBand, Scenario, SimulationPolicy,
    UnresolvedEmployee, checked_add, checked_mul, checked_percent_of, checked_sub, checked_sum,
    compa_ratio_for, round2, select_effective_band, validate_scenario,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use tracing::{debug, info, warn};

/// Cost totals for one band over the affected employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCost {
    /// The band code.
    pub band: BandCode,
    /// Affected employees in the band.
    pub count: usize,
    /// Their current cost.
    pub current_cost: Decimal,
    /// Their projected cost.
    pub projected_cost: Decimal,
    /// `projected_cost - current_cost`.
    pub delta: Decimal,
}

/// The projected pay of one affected employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProjection {
    /// The employee.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Band code.
    pub band: BandCode,
    /// Department.
    pub department: String,
    /// Current annual fixed pay.
    pub current: Decimal,
    /// Projected annual fixed pay.
    pub projected: Decimal,
    /// `projected - current`.
    pub change: Decimal,
    /// Zero-based index of the rule that decided the projection.
    pub rule_index: usize,
    /// Compa-ratio at current pay, when a band resolves.
    pub current_compa: Option<u32>,
    /// Compa-ratio at projected pay, when a band resolves.
    pub projected_compa: Option<u32>,
}

/// The outcome of running a scenario. Produced fresh on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRunResult {
    /// The scenario that was run.
    pub scenario_id: i64,
    /// The computation date.
    pub as_of: Date,
    /// Employees whose projection differs from their current pay.
    pub affected_count: usize,
    /// Current cost of the affected employees.
    pub current_cost: Decimal,
    /// Projected cost of the affected employees.
    pub projected_cost: Decimal,
    /// `projected_cost - current_cost`.
    pub delta: Decimal,
    /// `delta / current_cost × 100`, rounded to 2 dp. `None` when the current
    /// cost is zero.
    pub delta_percent: Option<Decimal>,
    /// Per-band breakdown, sorted by band code.
    pub by_band: Vec<BandCost>,
    /// The largest changes by magnitude, ties by employee id.
    pub top_changes: Vec<EmployeeProjection>,
    /// Every affected employee, by employee id.
    pub projections: Vec<EmployeeProjection>,
    /// Employees a band-dependent rule could not be evaluated for.
    pub excluded: Vec<UnresolvedEmployee>,
}

/// Computes the projected pay for one action, rounded to 2 dp.
///
/// # Errors
///
/// Returns `DomainError::NegativeProjection` if the result is below zero, or
/// `DomainError::ArithmeticOverflow` if it leaves the representable range.
fn project(
    action: RuleAction,
    employee: &Employee,
    band: Option<&SalaryBand>,
    rule_index: usize,
) -> Result<Option<Decimal>, DomainError> {
    let current: Decimal = employee.annual_fixed;
    let raw: Option<Decimal> = match action {
        RuleAction::RaisePercent(v) => {
            let factor: Decimal =
                checked_add(Decimal::ONE, v / Decimal::ONE_HUNDRED, "raise factor")?;
            Some(checked_mul(current, factor, "percent raise")?)
        }
        RuleAction::RaiseFlat(v) => Some(checked_add(current, v, "flat raise")?),
        RuleAction::SetToBenchmark => band.map(|b| b.mid_salary),
        RuleAction::SetCompaRatio(v) => band
            .map(|b| checked_mul(b.mid_salary, v, "compa-ratio target"))
            .transpose()?
            .map(|target| target / Decimal::ONE_HUNDRED),
    };

    match raw.map(round2) {
        Some(projected) if projected < Decimal::ZERO => Err(DomainError::NegativeProjection {
            employee_id: employee.employee_id,
            rule_index,
            projected,
        }),
        other => Ok(other),
    }
}

/// Folds the rule list over one employee.
///
/// Returns the winning `(rule_index, projected)` pair, if any rule matched,
/// and whether a band-dependent rule had to be skipped. A rule is only
/// skipped when its band, department and rating predicates match.
fn fold_rules(
    scenario: &Scenario,
    employee: &Employee,
    band: Option<&SalaryBand>,
) -> Result<(Option<(usize, Decimal)>, bool), DomainError> {
    let current_compa: Option<u32> = band
        .map(|b| compa_ratio_for(employee.annual_fixed, b))
        .transpose()?;
    let mut winner: Option<(usize, Decimal)> = None;
    let mut skipped: bool = false;

    for (rule_index, rule) in scenario.rules.iter().enumerate() {
        if !rule.filter.matches_without_compa(employee) {
            continue;
        }
        if band.is_none() && rule.needs_band() {
            skipped = true;
            continue;
        }
        if !rule.filter.matches(employee, current_compa) {
            continue;
        }
        if let Some(projected) = project(rule.action, employee, band, rule_index)? {
            winner = Some((rule_index, projected));
        }
    }

    Ok((winner, skipped))
}

fn aggregate_by_band(projections: &[EmployeeProjection]) -> Result<Vec<BandCost>, DomainError> {
    let mut by_band: BTreeMap<BandCode, BandCost> = BTreeMap::new();
    for p in projections {
        let entry: &mut BandCost = by_band.entry(p.band.clone()).or_insert_with(|| BandCost {
            band: p.band.clone(),
            count: 0,
            current_cost: Decimal::ZERO,
            projected_cost: Decimal::ZERO,
            delta: Decimal::ZERO,
        });
        entry.count += 1;
        entry.current_cost = checked_add(entry.current_cost, p.current, "band current cost")?;
        entry.projected_cost =
            checked_add(entry.projected_cost, p.projected, "band projected cost")?;
        entry.delta = checked_add(entry.delta, p.change, "band delta")?;
    }
    Ok(by_band.into_values().collect())
}

/// Runs a scenario against a snapshot without mutating anything.
///
/// # Arguments
///
/// * `scenario` - The scenario; must be `DRAFT`
/// * `snapshot` - The population and bands
/// * `policy` - Simulation constants
///
/// # Errors
///
/// Returns an error if:
/// - The scenario has already been applied
/// - The scenario's rules are invalid
/// - A matching rule projects a negative salary
/// - A projection or cost total overflows
pub fn run_scenario(
    scenario: &Scenario,
    snapshot: &CompensationSnapshot,
    policy: &SimulationPolicy,
) -> Result<ScenarioRunResult, CoreError> {
    if !scenario.status.is_draft() {
        return Err(CoreError::ScenarioAlreadyApplied {
            scenario_id: scenario.scenario_id,
        });
    }
    validate_scenario(&scenario.name, &scenario.rules)?;

    info!(
        scenario_id = scenario.scenario_id,
        rules = scenario.rules.len(),
        employees = snapshot.employees.len(),
        as_of = %snapshot.as_of,
        "Running scenario"
    );

    let mut projections: Vec<EmployeeProjection> = Vec::new();
    let mut excluded: Vec<UnresolvedEmployee> = Vec::new();

    for employee in &snapshot.employees {
        let band: Option<&SalaryBand> =
            select_effective_band(&snapshot.bands, &employee.band, snapshot.as_of).ok();
        let (winner, skipped): (Option<(usize, Decimal)>, bool) =
            fold_rules(scenario, employee, band)?;

        if skipped {
            warn!(
                employee_id = employee.employee_id,
                band = %employee.band,
                "Excluded from band-dependent rules: no effective band"
            );
            excluded.push(UnresolvedEmployee {
                employee_id: employee.employee_id,
                band_code: employee.band.clone(),
            });
        }

        let Some((rule_index, projected)) = winner else {
            continue;
        };
        if projected == employee.annual_fixed {
            continue;
        }

        projections.push(EmployeeProjection {
            employee_id: employee.employee_id,
            name: employee.name.clone(),
            band: employee.band.clone(),
            department: employee.department.clone(),
            current: employee.annual_fixed,
            projected,
            change: checked_sub(projected, employee.annual_fixed, "pay change")?,
            rule_index,
            current_compa: band
                .map(|b| compa_ratio_for(employee.annual_fixed, b))
                .transpose()?,
            projected_compa: band.map(|b| compa_ratio_for(projected, b)).transpose()?,
        });
    }

    projections.sort_by_key(|p| p.employee_id);
    excluded.sort_by_key(|e| e.employee_id);

    let current_cost: Decimal =
        checked_sum(projections.iter().map(|p| p.current), "current cost")?;
    let projected_cost: Decimal =
        checked_sum(projections.iter().map(|p| p.projected), "projected cost")?;
    let delta: Decimal = checked_sub(projected_cost, current_cost, "cost delta")?;
    let delta_percent: Option<Decimal> = (!current_cost.is_zero())
        .then(|| checked_percent_of(delta, current_cost, "delta percent").map(round2))
        .transpose()?;

    let mut top_changes: Vec<EmployeeProjection> = projections.clone();
    top_changes.sort_by(|a, b| {
        b.change
            .abs()
            .cmp(&a.change.abs())
            .then(a.employee_id.cmp(&b.employee_id))
    });
    top_changes.truncate(policy.top_n);

    debug!(
        scenario_id = scenario.scenario_id,
        affected = projections.len(),
        excluded = excluded.len(),
        %delta,
        "Scenario run complete"
    );

    Ok(ScenarioRunResult {
        scenario_id: scenario.scenario_id,
        as_of: snapshot.as_of,
        affected_count: projections.len(),
        current_cost,
        projected_cost,
        delta,
        delta_percent,
        by_band: aggregate_by_band(&projections)?,
        top_changes,
        projections,
        excluded,
    })
}
