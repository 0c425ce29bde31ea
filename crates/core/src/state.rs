// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::simulation::ScenarioRunResult;
use comp_engine_audit::AuditEvent;
use comp_engine_domain::{
    CommissionAchievement, Employee, PayoutResult, RsuVestingEvent, SalaryBand, Scenario,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// The in-memory population a computation pass works on.
///
/// A snapshot is read once from the store and never consulted again for the
/// rest of the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationSnapshot {
    /// The computation date used to select effective bands.
    pub as_of: Date,
    /// All employees.
    pub employees: Vec<Employee>,
    /// All salary band rows, in insertion order.
    pub bands: Vec<SalaryBand>,
}

impl CompensationSnapshot {
    /// Creates a new snapshot.
    ///
    /// # Arguments
    ///
    /// * `as_of` - The computation date
    /// * `employees` - The population
    /// * `bands` - Every salary band row
    #[must_use]
    pub const fn new(as_of: Date, employees: Vec<Employee>, bands: Vec<SalaryBand>) -> Self {
        Self {
            as_of,
            employees,
            bands,
        }
    }

    /// Looks up an employee by identifier.
    #[must_use]
    pub fn employee(&self, employee_id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }
}

/// A pay change to be written to one employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayUpdate {
    /// The employee.
    pub employee_id: i64,
    /// Pay before the change.
    pub previous_annual_fixed: Decimal,
    /// Pay after the change.
    pub annual_fixed: Decimal,
    /// Compa-ratio at the new pay, when a band resolves.
    pub compa_ratio: Option<u32>,
}

/// The result of applying a scenario.
///
/// Nothing has been written yet; the store commits all of it or none of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioApplication {
    /// The scenario in its `APPLIED` state.
    pub scenario: Scenario,
    /// One update per affected employee.
    pub updates: Vec<EmployeePayUpdate>,
    /// The run the updates were derived from.
    pub run: ScenarioRunResult,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of issuing a vesting schedule for a new grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestingIssuance {
    /// The generated events.
    pub events: Vec<RsuVestingEvent>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of recording a commission achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementRecord {
    /// The immutable achievement to persist.
    pub achievement: CommissionAchievement,
    /// The payout calculation it came from.
    pub payout: PayoutResult,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
