// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Compensation Computation Engine.
//!
//! This crate stores the snapshot records the engine reads (employees, salary
//! bands, grants, plans, scenarios) and the outputs it produces (vesting
//! events, commission achievements, applied pay changes, audit events). It is
//! built on Diesel over `SQLite` with embedded migrations.
//!
//! ## Storage Conventions
//!
//! - Decimals are stored as TEXT and parsed back exactly
//! - Dates are stored as ISO 8601 TEXT (`YYYY-MM-DD`)
//! - Accelerator tiers, eligibility criteria and scenario rules are JSON TEXT
//! - Foreign keys are enforced and verified when a store is opened
//!
//! ## Atomicity
//!
//! Every write that produces an audit event writes the event in the same
//! transaction. Applying a scenario is a single immediate transaction that
//! swaps the scenario status `DRAFT -> APPLIED`, writes every employee's new
//! pay, and records the audit event; any failure rolls all of it back.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory`, which gives each call its own
//! shared-cache in-memory database.

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
#![allow(clippy::multiple_crate_versions)]

use comp_engine::{AchievementRecord, CompensationSnapshot, ScenarioApplication, VestingIssuance};
use comp_engine_audit::{AuditEvent, AuditSubject};
use comp_engine_domain::{
    CommissionAchievement, CommissionPlan, Employee, RsuGrant, RsuVestingEvent, SalaryBand,
    Scenario, ScenarioRule,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::debug;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::CommittedApplication;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Snapshot
    // ========================================================================

    /// Reads the population and every band row into one snapshot.
    ///
    /// # Arguments
    ///
    /// * `as_of` - The computation date carried by the snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if either table cannot be read.
    pub fn load_snapshot(&mut self, as_of: Date) -> Result<CompensationSnapshot, PersistenceError> {
        let employees: Vec<Employee> = queries::list_employees(&mut self.conn)?;
        let bands: Vec<SalaryBand> = queries::list_bands(&mut self.conn)?;

        debug!(
            employees = employees.len(),
            bands = bands.len(),
            %as_of,
            "Loaded compensation snapshot"
        );

        Ok(CompensationSnapshot::new(as_of, employees, bands))
    }

    // ========================================================================
    // Employees & Bands
    // ========================================================================

    /// Inserts an employee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmployee` if the identifier is taken.
    pub fn insert_employee(&mut self, employee: &Employee) -> Result<(), PersistenceError> {
        mutations::insert_employee(&mut self.conn, employee)
    }

    /// Retrieves one employee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if it does not exist.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Employee, PersistenceError> {
        queries::get_employee(&mut self.conn, employee_id)
    }

    /// Retrieves every employee ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::list_employees(&mut self.conn)
    }

    /// Writes back an employee's derived compa-ratio.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if it does not exist.
    pub fn update_compa_ratio(
        &mut self,
        employee_id: i64,
        compa_ratio: Option<u32>,
    ) -> Result<(), PersistenceError> {
        mutations::update_compa_ratio(&mut self.conn, employee_id, compa_ratio)
    }

    /// Inserts a salary band row and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_band(&mut self, band: &SalaryBand) -> Result<i64, PersistenceError> {
        mutations::insert_band(&mut self.conn, band)
    }

    /// Retrieves every band row in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bands(&mut self) -> Result<Vec<SalaryBand>, PersistenceError> {
        queries::list_bands(&mut self.conn)
    }

    // ========================================================================
    // Grants & Vesting
    // ========================================================================

    /// Creates a grant with its vesting schedule and audit event.
    ///
    /// # Returns
    ///
    /// The grant ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the grantee does not
    /// exist, or another error if any write fails. Nothing is written on error.
    pub fn persist_vesting_issuance(
        &mut self,
        grant: &RsuGrant,
        issuance: &VestingIssuance,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_vesting_issuance(&mut self.conn, grant, issuance)
    }

    /// Retrieves one grant.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::GrantNotFound` if it does not exist.
    pub fn get_grant(&mut self, grant_id: i64) -> Result<RsuGrant, PersistenceError> {
        queries::get_grant(&mut self.conn, grant_id)
    }

    /// Retrieves a grant's stored schedule ordered by sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_vesting_events(
        &mut self,
        grant_id: i64,
    ) -> Result<Vec<RsuVestingEvent>, PersistenceError> {
        queries::list_vesting_events(&mut self.conn, grant_id)
    }

    /// Retrieves the vesting events of every `ACTIVE` grant.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_active_vesting_events(&mut self) -> Result<Vec<RsuVestingEvent>, PersistenceError> {
        queries::list_active_vesting_events(&mut self.conn)
    }

    /// Writes recomputed vested flags for a grant's schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if any update fails.
    pub fn update_vesting_flags(
        &mut self,
        grant_id: i64,
        events: &[RsuVestingEvent],
    ) -> Result<usize, PersistenceError> {
        mutations::update_vesting_flags(&mut self.conn, grant_id, events)
    }

    // ========================================================================
    // Plans & Achievements
    // ========================================================================

    /// Inserts a commission plan and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_plan(&mut self, plan: &CommissionPlan) -> Result<i64, PersistenceError> {
        mutations::insert_plan(&mut self.conn, plan)
    }

    /// Retrieves one commission plan.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PlanNotFound` if it does not exist.
    pub fn get_plan(&mut self, plan_id: i64) -> Result<CommissionPlan, PersistenceError> {
        queries::get_plan(&mut self.conn, plan_id)
    }

    /// Persists a commission achievement with its audit event.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateAchievement` if the period was
    /// already recorded for this employee and plan.
    pub fn persist_achievement(
        &mut self,
        record: &AchievementRecord,
    ) -> Result<CommissionAchievement, PersistenceError> {
        mutations::persist_achievement(&mut self.conn, record)
    }

    /// Retrieves every achievement recorded for an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_achievements_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<CommissionAchievement>, PersistenceError> {
        queries::list_achievements_for_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Scenarios
    // ========================================================================

    /// Inserts a `DRAFT` scenario and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_scenario(
        &mut self,
        name: &str,
        description: Option<&str>,
        rules: &[ScenarioRule],
    ) -> Result<Scenario, PersistenceError> {
        let scenario_id: i64 =
            mutations::insert_scenario(&mut self.conn, name, description, rules)?;
        queries::get_scenario(&mut self.conn, scenario_id)
    }

    /// Retrieves one scenario.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ScenarioNotFound` if it does not exist.
    pub fn get_scenario(&mut self, scenario_id: i64) -> Result<Scenario, PersistenceError> {
        queries::get_scenario(&mut self.conn, scenario_id)
    }

    /// Retrieves every scenario ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_scenarios(&mut self) -> Result<Vec<Scenario>, PersistenceError> {
        queries::list_scenarios(&mut self.conn)
    }

    /// Commits a scenario application atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario is missing or no longer `DRAFT`, or if
    /// any employee update fails. Nothing is written on error.
    pub fn commit_scenario_application(
        &mut self,
        application: &ScenarioApplication,
    ) -> Result<CommittedApplication, PersistenceError> {
        mutations::commit_scenario_application(&mut self.conn, application)
    }

    // ========================================================================
    // Audit Event Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if it does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline, optionally for one subject.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(
        &mut self,
        subject: Option<AuditSubject>,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, subject)
    }
}
