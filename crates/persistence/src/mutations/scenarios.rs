// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scenario mutations, including the atomic apply commit.

use comp_engine::{EmployeePayUpdate, ScenarioApplication};
use comp_engine_audit::AuditEvent;
use comp_engine_domain::{ScenarioRule, ScenarioStatus};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use tracing::{info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::u32_to_column;
use crate::diesel_schema::{employees, scenarios};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::audit::get_audit_event;

/// The outcome of a committed scenario apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedApplication {
    /// When the scenario became `APPLIED` (ISO 8601).
    pub applied_at: String,
    /// The stored audit event.
    pub audit_event: AuditEvent,
}

/// Inserts a `DRAFT` scenario.
///
/// # Returns
///
/// The scenario ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_scenario(
    conn: &mut SqliteConnection,
    name: &str,
    description: Option<&str>,
    rules: &[ScenarioRule],
) -> Result<i64, PersistenceError> {
    let rules_json: String = serde_json::to_string(rules)?;

    diesel::insert_into(scenarios::table)
        .values((
            scenarios::name.eq(name),
            scenarios::description.eq(description),
            scenarios::rules_json.eq(rules_json),
            scenarios::status.eq(ScenarioStatus::Draft.as_str()),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

fn write_pay_update(
    conn: &mut SqliteConnection,
    update: &EmployeePayUpdate,
) -> Result<(), PersistenceError> {
    let compa_ratio: Option<i32> = update
        .compa_ratio
        .map(|v| u32_to_column("compa_ratio", v))
        .transpose()?;

    // Matching on the previous pay rejects a snapshot that went stale.
    let rows: usize = diesel::update(
        employees::table
            .filter(employees::employee_id.eq(update.employee_id))
            .filter(employees::annual_fixed.eq(update.previous_annual_fixed.to_string())),
    )
    .set((
        employees::annual_fixed.eq(update.annual_fixed.to_string()),
        employees::compa_ratio.eq(compa_ratio),
    ))
    .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::EmployeeWriteFailed(update.employee_id));
    }

    Ok(())
}

/// Commits a scenario application: status, employee pay, and audit event.
///
/// The scenario moves `DRAFT -> APPLIED` through a compare-and-swap on its
/// status, then every employee update is written, then the audit event.
/// Any failure rolls the whole transaction back, leaving the scenario
/// `DRAFT` and every employee unchanged.
///
/// # Errors
///
/// Returns an error if:
/// - The scenario does not exist (`ScenarioNotFound`)
/// - The scenario is no longer `DRAFT` (`ScenarioNotDraft`)
/// - An employee row is missing or its pay changed (`EmployeeWriteFailed`)
pub fn commit_scenario_application(
    conn: &mut SqliteConnection,
    application: &ScenarioApplication,
) -> Result<CommittedApplication, PersistenceError> {
    let scenario_id: i64 = application.scenario.scenario_id;

    let result: Result<CommittedApplication, PersistenceError> = conn
        .immediate_transaction::<CommittedApplication, PersistenceError, _>(|conn| {
            let swapped: usize = diesel::update(
                scenarios::table
                    .filter(scenarios::scenario_id.eq(scenario_id))
                    .filter(scenarios::status.eq(ScenarioStatus::Draft.as_str())),
            )
            .set((
                scenarios::status.eq(ScenarioStatus::Applied.as_str()),
                scenarios::applied_at.eq(sql::<Nullable<Text>>("CURRENT_TIMESTAMP")),
            ))
            .execute(conn)?;

            if swapped == 0 {
                let exists: Option<String> = scenarios::table
                    .filter(scenarios::scenario_id.eq(scenario_id))
                    .select(scenarios::status)
                    .first::<String>(conn)
                    .optional()?;
                return Err(exists.map_or(
                    PersistenceError::ScenarioNotFound(scenario_id),
                    |_| PersistenceError::ScenarioNotDraft(scenario_id),
                ));
            }

            for update in &application.updates {
                write_pay_update(conn, update)?;
            }

            let event_id: i64 = persist_audit_event(conn, &application.audit_event)?;

            let applied_at: Option<String> = scenarios::table
                .filter(scenarios::scenario_id.eq(scenario_id))
                .select(scenarios::applied_at)
                .first::<Option<String>>(conn)?;

            Ok(CommittedApplication {
                applied_at: applied_at.unwrap_or_default(),
                audit_event: get_audit_event(conn, event_id)?,
            })
        });

    match &result {
        Ok(_) => info!(
            scenario_id,
            updated = application.updates.len(),
            "Committed scenario application"
        ),
        Err(e) => warn!(scenario_id, error = %e, "Scenario application rolled back"),
    }

    result
}
