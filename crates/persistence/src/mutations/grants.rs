// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! RSU grant and vesting event mutations.

use comp_engine::VestingIssuance;
use comp_engine_audit::{AuditEvent, AuditSubject};
use comp_engine_domain::{GrantStatus, RsuGrant, RsuVestingEvent};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::u32_to_column;
use crate::diesel_schema::{rsu_grants, rsu_vesting_events};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

fn insert_vesting_event(
    conn: &mut SqliteConnection,
    grant_id: i64,
    event: &RsuVestingEvent,
) -> Result<(), PersistenceError> {
    diesel::insert_into(rsu_vesting_events::table)
        .values((
            rsu_vesting_events::grant_id.eq(grant_id),
            rsu_vesting_events::sequence.eq(u32_to_column("sequence", event.sequence)?),
            rsu_vesting_events::vesting_date.eq(event.vesting_date.to_string()),
            rsu_vesting_events::units_vesting.eq(event.units_vesting),
            rsu_vesting_events::is_vested.eq(i32::from(event.is_vested)),
            rsu_vesting_events::vested_at.eq(event.vested_at.map(|d| d.to_string())),
        ))
        .execute(conn)?;
    Ok(())
}

/// Creates a grant together with its vesting schedule and audit event.
///
/// The grant and issuance are prepared before the grant has an identifier;
/// the identifier assigned here replaces theirs. Everything is written in one
/// transaction.
///
/// # Returns
///
/// The grant ID assigned by the database.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if the grantee does not
/// exist, or another error if any insert fails.
pub fn persist_vesting_issuance(
    conn: &mut SqliteConnection,
    grant: &RsuGrant,
    issuance: &VestingIssuance,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let inserted: Result<usize, DieselError> = diesel::insert_into(rsu_grants::table)
            .values((
                rsu_grants::employee_id.eq(grant.employee_id),
                rsu_grants::grant_date.eq(grant.grant_date.to_string()),
                rsu_grants::total_units.eq(grant.total_units),
                rsu_grants::cliff_months.eq(u32_to_column("cliff_months", grant.cliff_months)?),
                rsu_grants::vesting_schedule_months.eq(u32_to_column(
                    "vesting_schedule_months",
                    grant.vesting_schedule_months,
                )?),
                rsu_grants::price_at_grant.eq(grant.price_at_grant.to_string()),
                rsu_grants::current_price.eq(grant.current_price.to_string()),
                rsu_grants::status.eq(grant.status.as_str()),
            ))
            .execute(conn);

        match inserted {
            Ok(_) => {}
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                return Err(PersistenceError::EmployeeNotFound(grant.employee_id));
            }
            Err(e) => return Err(e.into()),
        }

        let grant_id: i64 = get_last_insert_rowid(conn)?;

        for event in &issuance.events {
            insert_vesting_event(conn, grant_id, event)?;
        }

        let mut audit_event: AuditEvent = issuance.audit_event.clone();
        audit_event.subject = AuditSubject::Grant(grant_id);
        persist_audit_event(conn, &audit_event)?;

        info!(
            grant_id,
            employee_id = grant.employee_id,
            events = issuance.events.len(),
            "Persisted grant and vesting schedule"
        );

        Ok(grant_id)
    })
}

/// Writes recomputed `is_vested` / `vested_at` flags for a grant's schedule.
///
/// An `ACTIVE` grant whose every event has vested becomes `FULLY_VESTED`.
///
/// # Returns
///
/// The number of event rows updated.
///
/// # Errors
///
/// Returns an error if any update fails.
pub fn update_vesting_flags(
    conn: &mut SqliteConnection,
    grant_id: i64,
    events: &[RsuVestingEvent],
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let mut updated: usize = 0;
        for event in events {
            updated += diesel::update(
                rsu_vesting_events::table
                    .filter(rsu_vesting_events::grant_id.eq(grant_id))
                    .filter(
                        rsu_vesting_events::sequence.eq(u32_to_column("sequence", event.sequence)?),
                    ),
            )
            .set((
                rsu_vesting_events::is_vested.eq(i32::from(event.is_vested)),
                rsu_vesting_events::vested_at.eq(event.vested_at.map(|d| d.to_string())),
            ))
            .execute(conn)?;
        }

        if !events.is_empty() && events.iter().all(|e| e.is_vested) {
            diesel::update(
                rsu_grants::table
                    .filter(rsu_grants::grant_id.eq(grant_id))
                    .filter(rsu_grants::status.eq(GrantStatus::Active.as_str())),
            )
            .set(rsu_grants::status.eq(GrantStatus::FullyVested.as_str()))
            .execute(conn)?;
        }

        Ok(updated)
    })
}
