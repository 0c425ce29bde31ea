// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use comp_engine_audit::{Action, Actor, AuditEvent, AuditSubject, Cause, StateSnapshot};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventFullRow {
    event_id: i64,
    subject_kind: String,
    subject_id: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: Option<String>,
}

impl TryFrom<AuditEventFullRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventFullRow) -> Result<Self, Self::Error> {
        let subject: AuditSubject = AuditSubject::from_parts(&row.subject_kind, row.subject_id)
            .ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "Unknown audit subject kind '{}'",
                    row.subject_kind
                ))
            })?;

        let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&row.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

        let event: Self = Self::new(
            subject,
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
        );

        Ok(event.persisted(row.event_id, row.created_at.unwrap_or_default()))
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no row exists.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventFullRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventFullRow::as_select())
        .first::<AuditEventFullRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    AuditEvent::try_from(row)
}

/// Retrieves the audit timeline in commit order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `subject` - Restricts the timeline to one record when present
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    subject: Option<AuditSubject>,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventFullRow> = match subject {
        Some(subject) => audit_events::table
            .filter(audit_events::subject_kind.eq(subject.kind()))
            .filter(audit_events::subject_id.eq(subject.id()))
            .order(audit_events::event_id.asc())
            .select(AuditEventFullRow::as_select())
            .load::<AuditEventFullRow>(conn)?,
        None => audit_events::table
            .order(audit_events::event_id.asc())
            .select(AuditEventFullRow::as_select())
            .load::<AuditEventFullRow>(conn)?,
    };

    rows.into_iter().map(AuditEvent::try_from).collect()
}
