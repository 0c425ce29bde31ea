// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! RSU grant and vesting event queries.

use comp_engine_domain::{GrantStatus, RsuGrant, RsuVestingEvent};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{date_from_text, decimal_from_text, enum_from_text, u32_from_column};
use crate::diesel_schema::{rsu_grants, rsu_vesting_events};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = rsu_grants)]
struct GrantRow {
    grant_id: i64,
    employee_id: i64,
    grant_date: String,
    total_units: i64,
    cliff_months: i32,
    vesting_schedule_months: i32,
    price_at_grant: String,
    current_price: String,
    status: String,
}

impl TryFrom<GrantRow> for RsuGrant {
    type Error = PersistenceError;

    fn try_from(row: GrantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            grant_id: row.grant_id,
            employee_id: row.employee_id,
            grant_date: date_from_text("grant_date", &row.grant_date)?,
            total_units: row.total_units,
            cliff_months: u32_from_column("cliff_months", row.cliff_months)?,
            vesting_schedule_months: u32_from_column(
                "vesting_schedule_months",
                row.vesting_schedule_months,
            )?,
            price_at_grant: decimal_from_text("price_at_grant", &row.price_at_grant)?,
            current_price: decimal_from_text("current_price", &row.current_price)?,
            status: enum_from_text("status", &row.status)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = rsu_vesting_events)]
struct VestingEventRow {
    grant_id: i64,
    sequence: i32,
    vesting_date: String,
    units_vesting: i64,
    is_vested: i32,
    vested_at: Option<String>,
}

impl TryFrom<VestingEventRow> for RsuVestingEvent {
    type Error = PersistenceError;

    fn try_from(row: VestingEventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            grant_id: row.grant_id,
            sequence: u32_from_column("sequence", row.sequence)?,
            vesting_date: date_from_text("vesting_date", &row.vesting_date)?,
            units_vesting: row.units_vesting,
            is_vested: row.is_vested != 0,
            vested_at: row
                .vested_at
                .as_deref()
                .map(|v| date_from_text("vested_at", v))
                .transpose()?,
        })
    }
}

/// Retrieves one grant.
///
/// # Errors
///
/// Returns `PersistenceError::GrantNotFound` if no row exists.
pub fn get_grant(conn: &mut SqliteConnection, grant_id: i64) -> Result<RsuGrant, PersistenceError> {
    let row: GrantRow = rsu_grants::table
        .filter(rsu_grants::grant_id.eq(grant_id))
        .select(GrantRow::as_select())
        .first::<GrantRow>(conn)
        .optional()?
        .ok_or(PersistenceError::GrantNotFound(grant_id))?;

    RsuGrant::try_from(row)
}

/// Retrieves the stored schedule of one grant, ordered by sequence.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_vesting_events(
    conn: &mut SqliteConnection,
    grant_id: i64,
) -> Result<Vec<RsuVestingEvent>, PersistenceError> {
    rsu_vesting_events::table
        .filter(rsu_vesting_events::grant_id.eq(grant_id))
        .order(rsu_vesting_events::sequence.asc())
        .select(VestingEventRow::as_select())
        .load::<VestingEventRow>(conn)?
        .into_iter()
        .map(RsuVestingEvent::try_from)
        .collect()
}

/// Retrieves every vesting event belonging to an `ACTIVE` grant.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_active_vesting_events(
    conn: &mut SqliteConnection,
) -> Result<Vec<RsuVestingEvent>, PersistenceError> {
    rsu_vesting_events::table
        .inner_join(rsu_grants::table)
        .filter(rsu_grants::status.eq(GrantStatus::Active.as_str()))
        .order((
            rsu_vesting_events::vesting_date.asc(),
            rsu_vesting_events::grant_id.asc(),
            rsu_vesting_events::sequence.asc(),
        ))
        .select(VestingEventRow::as_select())
        .load::<VestingEventRow>(conn)?
        .into_iter()
        .map(RsuVestingEvent::try_from)
        .collect()
}
