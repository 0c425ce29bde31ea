// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scenario queries.

use comp_engine_domain::{Scenario, ScenarioRule};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::enum_from_text;
use crate::diesel_schema::scenarios;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = scenarios)]
struct ScenarioRow {
    scenario_id: i64,
    name: String,
    description: Option<String>,
    rules_json: String,
    status: String,
    applied_at: Option<String>,
}

impl TryFrom<ScenarioRow> for Scenario {
    type Error = PersistenceError;

    fn try_from(row: ScenarioRow) -> Result<Self, Self::Error> {
        let rules: Vec<ScenarioRule> = serde_json::from_str(&row.rules_json)?;

        Ok(Self {
            scenario_id: row.scenario_id,
            name: row.name,
            description: row.description,
            rules,
            status: enum_from_text("status", &row.status)?,
            applied_at: row.applied_at,
        })
    }
}

/// Retrieves one scenario.
///
/// # Errors
///
/// Returns `PersistenceError::ScenarioNotFound` if no row exists.
pub fn get_scenario(
    conn: &mut SqliteConnection,
    scenario_id: i64,
) -> Result<Scenario, PersistenceError> {
    let row: ScenarioRow = scenarios::table
        .filter(scenarios::scenario_id.eq(scenario_id))
        .select(ScenarioRow::as_select())
        .first::<ScenarioRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ScenarioNotFound(scenario_id))?;

    Scenario::try_from(row)
}

/// Retrieves every scenario ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_scenarios(conn: &mut SqliteConnection) -> Result<Vec<Scenario>, PersistenceError> {
    scenarios::table
        .order(scenarios::scenario_id.asc())
        .select(ScenarioRow::as_select())
        .load::<ScenarioRow>(conn)?
        .into_iter()
        .map(Scenario::try_from)
        .collect()
}
