// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commission plan and achievement queries.

use comp_engine_domain::{
    AcceleratorTier, CommissionAchievement, CommissionPlan, EligibilityCriterion,
};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{decimal_from_text, enum_from_text};
use crate::diesel_schema::{commission_achievements, commission_plans};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = commission_plans)]
struct PlanRow {
    plan_id: i64,
    name: String,
    target_variable_percent: String,
    plan_type: String,
    accelerator_tiers_json: String,
    eligibility_json: String,
}

impl TryFrom<PlanRow> for CommissionPlan {
    type Error = PersistenceError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let accelerator_tiers: Vec<AcceleratorTier> =
            serde_json::from_str(&row.accelerator_tiers_json)?;
        let eligibility: Vec<EligibilityCriterion> = serde_json::from_str(&row.eligibility_json)?;

        Ok(Self {
            plan_id: row.plan_id,
            name: row.name,
            target_variable_percent: decimal_from_text(
                "target_variable_percent",
                &row.target_variable_percent,
            )?,
            plan_type: enum_from_text("plan_type", &row.plan_type)?,
            accelerator_tiers,
            eligibility,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = commission_achievements)]
struct AchievementRow {
    achievement_id: i64,
    employee_id: i64,
    plan_id: i64,
    period: String,
    target_amount: String,
    achieved_amount: String,
    achievement_percent: String,
    multiplier: String,
    payout_amount: String,
}

impl TryFrom<AchievementRow> for CommissionAchievement {
    type Error = PersistenceError;

    fn try_from(row: AchievementRow) -> Result<Self, Self::Error> {
        Ok(Self {
            achievement_id: Some(row.achievement_id),
            employee_id: row.employee_id,
            plan_id: row.plan_id,
            target_amount: decimal_from_text("target_amount", &row.target_amount)?,
            achieved_amount: decimal_from_text("achieved_amount", &row.achieved_amount)?,
            achievement_percent: decimal_from_text(
                "achievement_percent",
                &row.achievement_percent,
            )?,
            multiplier: decimal_from_text("multiplier", &row.multiplier)?,
            payout_amount: decimal_from_text("payout_amount", &row.payout_amount)?,
            period: row.period,
        })
    }
}

/// Retrieves one commission plan.
///
/// # Errors
///
/// Returns `PersistenceError::PlanNotFound` if no row exists.
pub fn get_plan(
    conn: &mut SqliteConnection,
    plan_id: i64,
) -> Result<CommissionPlan, PersistenceError> {
    let row: PlanRow = commission_plans::table
        .filter(commission_plans::plan_id.eq(plan_id))
        .select(PlanRow::as_select())
        .first::<PlanRow>(conn)
        .optional()?
        .ok_or(PersistenceError::PlanNotFound(plan_id))?;

    CommissionPlan::try_from(row)
}

/// Retrieves every achievement recorded for an employee, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_achievements_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<CommissionAchievement>, PersistenceError> {
    commission_achievements::table
        .filter(commission_achievements::employee_id.eq(employee_id))
        .order(commission_achievements::achievement_id.asc())
        .select(AchievementRow::as_select())
        .load::<AchievementRow>(conn)?
        .into_iter()
        .map(CommissionAchievement::try_from)
        .collect()
}
