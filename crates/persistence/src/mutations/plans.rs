// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commission plan and achievement mutations.

use comp_engine::AchievementRecord;
use comp_engine_domain::{CommissionAchievement, CommissionPlan};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{commission_achievements, commission_plans};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;

/// Inserts a commission plan.
///
/// # Returns
///
/// The plan ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_plan(
    conn: &mut SqliteConnection,
    plan: &CommissionPlan,
) -> Result<i64, PersistenceError> {
    let tiers_json: String = serde_json::to_string(&plan.accelerator_tiers)?;
    let eligibility_json: String = serde_json::to_string(&plan.eligibility)?;

    diesel::insert_into(commission_plans::table)
        .values((
            commission_plans::name.eq(&plan.name),
            commission_plans::target_variable_percent.eq(plan.target_variable_percent.to_string()),
            commission_plans::plan_type.eq(plan.plan_type.as_str()),
            commission_plans::accelerator_tiers_json.eq(tiers_json),
            commission_plans::eligibility_json.eq(eligibility_json),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Persists an achievement and its audit event in one transaction.
///
/// # Returns
///
/// The achievement with its assigned identifier.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateAchievement` if the employee already
/// has an achievement for the plan and period.
pub fn persist_achievement(
    conn: &mut SqliteConnection,
    record: &AchievementRecord,
) -> Result<CommissionAchievement, PersistenceError> {
    let achievement: &CommissionAchievement = &record.achievement;

    conn.transaction::<CommissionAchievement, PersistenceError, _>(|conn| {
        let inserted: Result<usize, DieselError> =
            diesel::insert_into(commission_achievements::table)
                .values((
                    commission_achievements::employee_id.eq(achievement.employee_id),
                    commission_achievements::plan_id.eq(achievement.plan_id),
                    commission_achievements::period.eq(&achievement.period),
                    commission_achievements::target_amount.eq(achievement.target_amount.to_string()),
                    commission_achievements::achieved_amount
                        .eq(achievement.achieved_amount.to_string()),
                    commission_achievements::achievement_percent
                        .eq(achievement.achievement_percent.to_string()),
                    commission_achievements::multiplier.eq(achievement.multiplier.to_string()),
                    commission_achievements::payout_amount.eq(achievement.payout_amount.to_string()),
                ))
                .execute(conn);

        match inserted {
            Ok(_) => {}
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                return Err(PersistenceError::DuplicateAchievement {
                    employee_id: achievement.employee_id,
                    plan_id: achievement.plan_id,
                    period: achievement.period.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        let achievement_id: i64 = get_last_insert_rowid(conn)?;
        persist_audit_event(conn, &record.audit_event)?;

        info!(
            achievement_id,
            employee_id = achievement.employee_id,
            plan_id = achievement.plan_id,
            period = %achievement.period,
            "Persisted commission achievement"
        );

        let mut stored: CommissionAchievement = achievement.clone();
        stored.achievement_id = Some(achievement_id);
        Ok(stored)
    })
}
