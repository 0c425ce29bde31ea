// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use comp_engine_audit::{AuditEvent, AuditSubject};
use comp_engine_domain::{
    AcceleratorTier, CommissionPlan, EligibilityCriterion, EnginePolicy, PayoutResult, PlanType,
};
use comp_engine_persistence::Persistence;
use time::macros::date;

use crate::{
    AchievementResponse, ApiError, CreatePlanRequest, PayoutRequest, RecordAchievementRequest,
    calculate_plan_payout, create_plan, get_audit_timeline, record_achievement,
};

use super::helpers::{create_seeded_persistence, create_test_actor, create_test_cause, dec};

fn tier(threshold: &str, multiplier: &str) -> AcceleratorTier {
    AcceleratorTier {
        threshold: dec(threshold),
        multiplier: dec(multiplier),
    }
}

fn create_plan_request(eligibility: Vec<EligibilityCriterion>) -> CreatePlanRequest {
    CreatePlanRequest {
        name: String::from("Field Sales FY25"),
        target_variable_percent: dec("20"),
        plan_type: PlanType::Sales,
        accelerator_tiers: vec![tier("80", "0.8"), tier("100", "1.0"), tier("120", "1.3")],
        eligibility,
    }
}

fn achievement_request(plan_id: i64, period: &str, achieved: &str) -> RecordAchievementRequest {
    RecordAchievementRequest {
        employee_id: 2,
        plan_id,
        period: period.to_string(),
        achieved_amount: dec(achieved),
        target_amount: None,
        on: Some(date!(2025 - 04 - 01)),
    }
}

fn record(
    persistence: &mut Persistence,
    request: &RecordAchievementRequest,
) -> Result<AchievementResponse, ApiError> {
    record_achievement(
        persistence,
        &EnginePolicy::default(),
        request,
        date!(2025 - 04 - 01),
        create_test_actor(),
        create_test_cause(),
    )
}

#[test]
fn test_payout_preview_selects_tier() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(&mut persistence, &create_plan_request(vec![])).unwrap();

    let at_95: PayoutResult = calculate_plan_payout(
        &mut persistence,
        &EnginePolicy::default(),
        plan.plan_id,
        &PayoutRequest {
            achieved_amount: dec("95000"),
            target_amount: dec("100000"),
        },
    )
    .unwrap();
    let at_150: PayoutResult = calculate_plan_payout(
        &mut persistence,
        &EnginePolicy::default(),
        plan.plan_id,
        &PayoutRequest {
            achieved_amount: dec("150000"),
            target_amount: dec("100000"),
        },
    )
    .unwrap();

    assert_eq!(at_95.multiplier, dec("0.8"));
    assert_eq!(at_95.payout_amount, dec("80000"));
    assert_eq!(at_150.applied_tier, Some(tier("120", "1.3")));
    assert_eq!(at_150.payout_amount, dec("130000"));
}

#[test]
fn test_payout_preview_rejects_zero_target() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(&mut persistence, &create_plan_request(vec![])).unwrap();

    let result = calculate_plan_payout(
        &mut persistence,
        &EnginePolicy::default(),
        plan.plan_id,
        &PayoutRequest {
            achieved_amount: dec("1000"),
            target_amount: dec("0"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "target_amount"
    ));
}

#[test]
fn test_payout_preview_rejects_overflowing_amounts() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(&mut persistence, &create_plan_request(vec![])).unwrap();

    let result = calculate_plan_payout(
        &mut persistence,
        &EnginePolicy::default(),
        plan.plan_id,
        &PayoutRequest {
            achieved_amount: dec("70000000000000000000000000000"),
            target_amount: dec("0.01"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "amount"
    ));
}

#[test]
fn test_payout_preview_for_unknown_plan() {
    let mut persistence: Persistence = create_seeded_persistence();

    let result = calculate_plan_payout(
        &mut persistence,
        &EnginePolicy::default(),
        77,
        &PayoutRequest {
            achieved_amount: dec("1000"),
            target_amount: dec("1000"),
        },
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_create_plan_rejects_unordered_tiers() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut request: CreatePlanRequest = create_plan_request(vec![]);
    request.accelerator_tiers = vec![tier("100", "1.0"), tier("80", "0.8")];

    assert!(matches!(
        create_plan(&mut persistence, &request),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "accelerator_tiers"
    ));
}

#[test]
fn test_create_plan_rejects_blank_name() {
    let mut persistence: Persistence = create_seeded_persistence();
    let mut request: CreatePlanRequest = create_plan_request(vec![]);
    request.name = String::from(" ");

    assert!(matches!(
        create_plan(&mut persistence, &request),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_record_achievement_derives_target_from_pay() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(&mut persistence, &create_plan_request(vec![])).unwrap();

    let response: AchievementResponse = record(
        &mut persistence,
        &achievement_request(plan.plan_id, "2025-Q1", "108000"),
    )
    .unwrap();

    assert_eq!(response.achievement.target_amount, dec("90000"));
    assert_eq!(response.payout.achievement_percent, dec("120"));
    assert_eq!(response.payout.multiplier, dec("1.3"));
    assert_eq!(response.achievement.payout_amount, dec("117000"));
    assert!(response.achievement.achievement_id.is_some());

    let timeline: Vec<AuditEvent> =
        get_audit_timeline(&mut persistence, Some(AuditSubject::Employee(2))).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].action.name, "RecordCommissionAchievement");
}

#[test]
fn test_record_achievement_requires_eligibility() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(
        &mut persistence,
        &create_plan_request(vec![EligibilityCriterion::MinBandLevel(3)]),
    )
    .unwrap();

    let result = record(
        &mut persistence,
        &achievement_request(plan.plan_id, "2025-Q1", "108000"),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "plan_eligibility"
    ));
    assert!(get_audit_timeline(&mut persistence, None).unwrap().is_empty());
}

#[test]
fn test_record_achievement_rejects_malformed_period() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(&mut persistence, &create_plan_request(vec![])).unwrap();

    let result = record(
        &mut persistence,
        &achievement_request(plan.plan_id, "2025-Q5", "108000"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "period"
    ));
}

#[test]
fn test_second_achievement_for_period_is_a_conflict() {
    let mut persistence: Persistence = create_seeded_persistence();
    let plan: CommissionPlan = create_plan(&mut persistence, &create_plan_request(vec![])).unwrap();
    record(
        &mut persistence,
        &achievement_request(plan.plan_id, "2025-03", "30000"),
    )
    .unwrap();

    let result = record(
        &mut persistence,
        &achievement_request(plan.plan_id, "2025-03", "45000"),
    );

    assert!(matches!(result, Err(ApiError::StateConflict { .. })));
    assert_eq!(get_audit_timeline(&mut persistence, None).unwrap().len(), 1);
}
