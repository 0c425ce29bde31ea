// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    band_rule, create_test_actor, create_test_cause, create_test_scenario, create_test_snapshot,
    dec, department_rule,
};
use crate::{CoreError, EmployeePayUpdate, ScenarioApplication, apply_scenario};
use comp_engine_audit::{AuditEvent, AuditSubject};
use comp_engine_domain::{EnginePolicy, RuleAction, Scenario, ScenarioStatus};

#[test]
fn test_apply_produces_updates_for_affected_employees() {
    let scenario: Scenario = create_test_scenario(vec![
        band_rule("P2", RuleAction::RaisePercent(dec("10"))),
        department_rule("Engineering", RuleAction::RaiseFlat(dec("50000"))),
    ]);

    let application: ScenarioApplication = apply_scenario(
        &scenario,
        &create_test_snapshot(),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(application.scenario.status, ScenarioStatus::Applied);
    assert_eq!(application.updates.len(), 3);

    let first: &EmployeePayUpdate = &application.updates[0];
    assert_eq!(first.employee_id, 1);
    assert_eq!(first.previous_annual_fixed, dec("2000000"));
    assert_eq!(first.annual_fixed, dec("2050000"));
    // 2,050,000 / 1,900,000 = 107.9
    assert_eq!(first.compa_ratio, Some(108));
}

#[test]
fn test_apply_emits_one_audit_event() {
    let scenario: Scenario =
        create_test_scenario(vec![band_rule("P1", RuleAction::SetToBenchmark)]);

    let application: ScenarioApplication = apply_scenario(
        &scenario,
        &create_test_snapshot(),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let event: &AuditEvent = &application.audit_event;
    assert_eq!(event.action.name, "ApplyScenario");
    assert_eq!(event.subject, AuditSubject::Scenario(11));
    assert_eq!(event.actor.id, "hr-001");
    assert_eq!(event.cause.id, "req-456");
    assert_eq!(event.before.data, "status=DRAFT,affected=1,cost=1200000");
    assert_eq!(event.after.data, "status=APPLIED,affected=1,cost=1300000");
    assert_eq!(event.event_id, None);
}

#[test]
fn test_apply_does_not_modify_input_scenario() {
    let scenario: Scenario =
        create_test_scenario(vec![band_rule("P1", RuleAction::SetToBenchmark)]);

    let application: ScenarioApplication = apply_scenario(
        &scenario,
        &create_test_snapshot(),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(scenario.status, ScenarioStatus::Draft);
    assert_eq!(application.scenario.rules, scenario.rules);
    assert_eq!(application.run.affected_count, application.updates.len());
}

#[test]
fn test_applied_scenario_cannot_be_applied_again() {
    let mut scenario: Scenario =
        create_test_scenario(vec![band_rule("P1", RuleAction::SetToBenchmark)]);
    scenario.status = ScenarioStatus::Applied;

    let result: Result<ScenarioApplication, CoreError> = apply_scenario(
        &scenario,
        &create_test_snapshot(),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::ScenarioAlreadyApplied { scenario_id: 11 })
    );
}

#[test]
fn test_apply_with_no_affected_employees_still_transitions() {
    let scenario: Scenario =
        create_test_scenario(vec![department_rule("Legal", RuleAction::RaiseFlat(dec("1")))]);

    let application: ScenarioApplication = apply_scenario(
        &scenario,
        &create_test_snapshot(),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(application.updates.is_empty());
    assert_eq!(application.scenario.status, ScenarioStatus::Applied);
}
