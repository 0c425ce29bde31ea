// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    create_seeded_persistence, create_test_actor, create_test_cause, create_test_rules, dec,
};
use crate::{CommittedApplication, Persistence, PersistenceError};
use comp_engine::{CompensationSnapshot, ScenarioApplication, apply_scenario};
use comp_engine_audit::AuditSubject;
use comp_engine_domain::{EnginePolicy, Scenario, ScenarioStatus};
use time::macros::date;

fn prepare(persistence: &mut Persistence) -> (Scenario, ScenarioApplication) {
    let scenario: Scenario = persistence
        .insert_scenario("Merit 2025", Some("P2 uplift"), &create_test_rules())
        .unwrap();
    let snapshot: CompensationSnapshot = persistence.load_snapshot(date!(2025 - 04 - 01)).unwrap();
    let application: ScenarioApplication = apply_scenario(
        &scenario,
        &snapshot,
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    (scenario, application)
}

#[test]
fn test_inserted_scenario_is_draft() {
    let mut persistence: Persistence = create_seeded_persistence();

    let scenario: Scenario = persistence
        .insert_scenario("Merit 2025", None, &create_test_rules())
        .unwrap();

    assert_eq!(scenario.status, ScenarioStatus::Draft);
    assert_eq!(scenario.applied_at, None);
    assert_eq!(scenario.rules, create_test_rules());
    assert_eq!(
        persistence.get_scenario(scenario.scenario_id).unwrap(),
        scenario
    );
}

#[test]
fn test_commit_writes_status_pay_and_audit() {
    let mut persistence: Persistence = create_seeded_persistence();
    let (scenario, application) = prepare(&mut persistence);

    let committed: CommittedApplication = persistence
        .commit_scenario_application(&application)
        .unwrap();

    let stored: Scenario = persistence.get_scenario(scenario.scenario_id).unwrap();
    assert_eq!(stored.status, ScenarioStatus::Applied);
    assert_eq!(stored.applied_at, Some(committed.applied_at.clone()));
    assert!(!committed.applied_at.is_empty());

    assert_eq!(persistence.get_employee(1).unwrap().annual_fixed, dec("2200000"));
    assert_eq!(persistence.get_employee(1).unwrap().compa_ratio, Some(116));
    assert_eq!(persistence.get_employee(2).unwrap().annual_fixed, dec("1980000"));
    assert_eq!(persistence.get_employee(3).unwrap().annual_fixed, dec("1200000"));

    assert!(committed.audit_event.event_id.is_some());
    assert_eq!(
        committed.audit_event.subject,
        AuditSubject::Scenario(scenario.scenario_id)
    );
}

#[test]
fn test_second_commit_is_rejected_and_pay_updated_once() {
    let mut persistence: Persistence = create_seeded_persistence();
    let (scenario, application) = prepare(&mut persistence);

    persistence
        .commit_scenario_application(&application)
        .unwrap();
    let second: Result<CommittedApplication, PersistenceError> =
        persistence.commit_scenario_application(&application);

    assert_eq!(
        second,
        Err(PersistenceError::ScenarioNotDraft(scenario.scenario_id))
    );
    assert_eq!(persistence.get_employee(1).unwrap().annual_fixed, dec("2200000"));
    assert_eq!(persistence.get_audit_timeline(None).unwrap().len(), 1);
}

#[test]
fn test_failed_employee_write_rolls_everything_back() {
    let mut persistence: Persistence = create_seeded_persistence();
    let (scenario, application) = prepare(&mut persistence);

    // Built from a snapshot taken before employee 2's pay last changed.
    let mut stale: ScenarioApplication = application.clone();
    stale.updates[1].previous_annual_fixed = dec("1799999");

    let result: Result<CommittedApplication, PersistenceError> =
        persistence.commit_scenario_application(&stale);

    assert_eq!(result, Err(PersistenceError::EmployeeWriteFailed(2)));
    let stored: Scenario = persistence.get_scenario(scenario.scenario_id).unwrap();
    assert_eq!(stored.status, ScenarioStatus::Draft);
    assert_eq!(stored.applied_at, None);
    assert_eq!(persistence.get_employee(1).unwrap().annual_fixed, dec("2000000"));
    assert!(persistence.get_audit_timeline(None).unwrap().is_empty());

    // The untouched application still commits afterwards.
    assert!(persistence.commit_scenario_application(&application).is_ok());
}

#[test]
fn test_commit_for_missing_scenario_is_not_found() {
    let mut persistence: Persistence = create_seeded_persistence();
    let (_, mut application) = prepare(&mut persistence);
    application.scenario.scenario_id = 404;

    assert_eq!(
        persistence.commit_scenario_application(&application),
        Err(PersistenceError::ScenarioNotFound(404))
    );
}
