// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, dec};
use crate::{CoreError, VestingIssuance, issue_vesting_schedule};
use comp_engine_audit::AuditSubject;
use comp_engine_domain::{DomainError, EnginePolicy, GrantStatus, RsuGrant};
use time::macros::date;

fn create_test_grant(status: GrantStatus) -> RsuGrant {
    RsuGrant {
        grant_id: 21,
        employee_id: 1,
        grant_date: date!(2024 - 01 - 15),
        total_units: 1000,
        cliff_months: 12,
        vesting_schedule_months: 48,
        price_at_grant: dec("100"),
        current_price: dec("120"),
        status,
    }
}

#[test]
fn test_issue_generates_full_schedule() {
    let grant: RsuGrant = create_test_grant(GrantStatus::Active);

    let issuance: VestingIssuance = issue_vesting_schedule(
        &grant,
        date!(2025 - 04 - 01),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(issuance.events.len(), 13);
    assert_eq!(
        issuance.events.iter().map(|e| e.units_vesting).sum::<i64>(),
        1000
    );
    assert_eq!(issuance.events[0].units_vesting, 250);
    assert!(issuance.events[0].is_vested);
    assert!(!issuance.events[1].is_vested);
}

#[test]
fn test_issue_emits_grant_audit_event() {
    let grant: RsuGrant = create_test_grant(GrantStatus::Active);

    let issuance: VestingIssuance = issue_vesting_schedule(
        &grant,
        date!(2024 - 01 - 15),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(issuance.audit_event.action.name, "IssueVestingSchedule");
    assert_eq!(issuance.audit_event.subject, AuditSubject::Grant(21));
    assert_eq!(
        issuance.audit_event.after.data,
        "grant_id=21,events=13,total_units=1000"
    );
}

#[test]
fn test_cancelled_grant_is_rejected() {
    let grant: RsuGrant = create_test_grant(GrantStatus::Cancelled);

    let result: Result<VestingIssuance, CoreError> = issue_vesting_schedule(
        &grant,
        date!(2025 - 04 - 01),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::GrantNotActive { grant_id: 21, .. }))
    ));
}

#[test]
fn test_invalid_grant_is_rejected() {
    let mut grant: RsuGrant = create_test_grant(GrantStatus::Active);
    grant.cliff_months = 60;

    let result: Result<VestingIssuance, CoreError> = issue_vesting_schedule(
        &grant,
        date!(2025 - 04 - 01),
        &EnginePolicy::default(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidGrant { .. }))
    ));
}
