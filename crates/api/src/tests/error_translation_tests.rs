// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use comp_engine::CoreError;
use comp_engine_domain::{DomainError, RsuVestingEvent};
use comp_engine_persistence::PersistenceError;
use time::macros::date;

use crate::{
    ApiError, Notification, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

use super::helpers::dec;

#[test]
fn test_missing_band_is_a_rule_violation() {
    let err: ApiError = translate_domain_error(DomainError::NoEffectiveBand {
        band_code: String::from("P9"),
        on: date!(2025 - 04 - 01),
    });

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, ref message }
            if rule == "effective_band" && message.contains("P9")
    ));
}

#[test]
fn test_core_domain_violation_is_unwrapped() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::InvalidPeriod {
            period: String::from("25Q1"),
        },
    ));

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "period"
    ));
}

#[test]
fn test_arithmetic_overflow_is_invalid_input() {
    let err: ApiError = translate_core_error(CoreError::DomainViolation(
        DomainError::ArithmeticOverflow {
            operation: String::from("percent raise"),
        },
    ));

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, ref message }
            if field == "amount" && message.contains("percent raise")
    ));
}

#[test]
fn test_apply_in_progress_is_a_conflict() {
    let err: ApiError = translate_core_error(CoreError::ApplyInProgress { scenario_id: 3 });

    assert_eq!(
        err,
        ApiError::StateConflict {
            message: String::from("Scenario 3 is already being applied"),
        }
    );
}

#[test]
fn test_not_found_names_the_resource() {
    let err: ApiError = translate_persistence_error(PersistenceError::GrantNotFound(12));

    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Grant"),
            message: String::from("Grant 12 not found"),
        }
    );
}

#[test]
fn test_storage_failures_are_not_leaked() {
    let err: ApiError = translate_persistence_error(PersistenceError::QueryFailed(
        String::from("no such table: employees"),
    ));

    assert_eq!(
        err,
        ApiError::Internal {
            message: String::from("A storage error occurred"),
        }
    );
}

#[test]
fn test_stale_write_is_a_conflict() {
    let err: ApiError = translate_persistence_error(PersistenceError::EmployeeWriteFailed(2));

    assert!(matches!(err, ApiError::StateConflict { .. }));
}

#[test]
fn test_vesting_notification_wire_format() {
    let event: RsuVestingEvent = RsuVestingEvent {
        grant_id: 5,
        sequence: 2,
        vesting_date: date!(2025 - 04 - 15),
        units_vesting: 62,
        is_vested: false,
        vested_at: None,
    };

    let json: serde_json::Value =
        serde_json::to_value(Notification::vesting_upcoming(&event, 1)).unwrap();

    assert_eq!(json["type"], "VESTING_UPCOMING");
    assert_eq!(json["grant_id"], 5);
    assert_eq!(json["employee_id"], 1);
    assert_eq!(json["units_vesting"], 62);
}

#[test]
fn test_scenario_notification_round_trips() {
    let notification: Notification = Notification::ScenarioApplied {
        scenario_id: 4,
        name: String::from("FY25 P2 uplift"),
        affected_count: 2,
        delta: dec("380000.00"),
        applied_at: String::from("2025-04-01 09:30:00"),
    };

    let text: String = serde_json::to_string(&notification).unwrap();
    let parsed: Notification = serde_json::from_str(&text).unwrap();

    assert!(text.contains("\"type\":\"SCENARIO_APPLIED\""));
    assert_eq!(parsed, notification);
}
