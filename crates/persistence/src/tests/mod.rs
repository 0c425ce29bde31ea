// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod scenario_commit_tests;

use crate::Persistence;
use comp_engine_audit::{Actor, Cause};
use comp_engine_domain::{
    BandCode, Employee, EmploymentType, Gender, RuleAction, RuleFilter, SalaryBand, ScenarioRule,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::date;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_employee(id: i64, band: &str, department: &str, pay: &str) -> Employee {
    Employee {
        employee_id: id,
        name: format!("Employee {id}"),
        band: BandCode::new(band),
        annual_fixed: dec(pay),
        gender: Gender::Female,
        date_of_joining: date!(2020 - 06 - 01),
        department: department.to_string(),
        employment_type: EmploymentType::FullTime,
        performance_rating: Some(dec("4.0")),
        compa_ratio: None,
    }
}

pub fn create_test_band(code: &str, min: &str, mid: &str, max: &str) -> SalaryBand {
    SalaryBand::new(
        BandCode::new(code),
        dec(min),
        dec(mid),
        dec(max),
        date!(2024 - 01 - 01),
    )
    .unwrap()
}

pub fn create_test_rules() -> Vec<ScenarioRule> {
    vec![ScenarioRule {
        filter: RuleFilter {
            band: Some(BandCode::new("P2")),
            ..RuleFilter::default()
        },
        action: RuleAction::RaisePercent(dec("10")),
    }]
}

/// A store holding two P2 employees, one P1 employee and both bands.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .insert_band(&create_test_band("P1", "1000000", "1300000", "1600000"))
        .unwrap();
    persistence
        .insert_band(&create_test_band("P2", "1400000", "1900000", "2400000"))
        .unwrap();
    for employee in [
        create_test_employee(1, "P2", "Engineering", "2000000"),
        create_test_employee(2, "P2", "Sales", "1800000"),
        create_test_employee(3, "P1", "Engineering", "1200000"),
    ] {
        persistence.insert_employee(&employee).unwrap();
    }
    persistence
}
