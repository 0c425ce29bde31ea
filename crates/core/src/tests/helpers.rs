// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::CompensationSnapshot;
use comp_engine_audit::{Actor, Cause};
use comp_engine_domain::{
    BandCode, Employee, EmploymentType, Gender, RuleAction, RuleFilter, SalaryBand, Scenario,
    ScenarioRule, ScenarioStatus,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::date;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("hr-001"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Merit cycle"))
}

pub fn create_test_employee(id: i64, band: &str, department: &str, pay: &str) -> Employee {
    Employee {
        employee_id: id,
        name: format!("Employee {id}"),
        band: BandCode::new(band),
        annual_fixed: dec(pay),
        gender: if id % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        },
        date_of_joining: date!(2021 - 01 - 04),
        department: department.to_string(),
        employment_type: EmploymentType::FullTime,
        performance_rating: Some(dec("3.5")),
        compa_ratio: None,
    }
}

pub fn create_test_bands() -> Vec<SalaryBand> {
    vec![
        SalaryBand::new(
            BandCode::new("P1"),
            dec("1000000"),
            dec("1300000"),
            dec("1600000"),
            date!(2024 - 01 - 01),
        )
        .unwrap(),
        SalaryBand::new(
            BandCode::new("P2"),
            dec("1400000"),
            dec("1900000"),
            dec("2400000"),
            date!(2024 - 01 - 01),
        )
        .unwrap(),
    ]
}

pub fn create_test_snapshot() -> CompensationSnapshot {
    CompensationSnapshot::new(
        date!(2025 - 04 - 01),
        vec![
            create_test_employee(1, "P2", "Engineering", "2000000"),
            create_test_employee(2, "P2", "Sales", "1800000"),
            create_test_employee(3, "P1", "Engineering", "1200000"),
            create_test_employee(4, "P1", "Finance", "1300000"),
        ],
        create_test_bands(),
    )
}

pub fn create_test_scenario(rules: Vec<ScenarioRule>) -> Scenario {
    Scenario {
        scenario_id: 11,
        name: String::from("Merit 2025"),
        description: None,
        rules,
        status: ScenarioStatus::Draft,
        applied_at: None,
    }
}

pub fn band_rule(band: &str, action: RuleAction) -> ScenarioRule {
    ScenarioRule {
        filter: RuleFilter {
            band: Some(BandCode::new(band)),
            ..RuleFilter::default()
        },
        action,
    }
}

pub fn department_rule(department: &str, action: RuleAction) -> ScenarioRule {
    ScenarioRule {
        filter: RuleFilter {
            department: Some(department.to_string()),
            ..RuleFilter::default()
        },
        action,
    }
}
