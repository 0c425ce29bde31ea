// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::str::FromStr;

use comp_engine_audit::{Actor, Cause};
use comp_engine_domain::{BandCode, EmploymentType, Gender, RuleAction, RuleFilter, ScenarioRule};
use comp_engine_persistence::Persistence;
use rust_decimal::Decimal;
use time::macros::date;

use crate::{CreateBandRequest, CreateEmployeeRequest, create_band, create_employee};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("hr-ops-7"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_employee_request(
    employee_id: i64,
    band: &str,
    department: &str,
    pay: &str,
) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        employee_id,
        name: format!("Employee {employee_id}"),
        band: band.to_string(),
        annual_fixed: dec(pay),
        gender: if employee_id % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        },
        date_of_joining: date!(2021 - 01 - 04),
        department: department.to_string(),
        employment_type: EmploymentType::FullTime,
        performance_rating: Some(dec("3.5")),
    }
}

pub fn create_band_request(code: &str, min: &str, mid: &str, max: &str) -> CreateBandRequest {
    CreateBandRequest {
        band_code: code.to_string(),
        min_salary: dec(min),
        mid_salary: dec(mid),
        max_salary: dec(max),
        effective_date: date!(2024 - 01 - 01),
        job_area_id: None,
    }
}

/// Seeds P1 and P2 bands and four employees into an existing store.
pub fn seed(persistence: &mut Persistence) {
    create_band(
        persistence,
        &create_band_request("P1", "1000000", "1300000", "1600000"),
    )
    .unwrap();
    create_band(
        persistence,
        &create_band_request("P2", "1400000", "1900000", "2400000"),
    )
    .unwrap();
    for request in [
        create_employee_request(1, "P2", "Engineering", "2000000"),
        create_employee_request(2, "P2", "Sales", "1800000"),
        create_employee_request(3, "P1", "Engineering", "1200000"),
        create_employee_request(4, "P1", "Finance", "1300000"),
    ] {
        create_employee(persistence, &request).unwrap();
    }
}

pub fn create_seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    seed(&mut persistence);
    persistence
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
