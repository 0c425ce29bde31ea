// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BandCode, DomainError, Employee, EmploymentType, Gender, GrantStatus, PlanType, SalaryBand,
    ScenarioStatus,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::date;

#[test]
fn test_band_code_normalized_to_uppercase() {
    let lower: BandCode = BandCode::new(" p2 ");
    let upper: BandCode = BandCode::new("P2");

    assert_eq!(lower.value(), "P2");
    assert_eq!(lower, upper);
}

#[test]
fn test_band_code_level() {
    assert_eq!(BandCode::new("P3").level(), Some(3));
    assert_eq!(BandCode::new("M10").level(), Some(10));
    assert_eq!(BandCode::new("EXEC").level(), None);
    assert_eq!(BandCode::new("").level(), None);
}

#[test]
fn test_enum_round_trip_through_persisted_form() {
    for gender in [
        Gender::Male,
        Gender::Female,
        Gender::NonBinary,
        Gender::Undisclosed,
    ] {
        assert_eq!(Gender::from_str(gender.as_str()).unwrap(), gender);
    }
    for kind in [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Intern,
    ] {
        assert_eq!(EmploymentType::from_str(kind.as_str()).unwrap(), kind);
    }
    for status in [
        GrantStatus::Active,
        GrantStatus::Cancelled,
        GrantStatus::FullyVested,
    ] {
        assert_eq!(GrantStatus::from_str(status.as_str()).unwrap(), status);
    }
    for plan_type in [PlanType::Sales, PlanType::Performance, PlanType::Hybrid] {
        assert_eq!(PlanType::from_str(plan_type.as_str()).unwrap(), plan_type);
    }
    for status in [ScenarioStatus::Draft, ScenarioStatus::Applied] {
        assert_eq!(ScenarioStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_unknown_enum_value_rejected() {
    let result: Result<Gender, DomainError> = Gender::from_str("male");
    assert!(matches!(
        result,
        Err(DomainError::InvalidEnumValue { kind: "gender", .. })
    ));
}

#[test]
fn test_salary_band_new_validates_range() {
    let ok: Result<SalaryBand, DomainError> = SalaryBand::new(
        BandCode::new("P2"),
        Decimal::from(1_400_000),
        Decimal::from(1_900_000),
        Decimal::from(2_400_000),
        date!(2025 - 01 - 01),
    );
    assert!(ok.is_ok());

    let inverted: Result<SalaryBand, DomainError> = SalaryBand::new(
        BandCode::new("P2"),
        Decimal::from(2_000_000),
        Decimal::from(1_900_000),
        Decimal::from(2_400_000),
        date!(2025 - 01 - 01),
    );
    assert!(matches!(
        inverted,
        Err(DomainError::InvalidBandRange { .. })
    ));
}

#[test]
fn test_employee_wire_format() {
    let json: &str = r#"{
        "employee_id": 12,
        "name": "Priya Nair",
        "band": "p2",
        "annual_fixed": "1900000.00",
        "gender": "FEMALE",
        "date_of_joining": "2021-04-01",
        "department": "Engineering"
    }"#;
    let employee: Employee = serde_json::from_str(json).unwrap();

    assert_eq!(employee.band, BandCode::new("P2"));
    assert_eq!(employee.annual_fixed, Decimal::from(1_900_000));
    assert_eq!(employee.date_of_joining, date!(2021 - 04 - 01));
    assert_eq!(employee.employment_type, EmploymentType::FullTime);
    assert_eq!(employee.performance_rating, None);
    assert_eq!(employee.compa_ratio, None);

    let value: serde_json::Value = serde_json::to_value(&employee).unwrap();
    assert_eq!(value["gender"], "FEMALE");
    assert_eq!(value["employment_type"], "FULL_TIME");
    assert_eq!(value["date_of_joining"], "2021-04-01");
}
