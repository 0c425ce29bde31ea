// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BandCode, DomainError, Employee, EmploymentType, Gender, GrantStatus, RsuGrant, SalaryBand,
    validate_band, validate_employee, validate_grant,
};
use rust_decimal::Decimal;
use time::macros::date;

fn create_test_employee() -> Employee {
    Employee {
        employee_id: 1,
        name: String::from("Test Employee"),
        band: BandCode::new("P2"),
        annual_fixed: Decimal::from(1_900_000),
        gender: Gender::Female,
        date_of_joining: date!(2022 - 02 - 01),
        department: String::from("Engineering"),
        employment_type: EmploymentType::FullTime,
        performance_rating: Some(Decimal::new(40, 1)),
        compa_ratio: None,
    }
}

fn create_test_band(min: i64, mid: i64, max: i64) -> SalaryBand {
    SalaryBand {
        band_id: None,
        band_code: BandCode::new("P2"),
        min_salary: Decimal::from(min),
        mid_salary: Decimal::from(mid),
        max_salary: Decimal::from(max),
        effective_date: date!(2025 - 01 - 01),
        job_area_id: None,
    }
}

fn create_test_grant() -> RsuGrant {
    RsuGrant {
        grant_id: 1,
        employee_id: 1,
        grant_date: date!(2025 - 01 - 01),
        total_units: 1000,
        cliff_months: 12,
        vesting_schedule_months: 48,
        price_at_grant: Decimal::from(10),
        current_price: Decimal::from(12),
        status: GrantStatus::Active,
    }
}

#[test]
fn test_validate_employee_accepts_valid_employee() {
    let result: Result<(), DomainError> = validate_employee(&create_test_employee());
    assert!(result.is_ok());
}

#[test]
fn test_validate_employee_rejects_empty_name() {
    let mut employee: Employee = create_test_employee();
    employee.name = String::from("  ");
    let result: Result<(), DomainError> = validate_employee(&employee);
    assert!(matches!(result, Err(DomainError::InvalidEmployee { .. })));
}

#[test]
fn test_validate_employee_rejects_negative_pay() {
    let mut employee: Employee = create_test_employee();
    employee.annual_fixed = Decimal::from(-1);
    assert!(validate_employee(&employee).is_err());
}

#[test]
fn test_validate_employee_rejects_out_of_scale_rating() {
    let mut employee: Employee = create_test_employee();
    employee.performance_rating = Some(Decimal::new(51, 1));
    assert!(validate_employee(&employee).is_err());

    employee.performance_rating = Some(Decimal::new(5, 1));
    assert!(validate_employee(&employee).is_err());

    employee.performance_rating = Some(Decimal::from(5));
    assert!(validate_employee(&employee).is_ok());
}

#[test]
fn test_validate_band_accepts_strict_range() {
    assert!(validate_band(&create_test_band(0, 1, 2)).is_ok());
}

#[test]
fn test_validate_band_rejects_equal_bounds() {
    assert!(matches!(
        validate_band(&create_test_band(100, 100, 200)),
        Err(DomainError::InvalidBandRange { .. })
    ));
    assert!(matches!(
        validate_band(&create_test_band(100, 200, 200)),
        Err(DomainError::InvalidBandRange { .. })
    ));
}

#[test]
fn test_validate_band_rejects_negative_min() {
    assert!(validate_band(&create_test_band(-1, 100, 200)).is_err());
}

#[test]
fn test_validate_band_rejects_empty_code() {
    let mut band: SalaryBand = create_test_band(0, 1, 2);
    band.band_code = BandCode::new("   ");
    assert!(matches!(
        validate_band(&band),
        Err(DomainError::InvalidBandCode(_))
    ));
}

#[test]
fn test_validate_grant() {
    assert!(validate_grant(&create_test_grant()).is_ok());

    let mut grant: RsuGrant = create_test_grant();
    grant.cliff_months = 49;
    assert!(matches!(
        validate_grant(&grant),
        Err(DomainError::InvalidGrant { .. })
    ));

    let mut grant: RsuGrant = create_test_grant();
    grant.total_units = -5;
    assert!(validate_grant(&grant).is_err());

    let mut grant: RsuGrant = create_test_grant();
    grant.cliff_months = 48;
    assert!(validate_grant(&grant).is_ok());
}
