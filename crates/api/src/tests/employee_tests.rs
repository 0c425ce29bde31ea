// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use comp_engine_domain::{BandStatus, CompaRatioResult, EnginePolicy, EquityScore, SalaryBand};
use comp_engine_persistence::Persistence;
use time::macros::date;

use crate::{
    ApiError, CreateBandRequest, CreateEmployeeRequest, create_band, create_employee,
    get_compa_ratio, get_equity_score, list_bands, list_employees,
};

use super::helpers::{
    create_band_request, create_employee_request, create_seeded_persistence, dec,
};

#[test]
fn test_create_employee_normalizes_fields() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request: CreateEmployeeRequest = create_employee_request(9, " p3 ", "Sales", "1500000");
    request.name = String::from("  Priya Nair ");

    let employee = create_employee(&mut persistence, &request).unwrap();

    assert_eq!(employee.name, "Priya Nair");
    assert_eq!(employee.band.value(), "P3");
    assert_eq!(employee.compa_ratio, None);
    assert_eq!(list_employees(&mut persistence).unwrap(), vec![employee]);
}

#[test]
fn test_create_employee_rejects_blank_name() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request: CreateEmployeeRequest = create_employee_request(9, "P3", "Sales", "1500000");
    request.name = String::from("   ");

    let result = create_employee(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "employee"
    ));
    assert!(list_employees(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_create_employee_rejects_out_of_range_rating() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request: CreateEmployeeRequest = create_employee_request(9, "P3", "Sales", "1500000");
    request.performance_rating = Some(dec("5.5"));

    assert!(matches!(
        create_employee(&mut persistence, &request),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_duplicate_employee_is_a_conflict() {
    let mut persistence: Persistence = create_seeded_persistence();

    let result = create_employee(
        &mut persistence,
        &create_employee_request(1, "P1", "Finance", "1000000"),
    );

    assert!(matches!(result, Err(ApiError::StateConflict { .. })));
}

#[test]
fn test_invalid_band_range_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let request: CreateBandRequest = create_band_request("P4", "3000000", "2000000", "4000000");

    let result = create_band(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "band"
    ));
    assert!(list_bands(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_created_band_carries_identifier_and_job_area() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request: CreateBandRequest = create_band_request("m1", "100", "200", "300");
    request.job_area_id = Some(4);

    let band: SalaryBand = create_band(&mut persistence, &request).unwrap();

    assert!(band.band_id.is_some());
    assert_eq!(band.band_code.value(), "M1");
    assert_eq!(band.job_area_id, Some(4));
    assert_eq!(list_bands(&mut persistence).unwrap(), vec![band]);
}

#[test]
fn test_compa_ratio_at_midpoint() {
    let mut persistence: Persistence = create_seeded_persistence();
    create_employee(
        &mut persistence,
        &create_employee_request(5, "P2", "Legal", "1900000"),
    )
    .unwrap();

    let result: CompaRatioResult = get_compa_ratio(
        &mut persistence,
        &EnginePolicy::default(),
        5,
        date!(2025 - 04 - 01),
    )
    .unwrap();

    assert_eq!(result.compa_ratio, 100);
    assert_eq!(result.status, BandStatus::InRange);
    assert!(result.within_policy_range);
}

#[test]
fn test_compa_ratio_is_written_back() {
    let mut persistence: Persistence = create_seeded_persistence();

    let result: CompaRatioResult = get_compa_ratio(
        &mut persistence,
        &EnginePolicy::default(),
        1,
        date!(2025 - 04 - 01),
    )
    .unwrap();

    assert_eq!(result.compa_ratio, 105);
    assert_eq!(persistence.get_employee(1).unwrap().compa_ratio, Some(105));
}

#[test]
fn test_compa_ratio_without_effective_band() {
    let mut persistence: Persistence = create_seeded_persistence();

    let before_bands = get_compa_ratio(
        &mut persistence,
        &EnginePolicy::default(),
        1,
        date!(2023 - 12 - 31),
    );

    assert!(matches!(
        before_bands,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "effective_band"
    ));
    assert_eq!(persistence.get_employee(1).unwrap().compa_ratio, None);
}

#[test]
fn test_compa_ratio_for_unknown_employee() {
    let mut persistence: Persistence = create_seeded_persistence();

    let result = get_compa_ratio(
        &mut persistence,
        &EnginePolicy::default(),
        404,
        date!(2025 - 04 - 01),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_equity_score_reports_unresolved_employees() {
    let mut persistence: Persistence = create_seeded_persistence();
    create_employee(
        &mut persistence,
        &create_employee_request(5, "Z1", "Legal", "900000"),
    )
    .unwrap();

    let score: EquityScore =
        get_equity_score(&mut persistence, &EnginePolicy::default(), date!(2025 - 04 - 01))
            .unwrap();

    assert_eq!(score.employees_considered, 5);
    assert_eq!(score.band_in_range_count, 4);
    assert_eq!(score.outlier_count, 0);
    assert_eq!(
        score
            .unresolved
            .iter()
            .map(|u| u.employee_id)
            .collect::<Vec<i64>>(),
        vec![5]
    );
    assert!(score.score.is_some());
}
