// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and salary band queries.

use comp_engine_domain::{BandCode, Employee, SalaryBand};
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{
    date_from_text, decimal_from_text, enum_from_text, optional_decimal_from_text,
    u32_from_column,
};
use crate::diesel_schema::{employees, salary_bands};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    name: String,
    band_code: String,
    annual_fixed: String,
    gender: String,
    date_of_joining: String,
    department: String,
    employment_type: String,
    performance_rating: Option<String>,
    compa_ratio: Option<i32>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: row.employee_id,
            band: BandCode::new(&row.band_code),
            annual_fixed: decimal_from_text("annual_fixed", &row.annual_fixed)?,
            gender: enum_from_text("gender", &row.gender)?,
            date_of_joining: date_from_text("date_of_joining", &row.date_of_joining)?,
            employment_type: enum_from_text("employment_type", &row.employment_type)?,
            performance_rating: optional_decimal_from_text(
                "performance_rating",
                row.performance_rating.as_deref(),
            )?,
            compa_ratio: row
                .compa_ratio
                .map(|v| u32_from_column("compa_ratio", v))
                .transpose()?,
            name: row.name,
            department: row.department,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = salary_bands)]
struct SalaryBandRow {
    band_id: i64,
    band_code: String,
    min_salary: String,
    mid_salary: String,
    max_salary: String,
    effective_date: String,
    job_area_id: Option<i64>,
}

impl TryFrom<SalaryBandRow> for SalaryBand {
    type Error = PersistenceError;

    fn try_from(row: SalaryBandRow) -> Result<Self, Self::Error> {
        Ok(Self {
            band_id: Some(row.band_id),
            band_code: BandCode::new(&row.band_code),
            min_salary: decimal_from_text("min_salary", &row.min_salary)?,
            mid_salary: decimal_from_text("mid_salary", &row.mid_salary)?,
            max_salary: decimal_from_text("max_salary", &row.max_salary)?,
            effective_date: date_from_text("effective_date", &row.effective_date)?,
            job_area_id: row.job_area_id,
        })
    }
}

/// Retrieves one employee.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no row exists.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Employee, PersistenceError> {
    let row: EmployeeRow = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EmployeeNotFound(employee_id))?;

    Employee::try_from(row)
}

/// Retrieves every employee ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    employees::table
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load::<EmployeeRow>(conn)?
        .into_iter()
        .map(Employee::try_from)
        .collect()
}

/// Retrieves every salary band row in insertion order.
///
/// Insertion order matters: among rows sharing a code and effective date the
/// later row wins.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_bands(conn: &mut SqliteConnection) -> Result<Vec<SalaryBand>, PersistenceError> {
    salary_bands::table
        .order(salary_bands::band_id.asc())
        .select(SalaryBandRow::as_select())
        .load::<SalaryBandRow>(conn)?
        .into_iter()
        .map(SalaryBand::try_from)
        .collect()
}
