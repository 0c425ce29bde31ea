// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and salary band mutations.

use comp_engine_domain::{Employee, SalaryBand};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::u32_to_column;
use crate::diesel_schema::{employees, salary_bands};
use crate::error::PersistenceError;

/// Inserts an employee under its own identifier.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateEmployee` if the identifier is taken.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let compa_ratio: Option<i32> = employee
        .compa_ratio
        .map(|v| u32_to_column("compa_ratio", v))
        .transpose()?;

    let result: Result<usize, DieselError> = diesel::insert_into(employees::table)
        .values((
            employees::employee_id.eq(employee.employee_id),
            employees::name.eq(&employee.name),
            employees::band_code.eq(employee.band.value()),
            employees::annual_fixed.eq(employee.annual_fixed.to_string()),
            employees::gender.eq(employee.gender.as_str()),
            employees::date_of_joining.eq(employee.date_of_joining.to_string()),
            employees::department.eq(&employee.department),
            employees::employment_type.eq(employee.employment_type.as_str()),
            employees::performance_rating.eq(employee.performance_rating.map(|r| r.to_string())),
            employees::compa_ratio.eq(compa_ratio),
        ))
        .execute(conn);

    match result {
        Ok(_) => Ok(()),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::DuplicateEmployee(employee.employee_id))
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes back a derived compa-ratio.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no row was updated.
pub fn update_compa_ratio(
    conn: &mut SqliteConnection,
    employee_id: i64,
    compa_ratio: Option<u32>,
) -> Result<(), PersistenceError> {
    let value: Option<i32> = compa_ratio
        .map(|v| u32_to_column("compa_ratio", v))
        .transpose()?;

    let rows: usize = diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
        .set(employees::compa_ratio.eq(value))
        .execute(conn)?;

    if rows == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }

    Ok(())
}

/// Inserts a salary band row.
///
/// # Returns
///
/// The band ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_band(conn: &mut SqliteConnection, band: &SalaryBand) -> Result<i64, PersistenceError> {
    diesel::insert_into(salary_bands::table)
        .values((
            salary_bands::band_code.eq(band.band_code.value()),
            salary_bands::min_salary.eq(band.min_salary.to_string()),
            salary_bands::mid_salary.eq(band.mid_salary.to_string()),
            salary_bands::max_salary.eq(band.max_salary.to_string()),
            salary_bands::effective_date.eq(band.effective_date.to_string()),
            salary_bands::job_area_id.eq(band.job_area_id),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}
