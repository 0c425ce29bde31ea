// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// A salary band code (e.g. `P2`, `M1`).
///
/// Codes are normalized to uppercase so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BandCode {
    /// The normalized code.
    value: String,
}

impl BandCode {
    /// Creates a new `BandCode`, trimming whitespace and uppercasing.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the numeric level encoded in the code's trailing digits.
    ///
    /// `P3` is level 3, `M10` is level 10. Codes without trailing digits have
    /// no level.
    #[must_use]
    pub fn level(&self) -> Option<u8> {
        let digits_start: usize = self
            .value
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(idx, _)| idx)?;
        self.value[digits_start..].parse().ok()
    }
}

impl From<String> for BandCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<BandCode> for String {
    fn from(code: BandCode) -> Self {
        code.value
    }
}

impl std::fmt::Display for BandCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Recorded gender of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Non-binary.
    NonBinary,
    /// Not disclosed.
    Undisclosed,
}

impl Gender {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::NonBinary => "NON_BINARY",
            Self::Undisclosed => "UNDISCLOSED",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MALE" => Ok(Self::Male),
            "FEMALE" => Ok(Self::Female),
            "NON_BINARY" => Ok(Self::NonBinary),
            "UNDISCLOSED" => Ok(Self::Undisclosed),
            _ => Err(DomainError::InvalidEnumValue {
                kind: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// Employment arrangement of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    /// Full-time employee.
    #[default]
    FullTime,
    /// Part-time employee.
    PartTime,
    /// Fixed-term contractor.
    Contract,
    /// Intern.
    Intern,
}

impl EmploymentType {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "FULL_TIME",
            Self::PartTime => "PART_TIME",
            Self::Contract => "CONTRACT",
            Self::Intern => "INTERN",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL_TIME" => Ok(Self::FullTime),
            "PART_TIME" => Ok(Self::PartTime),
            "CONTRACT" => Ok(Self::Contract),
            "INTERN" => Ok(Self::Intern),
            _ => Err(DomainError::InvalidEnumValue {
                kind: "employment type",
                value: s.to_string(),
            }),
        }
    }
}

/// An employee as seen by the engine.
///
/// The engine treats employees as an immutable snapshot for the duration of a
/// computation pass. `compa_ratio` is derived and written back after a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical identifier assigned by the system of record.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Salary band code.
    pub band: BandCode,
    /// Annual fixed pay.
    pub annual_fixed: Decimal,
    /// Recorded gender.
    pub gender: Gender,
    /// Date of joining.
    pub date_of_joining: Date,
    /// Department name.
    pub department: String,
    /// Employment arrangement.
    #[serde(default)]
    pub employment_type: EmploymentType,
    /// Most recent performance rating, if any.
    #[serde(default)]
    pub performance_rating: Option<Decimal>,
    /// Last computed compa-ratio, if any.
    #[serde(default)]
    pub compa_ratio: Option<u32>,
}

/// A salary band row.
///
/// Several rows may share a code; the effective one is selected by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// The canonical identifier. `None` until persisted.
    pub band_id: Option<i64>,
    /// The band code.
    pub band_code: BandCode,
    /// Range minimum.
    pub min_salary: Decimal,
    /// Range midpoint.
    pub mid_salary: Decimal,
    /// Range maximum.
    pub max_salary: Decimal,
    /// First date on which this row applies.
    pub effective_date: Date,
    /// Optional job area this band belongs to.
    pub job_area_id: Option<i64>,
}

impl SalaryBand {
    /// Creates a new salary band, enforcing `0 <= min < mid < max`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBandRange` if the range is malformed, or
    /// `DomainError::InvalidBandCode` if the code is empty.
    pub fn new(
        band_code: BandCode,
        min_salary: Decimal,
        mid_salary: Decimal,
        max_salary: Decimal,
        effective_date: Date,
    ) -> Result<Self, DomainError> {
        let band: Self = Self {
            band_id: None,
            band_code,
            min_salary,
            mid_salary,
            max_salary,
            effective_date,
            job_area_id: None,
        };
        crate::validation::validate_band(&band)?;
        Ok(band)
    }

    /// Attaches a persisted identifier.
    #[must_use]
    pub const fn with_id(mut self, band_id: i64) -> Self {
        self.band_id = Some(band_id);
        self
    }

    /// Attaches a job area.
    #[must_use]
    pub const fn with_job_area(mut self, job_area_id: i64) -> Self {
        self.job_area_id = Some(job_area_id);
        self
    }
}
