// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `employees`: Employees and salary bands
//! - `grants`: Grants, vesting schedules, vesting flags
//! - `plans`: Commission plans and achievements
//! - `scenarios`: Scenarios and the atomic apply commit

pub mod audit;
pub mod employees;
pub mod grants;
pub mod plans;
pub mod scenarios;

pub use employees::{insert_band, insert_employee, update_compa_ratio};
pub use grants::{persist_vesting_issuance, update_vesting_flags};
pub use plans::{insert_plan, persist_achievement};
pub use scenarios::{CommittedApplication, commit_scenario_application, insert_scenario};
