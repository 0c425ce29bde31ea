// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `employees`: Employees and salary bands
//! - `grants`: RSU grants and their vesting events
//! - `plans`: Commission plans and achievements
//! - `scenarios`: Scenarios
//! - `audit`: Audit events and timelines

pub mod audit;
pub mod employees;
pub mod grants;
pub mod plans;
pub mod scenarios;

pub use audit::{get_audit_event, get_audit_timeline};
pub use employees::{get_employee, list_bands, list_employees};
pub use grants::{get_grant, list_active_vesting_events, list_vesting_events};
pub use plans::{get_plan, list_achievements_for_employee};
pub use scenarios::{get_scenario, list_scenarios};
