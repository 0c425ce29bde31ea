// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Compensation Computation Engine.
//!
//! This crate is the orchestrator around the pure engine: it loads snapshots
//! from the store, invokes the engine, persists the results, and translates
//! every domain, core, and persistence failure into an `ApiError`.
//!
//! Operations that inform the notification layer return an `ApiResult`
//! carrying `Notification` values next to the response.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod notifications;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    apply_scenario, calculate_plan_payout, create_band, create_employee, create_grant,
    create_plan, create_scenario, get_audit_event, get_audit_timeline, get_compa_ratio,
    get_equity_score, get_vesting_summary, list_bands, list_employees, list_scenarios,
    list_upcoming_vesting, record_achievement, run_scenario,
};
pub use notifications::Notification;
pub use request_response::{
    AchievementResponse, ApiResult, ApplyScenarioResponse, CreateBandRequest,
    CreateEmployeeRequest, CreateGrantRequest, CreateGrantResponse, CreatePlanRequest,
    CreateScenarioRequest, PayoutRequest, RecordAchievementRequest,
};
