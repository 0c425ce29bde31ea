// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use comp_engine::{ApplyGate, ScenarioRunResult};
use comp_engine_api::{
    AchievementResponse, ApiError, ApiResult, ApplyScenarioResponse, CreateBandRequest,
    CreateEmployeeRequest, CreateGrantRequest, CreateGrantResponse, CreatePlanRequest,
    CreateScenarioRequest, PayoutRequest, RecordAchievementRequest, apply_scenario,
    calculate_plan_payout, create_band, create_employee, create_grant, create_plan,
    create_scenario, get_audit_event, get_audit_timeline, get_compa_ratio, get_equity_score,
    get_vesting_summary, list_bands, list_employees, list_scenarios, list_upcoming_vesting,
    record_achievement, run_scenario,
};
use comp_engine_audit::{Actor, AuditEvent, AuditSubject, Cause};
use comp_engine_domain::{
    CommissionPlan, CompaRatioResult, Employee, EnginePolicy, EquityScore, PayoutResult,
    RsuVestingEvent, SalaryBand, Scenario, VestingSummary,
};
use comp_engine_persistence::Persistence;
use live::{LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Lookahead used by `/vesting/upcoming` when `days` is not given.
const DEFAULT_LOOKAHEAD_DAYS: u32 = 30;

/// Compensation Engine Server - HTTP server for the compensation computation engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Path to a JSON engine policy. If not provided, uses the defaults.
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The store, behind a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Per-scenario apply gate.
    gate: ApplyGate,
    /// The validated engine policy.
    policy: Arc<EnginePolicy>,
    /// Forwards API notifications to live clients.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}

/// A write request carrying who made it and why.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AuthoredRequest<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The actor type (e.g. "operator", "system").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The operation payload.
    request: T,
}

impl<T> AuthoredRequest<T> {
    fn actor(&self) -> Actor {
        Actor::new(self.actor_id.clone(), self.actor_type.clone())
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// Payload for applying a scenario.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct ApplyScenarioApiRequest {
    /// Computation date. Defaults to today.
    #[serde(default)]
    on: Option<Date>,
}

/// Query parameters carrying an optional computation date.
#[derive(Debug, Deserialize)]
struct OnQuery {
    /// Computation date. Defaults to today.
    on: Option<Date>,
}

/// Query parameters for the vesting summary endpoint.
#[derive(Debug, Deserialize)]
struct VestingQuery {
    /// Summary date. Defaults to today.
    as_of: Option<Date>,
}

/// Query parameters for the upcoming vesting endpoint.
#[derive(Debug, Deserialize)]
struct UpcomingQuery {
    /// Window start (exclusive). Defaults to today.
    from: Option<Date>,
    /// Window length in days.
    days: Option<u32>,
}

/// Query parameters for the audit timeline endpoint.
///
/// Both fields are given together, or neither for the full timeline.
#[derive(Debug, Deserialize)]
struct AuditTimelineQuery {
    /// Subject kind, e.g. `GRANT`.
    kind: Option<String>,
    /// Subject identifier.
    id: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StateConflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parses the audit timeline filter.
fn parse_subject(params: &AuditTimelineQuery) -> Result<Option<AuditSubject>, HttpError> {
    match (&params.kind, params.id) {
        (None, None) => Ok(None),
        (Some(kind), Some(id)) => AuditSubject::from_parts(&kind.to_uppercase(), id)
            .map(Some)
            .ok_or_else(|| HttpError {
                status: StatusCode::BAD_REQUEST,
                message: format!(
                    "Invalid subject kind: '{kind}'. Must be EMPLOYEE, GRANT, PLAN or SCENARIO"
                ),
            }),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: String::from("Audit subject requires both 'kind' and 'id'"),
        }),
    }
}

/// Loads and validates the engine policy.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the policy is
/// invalid.
fn load_policy(
    path: Option<&std::path::Path>,
) -> Result<EnginePolicy, Box<dyn std::error::Error>> {
    let policy: EnginePolicy = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading engine policy");
            let text: String = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => EnginePolicy::default(),
    };
    policy.validate()?;
    Ok(policy)
}

// ============================================================================
// Employees & Bands
// ============================================================================

/// Handler for POST `/employees` endpoint.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<Employee>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let employee: Employee = create_employee(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(employee))
}

/// Handler for GET `/employees` endpoint.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Employee>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let employees: Vec<Employee> = list_employees(&mut persistence)?;
    drop(persistence);

    Ok(Json(employees))
}

/// Handler for GET `/employees/{employee_id}/compa_ratio` endpoint.
///
/// Resolves the employee's compa-ratio and stores it on the employee.
async fn handle_get_compa_ratio(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Query(params): Query<OnQuery>,
) -> Result<Json<CompaRatioResult>, HttpError> {
    let on: Date = params.on.unwrap_or_else(today);

    let mut persistence = app_state.persistence.lock().await;
    let result: CompaRatioResult =
        get_compa_ratio(&mut persistence, &app_state.policy, employee_id, on)?;
    drop(persistence);

    Ok(Json(result))
}

/// Handler for POST `/bands` endpoint.
async fn handle_create_band(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateBandRequest>,
) -> Result<Json<SalaryBand>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let band: SalaryBand = create_band(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(band))
}

/// Handler for GET `/bands` endpoint.
async fn handle_list_bands(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<SalaryBand>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bands: Vec<SalaryBand> = list_bands(&mut persistence)?;
    drop(persistence);

    Ok(Json(bands))
}

// ============================================================================
// Grants & Vesting
// ============================================================================

/// Handler for POST `/grants` endpoint.
///
/// Creates a grant together with its vesting schedule.
async fn handle_create_grant(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthoredRequest<CreateGrantRequest>>,
) -> Result<Json<CreateGrantResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        employee_id = req.request.employee_id,
        "Handling create_grant request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateGrantResponse = create_grant(
        &mut persistence,
        &app_state.policy,
        &req.request,
        today(),
        req.actor(),
        req.cause(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/grants/{grant_id}/vesting` endpoint.
async fn handle_get_vesting_summary(
    AxumState(app_state): AxumState<AppState>,
    Path(grant_id): Path<i64>,
    Query(params): Query<VestingQuery>,
) -> Result<Json<VestingSummary>, HttpError> {
    let now: Date = today();
    let as_of: Date = params.as_of.unwrap_or(now);

    let mut persistence = app_state.persistence.lock().await;
    let summary: VestingSummary = get_vesting_summary(&mut persistence, grant_id, as_of, now)?;
    drop(persistence);

    Ok(Json(summary))
}

/// Handler for GET `/vesting/upcoming` endpoint.
///
/// Every listed event is also pushed to live clients.
async fn handle_list_upcoming_vesting(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<UpcomingQuery>,
) -> Result<Json<Vec<RsuVestingEvent>>, HttpError> {
    let from: Date = params.from.unwrap_or_else(today);
    let days: u32 = params.days.unwrap_or(DEFAULT_LOOKAHEAD_DAYS);

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<Vec<RsuVestingEvent>> =
        list_upcoming_vesting(&mut persistence, from, days)?;
    drop(persistence);

    app_state.broadcaster.publish(result.notifications);

    Ok(Json(result.response))
}

// ============================================================================
// Plans & Achievements
// ============================================================================

/// Handler for POST `/plans` endpoint.
async fn handle_create_plan(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> Result<Json<CommissionPlan>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let plan: CommissionPlan = create_plan(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(plan))
}

/// Handler for POST `/plans/{plan_id}/payout` endpoint.
///
/// Previews a payout without storing anything.
async fn handle_calculate_payout(
    AxumState(app_state): AxumState<AppState>,
    Path(plan_id): Path<i64>,
    Json(req): Json<PayoutRequest>,
) -> Result<Json<PayoutResult>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let payout: PayoutResult =
        calculate_plan_payout(&mut persistence, &app_state.policy, plan_id, &req)?;
    drop(persistence);

    Ok(Json(payout))
}

/// Handler for POST `/achievements` endpoint.
async fn handle_record_achievement(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AuthoredRequest<RecordAchievementRequest>>,
) -> Result<Json<AchievementResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        employee_id = req.request.employee_id,
        plan_id = req.request.plan_id,
        "Handling record_achievement request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AchievementResponse = record_achievement(
        &mut persistence,
        &app_state.policy,
        &req.request,
        today(),
        req.actor(),
        req.cause(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/equity_score` endpoint.
async fn handle_get_equity_score(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<OnQuery>,
) -> Result<Json<EquityScore>, HttpError> {
    let on: Date = params.on.unwrap_or_else(today);

    let mut persistence = app_state.persistence.lock().await;
    let score: EquityScore = get_equity_score(&mut persistence, &app_state.policy, on)?;
    drop(persistence);

    Ok(Json(score))
}

// ============================================================================
// Scenarios
// ============================================================================

/// Handler for POST `/scenarios` endpoint.
async fn handle_create_scenario(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateScenarioRequest>,
) -> Result<Json<Scenario>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let scenario: Scenario = create_scenario(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(scenario))
}

/// Handler for GET `/scenarios` endpoint.
async fn handle_list_scenarios(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Scenario>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let scenarios: Vec<Scenario> = list_scenarios(&mut persistence)?;
    drop(persistence);

    Ok(Json(scenarios))
}

/// Handler for POST `/scenarios/{scenario_id}/run` endpoint.
///
/// Projects the scenario without writing anything.
async fn handle_run_scenario(
    AxumState(app_state): AxumState<AppState>,
    Path(scenario_id): Path<i64>,
    Query(params): Query<OnQuery>,
) -> Result<Json<ScenarioRunResult>, HttpError> {
    let on: Date = params.on.unwrap_or_else(today);

    let mut persistence = app_state.persistence.lock().await;
    let run: ScenarioRunResult =
        run_scenario(&mut persistence, &app_state.policy, scenario_id, on)?;
    drop(persistence);

    Ok(Json(run))
}

/// Handler for POST `/scenarios/{scenario_id}/apply` endpoint.
async fn handle_apply_scenario(
    AxumState(app_state): AxumState<AppState>,
    Path(scenario_id): Path<i64>,
    Json(req): Json<AuthoredRequest<ApplyScenarioApiRequest>>,
) -> Result<Json<ApplyScenarioResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        scenario_id,
        "Handling apply_scenario request"
    );

    let on: Date = req.request.on.unwrap_or_else(today);

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<ApiResult<ApplyScenarioResponse>, ApiError> = apply_scenario(
        &mut persistence,
        &app_state.gate,
        &app_state.policy,
        scenario_id,
        on,
        req.actor(),
        req.cause(),
    );
    drop(persistence);

    let result: ApiResult<ApplyScenarioResponse> = result.inspect_err(|err| {
        warn!(scenario_id, error = %err, "Scenario apply rejected");
    })?;
    app_state.broadcaster.publish(result.notifications);

    Ok(Json(result.response))
}

// ============================================================================
// Audit
// ============================================================================

/// Handler for GET `/audit/timeline` endpoint.
///
/// Returns the ordered audit timeline, optionally for one subject.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AuditTimelineQuery>,
) -> Result<Json<Vec<AuditEvent>>, HttpError> {
    let subject: Option<AuditSubject> = parse_subject(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEvent> = get_audit_timeline(&mut persistence, subject)?;
    drop(persistence);

    Ok(Json(events))
}

/// Handler for GET `/audit/event/{event_id}` endpoint.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEvent>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let event: AuditEvent = get_audit_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(event))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/employees", post(handle_create_employee))
        .route("/employees", get(handle_list_employees))
        .route(
            "/employees/{employee_id}/compa_ratio",
            get(handle_get_compa_ratio),
        )
        .route("/bands", post(handle_create_band))
        .route("/bands", get(handle_list_bands))
        .route("/grants", post(handle_create_grant))
        .route("/grants/{grant_id}/vesting", get(handle_get_vesting_summary))
        .route("/vesting/upcoming", get(handle_list_upcoming_vesting))
        .route("/plans", post(handle_create_plan))
        .route("/plans/{plan_id}/payout", post(handle_calculate_payout))
        .route("/achievements", post(handle_record_achievement))
        .route("/equity_score", get(handle_get_equity_score))
        .route("/scenarios", post(handle_create_scenario))
        .route("/scenarios", get(handle_list_scenarios))
        .route("/scenarios/{scenario_id}/run", post(handle_run_scenario))
        .route("/scenarios/{scenario_id}/apply", post(handle_apply_scenario))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing compensation engine server");

    let policy: EnginePolicy = load_policy(args.policy.as_deref())?;

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        gate: ApplyGate::new(),
        policy: Arc::new(policy),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
