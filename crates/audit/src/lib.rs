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

use serde::{Deserialize, Serialize};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be an HR operator, a payroll integration, or a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "system", "scheduler").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, ticket ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`ApplyScenario`", "`IssueVestingSchedule`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact view of the affected state at one point in time.
///
/// The content is a `key=value` list produced by the transition that emitted
/// the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// `key=value` representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// The record an audit event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditSubject {
    /// An employee.
    Employee(i64),
    /// An RSU grant.
    Grant(i64),
    /// A commission plan.
    Plan(i64),
    /// A scenario.
    Scenario(i64),
}

impl AuditSubject {
    /// Returns the persisted subject kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Employee(_) => "EMPLOYEE",
            Self::Grant(_) => "GRANT",
            Self::Plan(_) => "PLAN",
            Self::Scenario(_) => "SCENARIO",
        }
    }

    /// Returns the subject's identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Employee(id) | Self::Grant(id) | Self::Plan(id) | Self::Scenario(id) => *id,
        }
    }

    /// Rebuilds a subject from its persisted parts.
    #[must_use]
    pub fn from_parts(kind: &str, id: i64) -> Option<Self> {
        match kind {
            "EMPLOYEE" => Some(Self::Employee(id)),
            "GRANT" => Some(Self::Grant(id)),
            "PLAN" => Some(Self::Plan(id)),
            "SCENARIO" => Some(Self::Scenario(id)),
            _ => None,
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every committed change to compensation records produces exactly one audit
/// event, persisted in the same transaction as the change. It captures:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - Which record it concerns (subject)
/// - The state before and after the transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The persisted identifier, once stored.
    pub event_id: Option<i64>,
    /// The record this event is about.
    pub subject: AuditSubject,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// When the event was stored (ISO 8601), once stored.
    pub created_at: Option<String>,
}

impl AuditEvent {
    /// Creates a new, not yet persisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `subject` - The record the event concerns
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        subject: AuditSubject,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            subject,
            actor,
            cause,
            action,
            before,
            after,
            created_at: None,
        }
    }

    /// Attaches the identifier and timestamp assigned by the store.
    #[must_use]
    pub fn persisted(mut self, event_id: i64, created_at: String) -> Self {
        self.event_id = Some(event_id);
        self.created_at = Some(created_at);
        self
    }
}
