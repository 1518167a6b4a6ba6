//! # Hirefly Types
//!
//! Shared type definitions for the Hirefly authorization core.
//!
//! This crate provides all domain types used across the workspace,
//! ensuring a single source of truth and preventing circular dependencies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hirefly_const::{
    MODULE_COMPANIES, MODULE_FILES, MODULE_JOBS, MODULE_PERMISSIONS, MODULE_RESUMES, MODULE_ROLES,
    MODULE_SUBSCRIBERS, MODULE_USERS, SUPER_ADMIN_ROLE,
};

// ============================================================================
// Actor
// ============================================================================

/// Reference to the role an actor carries, as issued at authentication time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: String,
    pub name: String,
}

/// Reference to the company an actor is scoped to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub id: String,
    pub name: Option<String>,
}

/// The authenticated caller of one request.
///
/// Constructed from verified credentials by the authentication layer before
/// authorization runs; immutable for the request's duration; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Opaque, stable, unique identifier.
    pub id: String,
    pub email: Option<String>,
    pub role: RoleRef,
    /// Present only for actors scoped to an organization.
    pub company: Option<CompanyRef>,
    /// Permission list attached at authentication time. Empty means
    /// "derive from role at check time".
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Actor {
    /// True for the distinguished super-admin role, which bypasses all
    /// permission checks.
    pub fn is_super_admin(&self) -> bool {
        self.role.name == SUPER_ADMIN_ROLE
    }
}

// ============================================================================
// Permission & Role
// ============================================================================

/// An atomic capability: one HTTP operation on one route template.
///
/// `(api_path, method)` pairs are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    /// Human label.
    pub name: String,
    /// Route template; may contain positional placeholders (`/jobs/:id`).
    pub api_path: String,
    /// HTTP verb, stored verbatim as seeded.
    pub method: String,
    /// Capability domain tag (e.g. `USERS`, `JOBS`); unknown tags are
    /// skipped during ability construction.
    pub module: String,
}

/// A named bundle of permissions.
///
/// `permissions` holds references (permission ids), not inline copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// A role with its permission references resolved to full records, as
/// returned by the role store's populate path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedRole {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

// ============================================================================
// Actions & Subjects
// ============================================================================

/// Abstract verb derived from an HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Wildcard verb granted to the super-admin role only.
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Map an HTTP method to its abstract action.
    ///
    /// Returns `None` for methods outside the fixed verb set; permissions
    /// carrying such methods yield no rule.
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(Action::Read),
            "POST" => Some(Action::Create),
            "PUT" | "PATCH" => Some(Action::Update),
            "DELETE" => Some(Action::Delete),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// The resource kind a rule applies to.
///
/// A closed enum rather than runtime type introspection: call sites pass the
/// subject type explicitly alongside any loaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectType {
    User,
    Company,
    Job,
    Resume,
    File,
    Subscriber,
    Role,
    Permission,
    /// Wildcard subject granted to the super-admin role only.
    All,
}

impl SubjectType {
    /// Map a capability domain tag to its subject type.
    ///
    /// Returns `None` for unknown tags; permissions carrying such tags
    /// yield no rule. The `All` wildcard is never produced by this mapping.
    pub fn from_module(module: &str) -> Option<Self> {
        match module {
            m if m == MODULE_USERS => Some(SubjectType::User),
            m if m == MODULE_COMPANIES => Some(SubjectType::Company),
            m if m == MODULE_JOBS => Some(SubjectType::Job),
            m if m == MODULE_RESUMES => Some(SubjectType::Resume),
            m if m == MODULE_FILES => Some(SubjectType::File),
            m if m == MODULE_SUBSCRIBERS => Some(SubjectType::Subscriber),
            m if m == MODULE_ROLES => Some(SubjectType::Role),
            m if m == MODULE_PERMISSIONS => Some(SubjectType::Permission),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubjectType::User => "User",
            SubjectType::Company => "Company",
            SubjectType::Job => "Job",
            SubjectType::Resume => "Resume",
            SubjectType::File => "File",
            SubjectType::Subscriber => "Subscriber",
            SubjectType::Role => "Role",
            SubjectType::Permission => "Permission",
            SubjectType::All => "all",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Resume Lifecycle
// ============================================================================

/// Resume review status.
///
/// Owner-initiated edits and deletes are legal only while `Pending`.
/// Transitions away from `Pending` are HR-initiated and one-directional;
/// nothing re-enters `Pending`. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResumeStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl ResumeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResumeStatus::Approved | ResumeStatus::Rejected)
    }

    /// Whether an HR-initiated transition from `self` to `to` is legal.
    pub fn can_transition(&self, to: ResumeStatus) -> bool {
        matches!(
            (self, to),
            (ResumeStatus::Pending, ResumeStatus::Reviewing)
                | (ResumeStatus::Pending, ResumeStatus::Approved)
                | (ResumeStatus::Pending, ResumeStatus::Rejected)
                | (ResumeStatus::Reviewing, ResumeStatus::Approved)
                | (ResumeStatus::Reviewing, ResumeStatus::Rejected)
        )
    }
}

impl std::str::FromStr for ResumeStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ResumeStatus::Pending),
            "REVIEWING" => Ok(ResumeStatus::Reviewing),
            "APPROVED" => Ok(ResumeStatus::Approved),
            "REJECTED" => Ok(ResumeStatus::Rejected),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl std::fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResumeStatus::Pending => "PENDING",
            ResumeStatus::Reviewing => "REVIEWING",
            ResumeStatus::Approved => "APPROVED",
            ResumeStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Unknown resume status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resume status: {0}")]
pub struct ParseStatusError(pub String);

// ============================================================================
// Store Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The record is protected from the attempted mutation (e.g. deleting
    /// the super-admin role, or a permission still referenced by a role).
    #[error("Protected: {0}")]
    Protected(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
