//! # Hirefly Constants
//!
//! Centralized constants used across the Hirefly authorization core.
//! This crate provides a single source of truth for magic numbers and strings.

// ============================================================================
// Role Names
// ============================================================================

/// The distinguished super-admin role.
///
/// Actors carrying this role bypass all permission checks (`manage all`),
/// and the role itself can never be deleted from the role store.
pub const SUPER_ADMIN_ROLE: &str = "SUPER_ADMIN";

/// The HR role: company-scoped management of users, jobs and resumes.
pub const HR_ROLE: &str = "HR";

/// The baseline applicant role: self-scoped access only.
pub const USER_ROLE: &str = "USER";

// ============================================================================
// Module Tags
// ============================================================================

/// Capability domain tags carried by seeded permissions.
///
/// Permissions whose module is not one of these are skipped during
/// ability construction rather than rejected.
pub const MODULE_USERS: &str = "USERS";
pub const MODULE_COMPANIES: &str = "COMPANIES";
pub const MODULE_JOBS: &str = "JOBS";
pub const MODULE_RESUMES: &str = "RESUMES";
pub const MODULE_FILES: &str = "FILES";
pub const MODULE_SUBSCRIBERS: &str = "SUBSCRIBERS";
pub const MODULE_ROLES: &str = "ROLES";
pub const MODULE_PERMISSIONS: &str = "PERMISSIONS";

// ============================================================================
// Role-Permission Cache Sizing
// ============================================================================

/// Default soft capacity of the role-permission cache.
///
/// The role population is small (tens of roles); 100 entries comfortably
/// covers it while bounding memory if role ids churn.
pub const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cached role-permission snapshots, in seconds.
///
/// Entries older than this are treated as absent on the next read. Role
/// mutations also invalidate their entry synchronously, so the TTL only
/// bounds staleness for out-of-band edits.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
