//! Pure ownership and status-gate predicates.
//!
//! These evaluate already-loaded data; the caller is responsible for
//! fetching the resource. Each takes concrete identifiers rather than whole
//! documents so they stay independently testable, and so handlers that need
//! resource-instance decisions can call them without going through the
//! guard.

use hirefly_types::ResumeStatus;

/// String-normalized identifier equality. Identifiers are opaque strings
/// minted by the document store; surrounding whitespace is not significant.
pub(crate) fn ids_equal(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

/// Does the actor own the resource (by its owner-id field)?
pub fn is_owner(actor_id: &str, resource_owner_id: &str) -> bool {
    ids_equal(actor_id, resource_owner_id)
}

/// Do two company references point at the same company?
///
/// False if either side is absent: an actor without a company matches
/// nothing, and an orphaned resource is matched by nobody.
pub fn is_company_match(company_a: Option<&str>, company_b: Option<&str>) -> bool {
    match (company_a, company_b) {
        (Some(a), Some(b)) => ids_equal(a, b),
        _ => false,
    }
}

/// HR may manage a user record only when the user belongs to HR's company.
pub fn can_hr_manage_user(hr_company_id: Option<&str>, user_company_id: Option<&str>) -> bool {
    is_company_match(hr_company_id, user_company_id)
}

/// HR may manage a job only when the job belongs to HR's company.
pub fn can_hr_manage_job(hr_company_id: Option<&str>, job_company_id: Option<&str>) -> bool {
    is_company_match(hr_company_id, job_company_id)
}

/// HR may read a resume only when the job it was applied to belongs to
/// HR's company.
pub fn can_hr_read_resume(hr_company_id: Option<&str>, job_company_id: Option<&str>) -> bool {
    is_company_match(hr_company_id, job_company_id)
}

/// HR may update only their own company record.
pub fn can_hr_update_company(hr_company_id: Option<&str>, company_id: Option<&str>) -> bool {
    is_company_match(hr_company_id, company_id)
}

/// A user may manage only their own files.
pub fn can_user_manage_file(actor_id: &str, file_owner_id: &str) -> bool {
    is_owner(actor_id, file_owner_id)
}

/// A user may edit a resume's data only while they own it and it is still
/// in the pending entry state of the review lifecycle.
pub fn can_user_update_resume_data(
    actor_id: &str,
    resume_owner_id: &str,
    status: ResumeStatus,
) -> bool {
    is_owner(actor_id, resume_owner_id) && status == ResumeStatus::Pending
}

/// Deleting a resume follows the same owner-and-pending gate as editing.
pub fn can_user_delete_resume(
    actor_id: &str,
    resume_owner_id: &str,
    status: ResumeStatus,
) -> bool {
    can_user_update_resume_data(actor_id, resume_owner_id, status)
}

/// A user may delete only their own account.
pub fn can_user_delete_account(actor_id: &str, target_user_id: &str) -> bool {
    is_owner(actor_id, target_user_id)
}

/// A subscriber record may be managed by the caller whose email it carries.
/// Used both by authenticated users and by the anonymous unsubscribe path.
pub fn can_user_manage_subscriber(actor_email: Option<&str>, subscriber_email: &str) -> bool {
    actor_email.is_some_and(|email| ids_equal(email, subscriber_email))
}
