//! Route template matching helpers.
//!
//! Permission records store route templates (`/api/v1/jobs/:id`) whose
//! positional placeholders match exactly one non-empty path segment.
//! Leading and trailing slashes are not significant.

/// Does a concrete request path match a route template?
///
/// A `:param` segment matches any single non-empty segment; every other
/// segment must match exactly. `/jobs/:id` matches `/jobs/abc` but not
/// `/jobs` or `/jobs/abc/close`.
pub fn template_matches(template: &str, path: &str) -> bool {
    let template_segments: Vec<&str> = segments(template);
    let path_segments: Vec<&str> = segments(path);

    template_segments.len() == path_segments.len()
        && template_segments
            .iter()
            .zip(&path_segments)
            .all(|(t, p)| t.starts_with(':') || t == p)
}

/// Does the template carry a positional placeholder segment?
///
/// Distinguishes instance routes (`/files/:id`) from collection routes
/// (`/files`) when deciding whether an ownership narrowing applies.
pub fn has_id_segment(template: &str) -> bool {
    segments(template).iter().any(|s| s.starts_with(':'))
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
