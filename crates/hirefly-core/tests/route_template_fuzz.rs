//! Fuzzing tests for the route template matcher
//!
//! These use proptest to generate arbitrary inputs and ensure the matcher
//! handles them gracefully without panicking, and that placeholder matching
//! agrees with a segment-count reference.

use hirefly_core::{has_id_segment, template_matches};
use proptest::prelude::*;

proptest! {
    #[test]
    fn matcher_doesnt_panic_on_random_input(template in "\\PC*", path in "\\PC*") {
        let _ = template_matches(&template, &path);
        let _ = has_id_segment(&template);
    }

    #[test]
    fn template_always_matches_itself_without_placeholders(
        segments in prop::collection::vec("[a-z0-9_-]{1,8}", 0..6)
    ) {
        let path = format!("/{}", segments.join("/"));
        prop_assert!(template_matches(&path, &path));
    }

    #[test]
    fn placeholder_matches_any_single_segment(
        prefix in "[a-z]{1,8}",
        id in "[a-zA-Z0-9]{1,24}"
    ) {
        let template = format!("/{}/:id", prefix);
        let path = format!("/{}/{}", prefix, id);
        prop_assert!(template_matches(&template, &path));
        prop_assert!(has_id_segment(&template));
    }

    #[test]
    fn segment_count_mismatch_never_matches(
        segments in prop::collection::vec("[a-z0-9]{1,8}", 1..5),
        extra in "[a-z0-9]{1,8}"
    ) {
        let template = format!("/{}", segments.join("/"));
        let longer = format!("{}/{}", template, extra);
        prop_assert!(!template_matches(&template, &longer));
        prop_assert!(!template_matches(&longer, &template));
    }
}
