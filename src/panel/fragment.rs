//! Active tab encoding in the location fragment
//!
//! The fragment carries unrelated data before the first `=` (for example a
//! line range, `L42`) and the active panel view id after it: `L42=references`.
//! A fragment without `=`, or with nothing after it, has no active view.

/// Id of the active view, if the fragment names one
pub fn active_id(fragment: &str) -> Option<&str> {
    match fragment.split_once('=') {
        Some((_, id)) if !id.is_empty() => Some(id),
        _ => None,
    }
}

/// Data before the first `=`, kept when the active view changes
pub fn prefix(fragment: &str) -> &str {
    fragment
        .split_once('=')
        .map_or(fragment, |(prefix, _)| prefix)
}

/// `fragment` with its active view replaced by `id`
pub fn with_active_id(fragment: &str, id: &str) -> String {
    format!("{}={}", prefix(fragment), id)
}
