//! # Path Algebra
//!
//! Segment-based helpers for tree-absolute paths. All joining, relativizing
//! and prefix arithmetic goes through segment split/join, never substring
//! arithmetic, so trailing slashes and duplicated separators normalize away
//! uniformly (`/a//b/` and `/a/b` are the same path).

/// Iterate the non-empty segments of a path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Whether the path is tree-absolute.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Normalize a path to its canonical absolute form: a leading `/` followed
/// by its non-empty segments joined with single `/`. The empty path and
/// `"/"` both normalize to `"/"`.
pub fn normalize(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

/// Join a relative path under a base, producing a normalized absolute path.
pub fn join(base: &str, rel: &str) -> String {
    let mut parts: Vec<&str> = segments(base).collect();
    parts.extend(segments(rel));
    format!("/{}", parts.join("/"))
}

/// Compute `path` relative to `root`, segment-wise.
///
/// Returns `None` when `path` is not inside `root`. Returns `Some("")` when
/// the two denote the same node. The result carries no leading slash.
pub fn relative_to(root: &str, path: &str) -> Option<String> {
    let root_segments: Vec<&str> = segments(root).collect();
    let path_segments: Vec<&str> = segments(path).collect();
    if path_segments.len() < root_segments.len() {
        return None;
    }
    if path_segments[..root_segments.len()] != root_segments[..] {
        return None;
    }
    Some(path_segments[root_segments.len()..].join("/"))
}

/// Find the prefix of `path` that runs up to and including the first
/// occurrence of `marker` as a consecutive segment run.
///
/// Used to derive e.g. the `/conf/<app>/settings/wcm` base from a template
/// path by searching for the `["settings", "wcm"]` run.
pub fn prefix_through(path: &str, marker: &[&str]) -> Option<String> {
    if marker.is_empty() {
        return Some(normalize(path));
    }
    let parts: Vec<&str> = segments(path).collect();
    let end = parts
        .windows(marker.len())
        .position(|w| w == marker)
        .map(|start| start + marker.len())?;
    Some(format!("/{}", parts[..end].join("/")))
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("/a//b/"), "/a/b");
        assert_eq!(normalize("a/b"), "/a/b");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/conf/app", "policies"), "/conf/app/policies");
        assert_eq!(join("/conf/app/", "/policies/"), "/conf/app/policies");
        assert_eq!(join("/", "apps"), "/apps");
        assert_eq!(join("/a", ""), "/a");
    }

    #[test]
    fn test_relative_to_inside() {
        assert_eq!(relative_to("/a/b", "/a/b/c/d"), Some("c/d".to_string()));
        assert_eq!(relative_to("/a/b/", "/a/b/c"), Some("c".to_string()));
        assert_eq!(relative_to("/a/b", "/a/b"), Some(String::new()));
    }

    #[test]
    fn test_relative_to_outside() {
        assert_eq!(relative_to("/a/b", "/a/x/c"), None);
        assert_eq!(relative_to("/a/b", "/a"), None);
    }

    #[test]
    fn test_prefix_through() {
        assert_eq!(
            prefix_through("/conf/app/settings/wcm/templates/page", &["settings", "wcm"]),
            Some("/conf/app/settings/wcm".to_string())
        );
        assert_eq!(prefix_through("/conf/app/templates", &["settings", "wcm"]), None);
        assert_eq!(
            prefix_through("/conf//app/settings/wcm/", &["settings", "wcm"]),
            Some("/conf/app/settings/wcm".to_string())
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9:._-]{0,12}"
    }

    fn abs_path() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 0..6).prop_map(|parts| format!("/{}", parts.join("/")))
    }

    proptest! {
        /// Normalization is idempotent.
        #[test]
        fn normalize_idempotent(p in abs_path()) {
            let once = normalize(&p);
            prop_assert_eq!(&normalize(&once), &once);
        }

        /// Joining a relativized suffix back onto the root restores the path.
        #[test]
        fn relative_then_join_round_trips(root in abs_path(), suffix in abs_path()) {
            let path = join(&root, &suffix);
            let rel = relative_to(&root, &path);
            prop_assert!(rel.is_some());
            prop_assert_eq!(join(&root, &rel.unwrap_or_default()), path);
        }
    }
}
