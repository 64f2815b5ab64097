use std::collections::BTreeSet;

/// Set-membership filter on a record's exclusion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionState {
    Excluded,
    Included,
}

/// Filter specification for the package view.
///
/// Text fields are case-insensitive substring matches; `None` means the
/// field does not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    pub id: Option<String>,
    /// Matches against declared and detected licenses alike
    pub license: Option<String>,
    pub exclusion: Option<ExclusionState>,
}

/// Filter specification for the rule violation view
#[derive(Debug, Clone, Default)]
pub struct ViolationFilter {
    pub package: Option<String>,
    pub rule: Option<String>,
    pub message: Option<String>,
    /// Keep only records whose effective severity index is in the set
    pub severities: Option<BTreeSet<u8>>,
    pub exclusion: Option<ExclusionState>,
}

/// Filter specification for the vulnerability view
#[derive(Debug, Clone, Default)]
pub struct VulnerabilityFilter {
    pub package: Option<String>,
    pub id: Option<String>,
    /// Keep only records whose effective severity index is in the set
    pub severities: Option<BTreeSet<u8>>,
    pub exclusion: Option<ExclusionState>,
}

/// Case-insensitive substring match, the contract of every text filter
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Applies an optional text filter to a field value
pub(crate) fn text_matches(filter: &Option<String>, value: &str) -> bool {
    match filter {
        Some(needle) => contains_ci(value, needle),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("pkg:npm/Foo@1.0", "foo"));
        assert!(contains_ci("pkg:npm/foo@1.0", "NPM/FOO"));
        assert!(!contains_ci("pkg:npm/foo@1.0", "bar"));
    }

    #[test]
    fn test_text_matches_none_passes_everything() {
        assert!(text_matches(&None, "anything"));
        assert!(text_matches(&None, ""));
    }

    #[test]
    fn test_text_matches_some() {
        assert!(text_matches(&Some("foo".to_string()), "pkg:npm/foo@1.0"));
        assert!(!text_matches(&Some("bar".to_string()), "pkg:npm/foo@1.0"));
    }

    #[test]
    fn test_default_filters_are_unconstrained() {
        let filter = ViolationFilter::default();
        assert!(filter.package.is_none());
        assert!(filter.severities.is_none());
        assert!(filter.exclusion.is_none());
    }
}
