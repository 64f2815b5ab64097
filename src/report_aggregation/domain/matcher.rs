/// Wildcard pattern matcher shared by exclude rules and resolutions
///
/// Supports `*` to match zero or more characters. Patterns are compiled once
/// into the cheapest matcher that covers them; matching is case-sensitive.
/// Patterns come from the report document itself, so there is no validation
/// layer: an odd pattern simply matches nothing it was not written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    original: String,
    matcher: PatternMatcher,
}

impl WildcardPattern {
    /// Compiles a pattern string into an optimized matcher
    pub fn new(pattern: &str) -> Self {
        Self {
            original: pattern.to_string(),
            matcher: compile_pattern(pattern),
        }
    }

    /// Returns the original pattern string
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Checks if a candidate string matches this pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.matcher.matches(candidate)
    }
}

impl std::fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Pattern matcher types for efficient matching
#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternMatcher {
    /// Exact match: "some/path"
    Exact(String),
    /// Leading wildcard: "*-suffix"
    Prefix(String),
    /// Trailing wildcard: "prefix-*"
    Suffix(String),
    /// Enclosing wildcards: "*middle*"
    Contains(String),
    /// General case: "pre*fix*suf"
    Multiple {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl PatternMatcher {
    fn matches(&self, candidate: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => candidate == s,
            PatternMatcher::Prefix(suffix) => candidate.ends_with(suffix),
            PatternMatcher::Suffix(prefix) => candidate.starts_with(prefix),
            PatternMatcher::Contains(middle) => candidate.contains(middle),
            PatternMatcher::Multiple {
                parts,
                anchored_start,
                anchored_end,
            } => {
                if parts.is_empty() {
                    return true;
                }
                if *anchored_start && !candidate.starts_with(&parts[0]) {
                    return false;
                }
                if *anchored_end && !candidate.ends_with(parts.last().expect("non-empty parts")) {
                    return false;
                }
                // All parts must appear in order, without overlapping
                let mut current_pos = 0;
                for part in parts {
                    if let Some(pos) = candidate[current_pos..].find(part.as_str()) {
                        current_pos += pos + part.len();
                    } else {
                        return false;
                    }
                }
                true
            }
        }
    }
}

/// Compiles a pattern string into an optimized matcher
fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();

    match wildcard_count {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 => {
            if let Some(stripped) = pattern.strip_prefix('*') {
                // "*-suffix" -> ends_with check
                PatternMatcher::Prefix(stripped.to_string())
            } else if let Some(stripped) = pattern.strip_suffix('*') {
                // "prefix-*" -> starts_with check
                PatternMatcher::Suffix(stripped.to_string())
            } else {
                // "prefix*suffix" -> ordered parts, anchored on both ends
                split_parts(pattern)
            }
        }
        2 if pattern.starts_with('*') && pattern.ends_with('*') => {
            // "*middle*" -> contains check
            let middle = &pattern[1..pattern.len() - 1];
            PatternMatcher::Contains(middle.to_string())
        }
        _ => split_parts(pattern),
    }
}

fn split_parts(pattern: &str) -> PatternMatcher {
    let anchored_start = !pattern.starts_with('*');
    let anchored_end = !pattern.ends_with('*');
    let parts: Vec<String> = pattern
        .split('*')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();
    PatternMatcher::Multiple {
        parts,
        anchored_start,
        anchored_end,
    }
}
