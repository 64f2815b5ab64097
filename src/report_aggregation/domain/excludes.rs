use super::matcher::WildcardPattern;

/// A path exclude rule marking matched source paths as out of compliance scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExclude {
    pattern: WildcardPattern,
    reason: String,
    comment: String,
}

impl PathExclude {
    pub fn new(pattern: &str, reason: String, comment: String) -> Self {
        Self {
            pattern: WildcardPattern::new(pattern),
            reason,
            comment,
        }
    }

    /// Checks whether a detection path is covered by this rule
    pub fn covers(&self, path: &str) -> bool {
        self.pattern.matches(path)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Machine-readable reason code, e.g. "BUILD_TOOL_OF"
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// A scope exclude rule marking whole dependency scopes as out of scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeExclude {
    pattern: WildcardPattern,
    reason: String,
    comment: String,
}

impl ScopeExclude {
    pub fn new(pattern: &str, reason: String, comment: String) -> Self {
        Self {
            pattern: WildcardPattern::new(pattern),
            reason,
            comment,
        }
    }

    /// Checks whether a dependency scope name is covered by this rule
    pub fn covers(&self, scope: &str) -> bool {
        self.pattern.matches(scope)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Machine-readable reason code, e.g. "DEV_DEPENDENCY_OF"
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}
