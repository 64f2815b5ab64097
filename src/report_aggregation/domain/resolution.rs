use super::matcher::WildcardPattern;

/// An operator-authored acknowledgment marking a violation or vulnerability
/// as accepted or handled
///
/// The matcher is owned by the resolution: it is evaluated against the
/// record's identity (a violation's rule name, a vulnerability's advisory
/// id) as an exact string or a `*`-wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    matcher: WildcardPattern,
    reason: String,
    comment: String,
}

impl Resolution {
    pub fn new(matcher: &str, reason: String, comment: String) -> Self {
        Self {
            matcher: WildcardPattern::new(matcher),
            reason,
            comment,
        }
    }

    /// Evaluates this resolution against a record identity
    pub fn matches(&self, identity: &str) -> bool {
        self.matcher.matches(identity)
    }

    pub fn matcher(&self) -> &str {
        self.matcher.as_str()
    }

    /// Machine-readable reason code, e.g. "CANT_FIX_EXCEPTION"
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}
