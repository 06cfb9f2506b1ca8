//! Parser configuration.

/// Default limit for the stack of open elements and the list of active
/// formatting elements.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for a single parse.
///
/// ```ignore
/// let options = ParseOptions::default().with_scripting(true).with_max_depth(64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether the input bytes are UTF-8. When false they are decoded as
    /// windows-1252.
    pub is_utf8: bool,
    /// [§ 13.2.4.5 The scripting flag](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// Only affects `noscript` handling; scripts are never run.
    pub scripting_enabled: bool,
    /// Maximum number of entries on the stack of open elements and on the
    /// list of active formatting elements before the parse fails closed.
    pub max_depth: usize,
    /// Forward every issue to the warning log as it is recorded.
    pub log_issues: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            is_utf8: true,
            scripting_enabled: false,
            max_depth: DEFAULT_MAX_DEPTH,
            log_issues: false,
        }
    }
}

impl ParseOptions {
    /// Set whether the input is UTF-8.
    #[must_use]
    pub const fn with_utf8(mut self, is_utf8: bool) -> Self {
        self.is_utf8 = is_utf8;
        self
    }

    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting_enabled = enabled;
        self
    }

    /// Set the depth guard limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable issue logging.
    #[must_use]
    pub const fn with_issue_logging(mut self, log_issues: bool) -> Self {
        self.log_issues = log_issues;
        self
    }
}
