//! Export name selection.
//!
//! A name is exported when it passes the built-in rules (if enabled), is not
//! matched by any exclude pattern, and, when include patterns are given,
//! matches at least one of them.

use crate::config::FilterConfig;
use crate::error::FilterError;

/// Compiled export filter.
#[derive(Debug, Clone)]
pub struct NameFilter {
    default_rules: bool,
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl Default for NameFilter {
    fn default() -> Self {
        Self {
            default_rules: true,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl NameFilter {
    /// A filter applying only the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the filter described by a config section.
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        let mut filter = Self::new().with_default_rules(config.default_rules);
        for pattern in &config.include {
            filter = filter.with_include(pattern)?;
        }
        for pattern in &config.exclude {
            filter = filter.with_exclude(pattern)?;
        }
        Ok(filter)
    }

    /// Enable or disable the built-in rules.
    pub fn with_default_rules(mut self, enabled: bool) -> Self {
        self.default_rules = enabled;
        self
    }

    /// Add an include pattern.
    pub fn with_include(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn with_exclude(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Whether `name` should be exported.
    pub fn matches(&self, name: &str) -> bool {
        if self.default_rules && !zod_codepen::default_filter(name) {
            return false;
        }
        if self.exclude.iter().any(|p| p.matches(name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches(name))
    }
}

fn compile(pattern: &str) -> Result<glob::Pattern, FilterError> {
    glob::Pattern::new(pattern).map_err(|e| FilterError::invalid_pattern(pattern, e.msg))
}
