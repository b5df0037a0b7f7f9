//! Configuration for the insert-stars pass.
//!
//! [`RewriteOptions`] is what the rules read on every call. [`InsertStarsConfig`]
//! is the serialisable bundle a host application keeps on disk, covering both
//! the per-call options and the constructor flags of [`InsertStars`].

use crate::error::ConfigError;
use crate::logic::InsertStars;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Read-only settings for one rewrite call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Disables the speculative corrections: letter+digit pairs, trailing
    /// digit splits, exponent literals and single-letter function names.
    pub strict_syntax: bool,
    /// Names never split when used as values (units, declared variables).
    pub safe_variables: FxHashSet<String>,
    /// Names never split or reinterpreted when called.
    pub safe_functions: FxHashSet<String>,
}

impl RewriteOptions {
    pub fn strict() -> Self {
        Self {
            strict_syntax: true,
            ..Self::default()
        }
    }

    pub fn with_safe_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safe_variables.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_safe_functions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safe_functions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_safe_variable(&self, name: &str) -> bool {
        self.safe_variables.contains(name)
    }

    pub fn is_safe_function(&self, name: &str) -> bool {
        self.safe_functions.contains(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertStarsConfig {
    /// Rewrite silently instead of marking the answer invalid
    pub insert_stars: bool,
    /// Forwarded to the preparser, which collapses whitespace products
    pub fix_spaces: bool,
    pub strict_syntax: bool,
    pub safe_variables: Vec<String>,
    pub safe_functions: Vec<String>,
}

impl InsertStarsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            strict_syntax: self.strict_syntax,
            ..RewriteOptions::default()
        }
        .with_safe_variables(self.safe_variables.iter().cloned())
        .with_safe_functions(self.safe_functions.iter().cloned())
    }

    pub fn logic(&self) -> InsertStars {
        InsertStars::new(self.insert_stars, self.fix_spaces)
    }
}
