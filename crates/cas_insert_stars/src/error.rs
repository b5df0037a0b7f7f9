use cas_ast::AstError;
use thiserror::Error;

/// Failures of the rewrite pass itself.
///
/// Recognised ambiguities never fail: they are rewritten and flagged in the
/// [`Outcome`](crate::Outcome). These variants cover what cannot be
/// rewritten faithfully and broken engine invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// A digit run split out of a name or literal does not fit in an i64
    #[error("integer '{digits}' is too large to represent")]
    IntegerOverflow { digits: String },

    /// The rule battery kept firing past the termination bound
    #[error("rewrite did not reach a fixed point within {limit} rewrites")]
    IterationLimit { limit: usize },

    #[error(transparent)]
    Ast(#[from] AstError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
