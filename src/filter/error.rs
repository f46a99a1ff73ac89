//! Errors raised at the edges of the filter: building a catalog and parsing
//! user-supplied settings. The engine operations themselves are infallible.

use quality_filter_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no tokens")]
    EmptyCatalog,
    #[error("token at position {0} has an empty key")]
    EmptyKey(usize),
    #[error("duplicate token key '{0}'")]
    DuplicateKey(String),
    #[error("token '{0}' has no patterns")]
    EmptyPatterns(String),
    #[error("token '{0}' has an empty pattern")]
    EmptyPattern(String),
    #[error("token '{0}' has a pattern with unbalanced parentheses: {1}")]
    UnbalancedPattern(String, String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown logic mode '{0}' (expected 'and' or 'or')")]
pub struct ParseLogicModeError(pub String);
