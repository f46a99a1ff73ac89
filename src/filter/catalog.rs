//! Quality token catalog
//!
//! A catalog is an ordered list of [`Token`]s. The order is the canonical
//! display order; selections decide their own emission order. Catalogs are
//! validated once when built and never change afterwards, so they can be
//! shared freely between threads.

use crate::filter::error::CatalogError;
use crate::filter::strip::has_balanced_groups;
use once_cell::sync::Lazy;
use quality_filter_config::FilterConfig;
use serde::Serialize;
use std::collections::HashSet;

/// The built-in catalog, loaded from the embedded defaults on first use.
static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let config = quality_filter_config::load_defaults().expect("embedded defaults are valid");
    Catalog::from_config(&config).expect("embedded catalog is valid")
});

/// One recognizable quality indicator, e.g. `1080p` or `Dolby Vision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    key: String,
    #[serde(rename = "name")]
    display_name: String,
    patterns: Vec<String>,
}

impl Token {
    pub fn new<K, N, P, S>(key: K, display_name: N, patterns: P) -> Self
    where
        K: Into<String>,
        N: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Regex fragments, any of which counts as a match for this token.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Validated, immutable list of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tokens: Vec<Token>,
    /// Every pattern of every token, flattened in catalog order.
    values: Vec<String>,
}

impl Catalog {
    /// Build a catalog, checking that keys are unique and non-empty and that
    /// every token has at least one non-empty pattern. Patterns may contain
    /// groups, but their unescaped parentheses must balance.
    pub fn new(tokens: Vec<Token>) -> Result<Self, CatalogError> {
        if tokens.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for (position, token) in tokens.iter().enumerate() {
            if token.key.is_empty() {
                return Err(CatalogError::EmptyKey(position));
            }
            if !seen.insert(token.key.as_str()) {
                return Err(CatalogError::DuplicateKey(token.key.clone()));
            }
            if token.patterns.is_empty() {
                return Err(CatalogError::EmptyPatterns(token.key.clone()));
            }
            if token.patterns.iter().any(|p| p.is_empty()) {
                return Err(CatalogError::EmptyPattern(token.key.clone()));
            }
            if let Some(pattern) = token.patterns.iter().find(|p| !has_balanced_groups(p)) {
                return Err(CatalogError::UnbalancedPattern(
                    token.key.clone(),
                    pattern.clone(),
                ));
            }
        }

        let values = tokens
            .iter()
            .flat_map(|token| token.patterns.iter().cloned())
            .collect();
        Ok(Self { tokens, values })
    }

    /// Build a catalog from the `tokens` section of a loaded configuration.
    pub fn from_config(config: &FilterConfig) -> Result<Self, CatalogError> {
        let tokens = config
            .tokens
            .iter()
            .map(|t| Token::new(t.key.as_str(), t.name.as_str(), t.patterns.iter().cloned()))
            .collect();
        Self::new(tokens)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.iter().find(|token| token.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All pattern values of all tokens, in catalog order.
    pub fn all_pattern_values(&self) -> &[String] {
        &self.values
    }

    /// Whether `text` contains any catalog pattern value as a plain substring.
    ///
    /// This is how stripping tells an injected fragment from text the user
    /// typed: it only removes structures that mention a known value.
    pub fn mentions_known_value(&self, text: &str) -> bool {
        self.values.iter().any(|value| text.contains(value.as_str()))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
