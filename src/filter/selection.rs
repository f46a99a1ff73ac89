//! Selection state
//!
//! A [`Selection`] is the plain value the UI layer owns: which tokens are
//! selected (in click order), the polarity of each token, and whether tokens
//! are combined with AND or OR. The engine never stores one; it reads a
//! selection and hands back a new one.

use crate::filter::catalog::Catalog;
use crate::filter::error::ParseLogicModeError;
use quality_filter_config::LogicModeSetting;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Token key → polarity (`true` = must be present, `false` = must be absent).
/// Keys without an entry are treated as positive.
pub type Polarity = BTreeMap<String, bool>;

/// How selected tokens are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicMode {
    /// Every selected token must hold; emitted as lookaheads.
    And,
    /// Any selected token may match; emitted as one alternation.
    #[default]
    Or,
}

impl LogicMode {
    pub fn is_and(self) -> bool {
        self == LogicMode::And
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogicMode::And => "and",
            LogicMode::Or => "or",
        }
    }
}

impl fmt::Display for LogicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicMode {
    type Err = ParseLogicModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(LogicMode::And),
            "or" => Ok(LogicMode::Or),
            _ => Err(ParseLogicModeError(s.to_string())),
        }
    }
}

impl From<LogicModeSetting> for LogicMode {
    fn from(setting: LogicModeSetting) -> Self {
        match setting {
            LogicModeSetting::And => LogicMode::And,
            LogicModeSetting::Or => LogicMode::Or,
        }
    }
}

impl From<LogicMode> for LogicModeSetting {
    fn from(mode: LogicMode) -> Self {
        match mode {
            LogicMode::And => LogicModeSetting::And,
            LogicMode::Or => LogicModeSetting::Or,
        }
    }
}

/// Visible state of a single token button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Off,
    /// Selected in OR mode.
    On,
    /// Selected in AND mode, required to be present.
    Positive,
    /// Selected in AND mode, required to be absent.
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub selected_keys: Vec<String>,
    #[serde(default)]
    pub polarity: Polarity,
    #[serde(default)]
    pub logic_mode: LogicMode,
}

impl Selection {
    /// An empty selection in the given mode.
    pub fn new(logic_mode: LogicMode) -> Self {
        Self {
            logic_mode,
            ..Self::default()
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected_keys.iter().any(|k| k == key)
    }

    /// Polarity of `key`; positive unless explicitly set to `false`.
    pub fn is_positive(&self, key: &str) -> bool {
        self.polarity.get(key) != Some(&false)
    }

    pub fn state_of(&self, key: &str) -> TokenState {
        if !self.is_selected(key) {
            TokenState::Off
        } else if !self.logic_mode.is_and() {
            TokenState::On
        } else if self.is_positive(key) {
            TokenState::Positive
        } else {
            TokenState::Negative
        }
    }

    pub(crate) fn select(&mut self, key: &str) {
        if !self.is_selected(key) {
            self.selected_keys.push(key.to_string());
        }
    }

    pub(crate) fn deselect(&mut self, key: &str) {
        self.selected_keys.retain(|k| k != key);
    }

    /// Drop keys the catalog does not know, along with their polarity entries.
    /// Returns the dropped keys.
    pub fn retain_known(&mut self, catalog: &Catalog) -> Vec<String> {
        let (kept, dropped): (Vec<_>, Vec<_>) = self
            .selected_keys
            .drain(..)
            .partition(|key| catalog.contains(key));
        self.selected_keys = kept;
        self.polarity.retain(|key, _| catalog.contains(key));

        for key in &dropped {
            tracing::warn!(key = %key, "dropping unknown quality token from selection");
        }
        dropped
    }
}
