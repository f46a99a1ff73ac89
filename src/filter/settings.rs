//! Loading of user settings
//!
//! Settings come from the layered configuration built by
//! [`quality_filter_config::Loader`]: the token catalog plus the mode a fresh
//! selection starts in.

use crate::filter::catalog::Catalog;
use crate::filter::error::CatalogError;
use crate::filter::selection::LogicMode;
use quality_filter_config::Loader;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog: Catalog,
    pub default_logic_mode: LogicMode,
}

impl Settings {
    /// Build the loader's configuration and validate its catalog.
    pub fn load(loader: Loader) -> Result<Self, CatalogError> {
        let config = loader.build()?;
        let catalog = Catalog::from_config(&config)?;
        let default_logic_mode = LogicMode::from(config.session.default_logic_mode);
        tracing::info!(
            tokens = catalog.len(),
            mode = %default_logic_mode,
            "loaded quality filter settings"
        );
        Ok(Self {
            catalog,
            default_logic_mode,
        })
    }

    /// Settings from one file layered over the built-in defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::load(Loader::new().with_file(path))
    }
}
