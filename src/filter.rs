//! Quality filter
//!
//! Compiles a selection of quality tokens into a regex fragment, embeds it into
//! the text of a search box, and strips it back out again later without
//! touching what the user typed.
//!
//! - [`catalog`]: the validated token list
//! - [`selection`]: the plain selection value a UI owns
//! - [`engine`]: compile / embed / strip / toggle
//! - [`session`]: a controller that rewrites search text on every interaction
//! - [`settings`]: the catalog and default mode loaded from configuration
//! - [`alternatives`]: merging of preset alternation lists

pub mod alternatives;
pub mod catalog;
mod compile;
pub mod engine;
pub mod error;
pub mod selection;
pub mod session;
pub mod settings;
mod strip;

pub use catalog::{Catalog, Token};
pub use engine::Engine;
pub use error::{CatalogError, ParseLogicModeError};
pub use selection::{LogicMode, Polarity, Selection, TokenState};
pub use session::FilterSession;
pub use settings::Settings;
