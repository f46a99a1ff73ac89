//! Quality filter engine
//!
//! [`Engine`] ties the catalog to the four operations a search box needs:
//! compile a selection into a fragment, embed that fragment into the user's
//! text, strip a previous fragment back out, and step a token through its
//! toggle cycle. Every operation is a pure function of its arguments.

use crate::filter::catalog::Catalog;
use crate::filter::compile;
use crate::filter::selection::{LogicMode, Polarity, Selection, TokenState};
use crate::filter::strip;

#[derive(Debug, Clone, Copy)]
pub struct Engine<'c> {
    catalog: &'c Catalog,
}

impl<'c> Engine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Compile selected keys into a regex fragment. Unknown keys are skipped;
    /// an empty or fully unknown selection yields `""`.
    pub fn compile<K: AsRef<str>>(
        &self,
        selected_keys: &[K],
        logic_mode: LogicMode,
        polarity: &Polarity,
    ) -> String {
        compile::compile(self.catalog, selected_keys, logic_mode, polarity)
    }

    pub fn compile_selection(&self, selection: &Selection) -> String {
        self.compile(
            &selection.selected_keys,
            selection.logic_mode,
            &selection.polarity,
        )
    }

    /// Combine `base` with `fragment`, first stripping any fragment already
    /// embedded in `base` so repeated calls never accumulate.
    ///
    /// AND mode prepends `^<fragment>.*`; OR mode appends `|<fragment>`.
    /// An empty fragment only cleans `base`.
    pub fn embed(&self, base: &str, fragment: &str, logic_mode: LogicMode) -> String {
        let cleaned = self.strip(base);
        if fragment.is_empty() {
            return cleaned;
        }

        match (logic_mode, cleaned.is_empty()) {
            (LogicMode::And, true) => format!("^{fragment}.*"),
            (LogicMode::And, false) => format!("^{fragment}.*{cleaned}"),
            (LogicMode::Or, true) => fragment.to_string(),
            (LogicMode::Or, false) => format!("{cleaned}|{fragment}"),
        }
    }

    /// Remove anything [`Engine::embed`] could have produced, keeping the
    /// rest of the text.
    pub fn strip(&self, input: &str) -> String {
        strip::strip(self.catalog, input)
    }

    /// Advance `key` one step through its toggle cycle.
    ///
    /// OR mode: off → on → off. AND mode: off → positive → negative → off.
    /// Keys the catalog does not know leave the selection unchanged.
    pub fn toggle_token(&self, key: &str, selection: &Selection) -> Selection {
        let mut next = selection.clone();
        if !self.catalog.contains(key) {
            return next;
        }

        match selection.state_of(key) {
            TokenState::Off => {
                next.select(key);
                if selection.logic_mode.is_and() {
                    next.polarity.insert(key.to_string(), true);
                }
            }
            TokenState::On => next.deselect(key),
            TokenState::Positive => {
                next.polarity.insert(key.to_string(), false);
            }
            TokenState::Negative => {
                next.deselect(key);
                next.polarity.remove(key);
            }
        }
        next
    }
}

impl Engine<'static> {
    /// Engine over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Default for Engine<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}
