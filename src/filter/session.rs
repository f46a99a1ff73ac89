//! Search box controller
//!
//! [`FilterSession`] is what a UI wires its token buttons and logic toggle
//! to. It owns the current [`Selection`] and, on every interaction, takes the
//! current text of the search box and returns the text it should show next.
//! Storage of the selection between runs is left to the caller.

use crate::filter::engine::Engine;
use crate::filter::selection::{LogicMode, Selection, TokenState};

#[derive(Debug, Clone)]
pub struct FilterSession<'c> {
    engine: Engine<'c>,
    selection: Selection,
}

impl<'c> FilterSession<'c> {
    /// Start a session from a (possibly stale) stored selection. Keys the
    /// catalog no longer knows are dropped.
    pub fn new(engine: Engine<'c>, mut selection: Selection) -> Self {
        selection.retain_known(engine.catalog());
        Self { engine, selection }
    }

    pub fn engine(&self) -> Engine<'c> {
        self.engine
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn into_selection(self) -> Selection {
        self.selection
    }

    pub fn logic_mode(&self) -> LogicMode {
        self.selection.logic_mode
    }

    pub fn token_state(&self, key: &str) -> TokenState {
        self.selection.state_of(key)
    }

    /// Fragment for the current selection.
    pub fn fragment(&self) -> String {
        self.engine.compile_selection(&self.selection)
    }

    /// Handle a click on a token button and return the rewritten text.
    pub fn toggle(&mut self, key: &str, text: &str) -> String {
        if !self.engine.catalog().contains(key) {
            tracing::warn!(key = %key, "ignoring toggle of unknown quality token");
        }

        let before = self.selection.state_of(key);
        self.selection = self.engine.toggle_token(key, &self.selection);
        tracing::debug!(
            key = %key,
            from = ?before,
            to = ?self.selection.state_of(key),
            "toggled quality token"
        );
        self.refresh(text)
    }

    /// Switch between AND and OR. The old fragment is stripped before the
    /// new one is embedded, so the text always uses the active mode's syntax.
    /// Polarity entries survive the switch.
    pub fn set_logic_mode(&mut self, logic_mode: LogicMode, text: &str) -> String {
        let cleaned = self.engine.strip(text);
        tracing::debug!(from = %self.selection.logic_mode, to = %logic_mode, "switching logic mode");
        self.selection.logic_mode = logic_mode;
        self.refresh(&cleaned)
    }

    /// Re-apply the current selection to `text`.
    pub fn refresh(&self, text: &str) -> String {
        let fragment = self.fragment();
        let next = self.engine.embed(text, &fragment, self.selection.logic_mode);
        tracing::debug!(before = %text, after = %next, "rewrote search text");
        next
    }

    /// Apply the selection to a preset pattern the user picked. Unlike
    /// [`FilterSession::refresh`], an empty selection returns `base` as is.
    pub fn apply_to_pattern(&self, base: &str) -> String {
        let fragment = self.fragment();
        if fragment.is_empty() {
            return base.to_string();
        }
        self.engine.embed(base, &fragment, self.selection.logic_mode)
    }
}
