//! Selection → regex fragment compiler
//!
//! OR mode flattens every pattern of every selected token into a single
//! alternation: `(720p|1080p|\b4k\b|2160p)`.
//!
//! AND mode emits one lookahead per token, positive or negative depending on
//! polarity: `(?=.*1080p)(?!.*(?:265|\bHEVC\b))`.
//!
//! Fragment order always follows the selection, never the catalog. Keys the
//! catalog does not know are skipped.

use crate::filter::catalog::{Catalog, Token};
use crate::filter::selection::{LogicMode, Polarity};

pub fn compile<K: AsRef<str>>(
    catalog: &Catalog,
    selected_keys: &[K],
    logic_mode: LogicMode,
    polarity: &Polarity,
) -> String {
    let resolved: Vec<&Token> = selected_keys
        .iter()
        .filter_map(|key| catalog.get(key.as_ref()))
        .collect();

    match logic_mode {
        LogicMode::Or => alternation(&resolved),
        LogicMode::And => resolved
            .iter()
            .map(|token| lookahead(token, polarity.get(token.key()) != Some(&false)))
            .collect(),
    }
}

fn alternation(tokens: &[&Token]) -> String {
    let flat: Vec<&str> = tokens
        .iter()
        .flat_map(|token| token.patterns().iter().map(String::as_str))
        .collect();

    if flat.is_empty() {
        return String::new();
    }
    format!("({})", flat.join("|"))
}

fn lookahead(token: &Token, positive: bool) -> String {
    let kind = if positive { '=' } else { '!' };
    match token.patterns() {
        [single] => format!("(?{kind}.*{single})"),
        many => format!("(?{kind}.*(?:{}))", many.join("|")),
    }
}
