//! Removal of previously embedded fragments
//!
//! Embedding leaves one of two shapes in the search text:
//!
//! - AND: `^(?=...)(?!...).*<user text>`, a lookahead block anchored at the start
//! - OR: `<user text>|(...)`, a trailing alternation
//!
//! or, when the user text was empty, the bare fragment itself. A shape is only
//! removed when it mentions a catalog pattern value; the same shape with only
//! user-authored content is left alone. A user who types `(?=.*1080p)` by
//! hand cannot be told apart from an injected fragment and loses it too.
//!
//! Catalog patterns may carry their own groups (`hdr10(?:\+)?`), so the OR
//! tail and the bare group are found by matching parentheses from the end of
//! the text rather than by a regex. Parentheses escaped with a backslash do
//! not count.
//!
//! One pass removes at most one block of each shape, so the pass is repeated
//! until the text stops changing. The result is therefore a fixed point and
//! stripping twice is the same as stripping once.

use crate::filter::catalog::Catalog;
use once_cell::sync::Lazy;
use regex::Regex;

/// `^` followed by one or more lookarounds and `.*`, at the very start.
static AND_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\^(?:\(\?[=!].*?\))+\.\*").unwrap());

/// The whole text is one lookaround.
static BARE_LOOKAROUND: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(\?[=!].*?\)$").unwrap());

pub fn strip(catalog: &Catalog, input: &str) -> String {
    let mut current = strip_once(catalog, input);
    loop {
        let next = strip_once(catalog, &current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(catalog: &Catalog, input: &str) -> String {
    let mut cleaned = input;

    if let Some(block) = AND_BLOCK.find(cleaned) {
        if catalog.mentions_known_value(block.as_str()) {
            cleaned = &cleaned[block.end()..];
        }
    }

    if let Some(start) = trailing_group_start(cleaned) {
        if start > 0 && cleaned[..start].ends_with('|') {
            let tail = &cleaned[start - 1..];
            if catalog.mentions_known_value(tail) {
                cleaned = &cleaned[..start - 1];
            }
        }
    }

    let bare_group = trailing_group_start(cleaned) == Some(0);
    if (bare_group || BARE_LOOKAROUND.is_match(cleaned)) && catalog.mentions_known_value(cleaned)
    {
        cleaned = "";
    }

    cleaned.trim().to_string()
}

/// Byte offset of the `(` opening the non-empty group that closes at the very
/// end of `text`, or `None` if `text` does not end in such a group.
fn trailing_group_start(text: &str) -> Option<usize> {
    if !text.ends_with(')') || is_escaped(text, text.len() - 1) {
        return None;
    }

    let mut depth = 0usize;
    for (index, c) in text.char_indices().rev() {
        if !matches!(c, '(' | ')') || is_escaped(text, index) {
            continue;
        }
        if c == ')' {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return (index + 2 < text.len()).then_some(index);
            }
        }
    }
    None
}

/// Whether every unescaped `(` in `pattern` has a matching `)`.
pub(crate) fn has_balanced_groups(pattern: &str) -> bool {
    let mut depth = 0usize;
    for (index, c) in pattern.char_indices() {
        if !matches!(c, '(' | ')') || is_escaped(pattern, index) {
            continue;
        }
        if c == '(' {
            depth += 1;
        } else if depth == 0 {
            return false;
        } else {
            depth -= 1;
        }
    }
    depth == 0
}

/// A character is escaped when an odd run of backslashes precedes it.
fn is_escaped(text: &str, index: usize) -> bool {
    text[..index].bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}
