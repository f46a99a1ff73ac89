//! Merging of alternation lists
//!
//! Release-group presets arrive as regexes like `\b(FLUX)\b|\b(NTb)\b`, often
//! several of them with overlapping members. These helpers split such values
//! into their top-level alternatives and merge them into one group, keeping
//! first-seen order and dropping duplicates.

use std::collections::HashSet;

/// Split `value` on every `|` that is not escaped by a backslash.
///
/// Parts are trimmed and empty parts dropped. Grouping is not inspected: a
/// `|` inside parentheses splits too.
pub fn split_alternatives(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in value.chars() {
        match c {
            '|' if !escaped => parts.push(std::mem::take(&mut current)),
            '\\' => {
                current.push(c);
                escaped = !escaped;
                continue;
            }
            _ => current.push(c),
        }
        escaped = false;
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Merge every alternative of every value into `(a|b|c)`. Returns `""` when
/// there is nothing to merge.
pub fn merge_alternatives<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();

    for value in values {
        for part in split_alternatives(value.as_ref()) {
            if seen.insert(part.clone()) {
                ordered.push(part);
            }
        }
    }

    if ordered.is_empty() {
        return String::new();
    }
    format!("({})", ordered.join("|"))
}
