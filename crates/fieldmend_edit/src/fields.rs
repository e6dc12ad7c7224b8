//! Editor for the comma/semicolon-delimited field list.
//!
//! Output is canonical: tokens joined with `,` and no orphan delimiters.

use fieldmend_foundation::FieldPath;

/// Splits a field-list column into its path tokens.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Returns true if the exact path is a token of the list.
#[must_use]
pub fn contains(text: &str, path: &FieldPath) -> bool {
    let needle = path.to_string();
    tokens(text).iter().any(|token| *token == needle)
}

/// Removes every token equal to `path`. Returns the new list and the
/// number of tokens dropped.
#[must_use]
pub fn remove(text: &str, path: &FieldPath) -> (String, usize) {
    let needle = path.to_string();
    let kept: Vec<String> = tokens(text)
        .into_iter()
        .filter(|token| *token != needle)
        .collect();
    let removed = tokens(text).len() - kept.len();
    (kept.join(","), removed)
}

/// Replaces every token equal to `old` with `new`. Returns the new list
/// and the number of tokens replaced.
#[must_use]
pub fn swap(text: &str, old: &FieldPath, new: &FieldPath) -> (String, usize) {
    let needle = old.to_string();
    let replacement = new.to_string();
    let mut swapped = 0;
    let mapped: Vec<String> = tokens(text)
        .into_iter()
        .map(|token| {
            if token == needle {
                swapped += 1;
                replacement.clone()
            } else {
                token
            }
        })
        .collect();
    (mapped.join(","), swapped)
}

/// Appends `path` if absent, preserving existing order. Idempotent.
/// Returns the new list and whether anything was added.
#[must_use]
pub fn add(text: &str, path: &FieldPath) -> (String, bool) {
    let needle = path.to_string();
    let mut items = tokens(text);
    if items.iter().any(|token| *token == needle) {
        return (items.join(","), false);
    }
    items.push(needle);
    (items.join(","), true)
}
