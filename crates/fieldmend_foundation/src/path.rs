//! Canonical representation of dotted field references.
//!
//! A [`FieldPath`] is an ordered, non-empty sequence of path segments
//! (object, relationship hops, terminal field). Matching inside larger
//! text is segment-exact: a path never matches as a substring of an
//! unrelated longer path that merely shares a prefix or suffix token.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A dotted field reference such as `account__r.owner__r.Name`.
///
/// Equality is case-sensitive and segment-wise. The textual form is the
/// segments joined with `.`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    /// The path segments, in order. Never empty.
    segments: Vec<String>,
}

/// Returns true for bytes that can appear inside a path token.
///
/// A `.` counts as a path byte: an occurrence flanked by one belongs to a
/// longer path and must not match.
const fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

/// Returns true for bytes that can appear inside a single segment.
const fn is_segment_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl FieldPath {
    /// Parses a dotted field reference.
    ///
    /// # Errors
    /// Returns [`crate::ErrorKind::MalformedPath`] if the input is empty,
    /// contains an empty segment, or contains characters outside
    /// `[A-Za-z0-9_.]`.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::malformed_path(text, "empty field reference"));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('.') {
            if segment.is_empty() {
                return Err(Error::malformed_path(text, "empty path segment"));
            }
            if !segment.bytes().all(is_segment_byte) {
                return Err(Error::malformed_path(
                    text,
                    format!("illegal characters in segment '{segment}'"),
                ));
            }
            segments.push(segment.to_string());
        }

        Ok(Self { segments })
    }

    /// The path segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The terminal (field) segment.
    #[must_use]
    pub fn terminal(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Returns true if the path traverses at least one relationship hop.
    #[must_use]
    pub fn is_relationship(&self) -> bool {
        self.segments.len() > 1
    }

    /// Returns true if this path is a proper segment-wise prefix of
    /// `other` (removing `site__r` also affects `site__r.Name`).
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Locates every occurrence of this exact path as a token inside `text`.
    ///
    /// Returns byte ranges. An occurrence is rejected when the adjacent
    /// byte is an identifier byte or a `.` attaching the match to a longer
    /// path, so `A.B` never matches inside `A.B.C` or `X.A.B`.
    #[must_use]
    pub fn occurrences_in(&self, text: &str) -> Vec<Range<usize>> {
        let needle = self.to_string();
        let bytes = text.as_bytes();
        let mut ranges = Vec::new();

        for (start, _) in text.match_indices(&needle) {
            let end = start + needle.len();
            let left_ok = start == 0 || !is_path_byte(bytes[start - 1]);
            let right_ok = end == bytes.len() || !is_path_byte(bytes[end]);
            if left_ok && right_ok {
                ranges.push(start..end);
            }
        }

        ranges
    }

    /// Returns true if this exact path occurs as a token inside `text`.
    #[must_use]
    pub fn is_in(&self, text: &str) -> bool {
        !self.occurrences_in(text).is_empty()
    }

    /// Finds contextual occurrences of `needle` inside `text`: the needle
    /// itself, or the needle reached through a chain of relationship hops
    /// (segments ending in `__r`), e.g. `site__r.owner__r.Name` for the
    /// needle `Name`.
    ///
    /// Returns the distinct full paths found, sorted.
    #[must_use]
    pub fn contextual_occurrences(text: &str, needle: &Self) -> Vec<Self> {
        let target = needle.to_string();
        let bytes = text.as_bytes();
        let mut found = Vec::new();

        for (start, _) in text.match_indices(&target) {
            let end = start + target.len();
            if end < bytes.len() && is_path_byte(bytes[end]) {
                continue;
            }

            if start == 0 || !is_path_byte(bytes[start - 1]) {
                // Bare occurrence.
                push_unique(&mut found, needle.clone());
                continue;
            }

            if bytes[start - 1] != b'.' {
                continue;
            }

            // Walk backwards over relationship-hop segments.
            if let Some(prefix_start) = scan_hop_prefix(bytes, start - 1) {
                let full = &text[prefix_start..end];
                if let Ok(path) = Self::parse(full) {
                    push_unique(&mut found, path);
                }
            }
        }

        found.sort();
        found
    }

    /// Derives a human-readable filter label from the terminal segment.
    ///
    /// Strips a `__c`/`__r` suffix, then title-cases the underscore-split
    /// words: `account_name__c` becomes `Account Name`.
    #[must_use]
    pub fn filter_label(&self) -> String {
        let terminal = self.terminal();
        let root = terminal
            .strip_suffix("__c")
            .or_else(|| terminal.strip_suffix("__r"))
            .unwrap_or(terminal);

        root.split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Determines the object a filter on this path belongs to.
    ///
    /// A single-segment path filters the base object. Otherwise the
    /// penultimate segment decides: a `__r` relationship name maps to its
    /// `__c` object, anything else is taken verbatim.
    #[must_use]
    pub fn filter_sobject(&self, base_object: &str) -> String {
        if self.segments.len() == 1 {
            return base_object.to_string();
        }
        let hop = &self.segments[self.segments.len() - 2];
        hop.strip_suffix("__r")
            .map_or_else(|| hop.clone(), |stem| format!("{stem}__c"))
    }
}

/// Walks backwards from the `.` at `dot` over `ident__r.` hops.
///
/// Returns the byte offset where the hop chain starts, or `None` if any
/// preceding segment is not a relationship hop (in which case the
/// occurrence belongs to an unrelated longer path).
fn scan_hop_prefix(bytes: &[u8], dot: usize) -> Option<usize> {
    let mut seg_end = dot;
    loop {
        let mut seg_start = seg_end;
        while seg_start > 0 && is_segment_byte(bytes[seg_start - 1]) {
            seg_start -= 1;
        }
        let segment = &bytes[seg_start..seg_end];
        if segment.is_empty() || !segment.ends_with(b"__r") {
            return None;
        }
        if seg_start == 0 || !is_path_byte(bytes[seg_start - 1]) {
            return Some(seg_start);
        }
        if bytes[seg_start - 1] == b'.' {
            seg_end = seg_start - 1;
        } else {
            return None;
        }
    }
}

/// Appends `path` if not already present.
fn push_unique(paths: &mut Vec<FieldPath>, path: FieldPath) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
