//! Modification instructions against field references.

use std::fmt;

use crate::path::FieldPath;

/// One requested change to the field references of targeted rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModificationInstruction {
    /// Remove every reference to the path.
    Remove(FieldPath),
    /// Replace references to `old` with `new`.
    Swap {
        /// The path being replaced.
        old: FieldPath,
        /// The replacement path.
        new: FieldPath,
    },
    /// Add the path to the field list if absent.
    Add(FieldPath),
}

impl ModificationInstruction {
    /// The path this instruction searches rows for.
    ///
    /// For swaps this is the old path; a swapped-in value is never itself
    /// the subject of matching.
    #[must_use]
    pub fn source(&self) -> &FieldPath {
        match self {
            Self::Remove(path) | Self::Add(path) => path,
            Self::Swap { old, .. } => old,
        }
    }

    /// Returns true for removal instructions.
    #[must_use]
    pub const fn is_remove(&self) -> bool {
        matches!(self, Self::Remove(_))
    }

    /// Returns true for swap instructions.
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        matches!(self, Self::Swap { .. })
    }

    /// Returns true for add instructions.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        matches!(self, Self::Add(_))
    }

    /// A short name for reporting.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Remove(_) => "remove",
            Self::Swap { .. } => "swap",
            Self::Add(_) => "add",
        }
    }
}

impl fmt::Display for ModificationInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove(path) => write!(f, "remove {path}"),
            Self::Swap { old, new } => write!(f, "swap {old} -> {new}"),
            Self::Add(path) => write!(f, "add {path}"),
        }
    }
}
