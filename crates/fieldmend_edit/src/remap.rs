//! Position remapping between the filter-list and logic editors.
//!
//! Filter positions are contiguous `1..=N` assigned by list order, and the
//! Logic expression references them by number. Removing clauses therefore
//! shifts every later position; the remap records the shift explicitly so
//! the logic editor never has to re-derive it.

use std::collections::BTreeMap;

/// What happened to one old filter position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionFate {
    /// The clause survives at this new 1-based position.
    Renumbered(u32),
    /// The clause was removed; terms referencing it must be deleted.
    Removed,
}

/// Old-position to new-position map produced by a filter-list removal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionRemap {
    map: BTreeMap<u32, PositionFate>,
}

impl PositionRemap {
    /// Builds the remap for removing `removed` positions out of
    /// `1..=total`. Survivors shift down by the number of removed
    /// positions below them.
    #[must_use]
    pub fn from_removed(removed: &[u32], total: usize) -> Self {
        let mut map = BTreeMap::new();
        #[allow(clippy::cast_possible_truncation)]
        for position in 1..=total as u32 {
            if removed.contains(&position) {
                map.insert(position, PositionFate::Removed);
            } else {
                let shift = removed.iter().filter(|&&r| r < position).count() as u32;
                map.insert(position, PositionFate::Renumbered(position - shift));
            }
        }
        Self { map }
    }

    /// The fate of an old position, or `None` if it was never valid.
    #[must_use]
    pub fn fate(&self, position: u32) -> Option<PositionFate> {
        self.map.get(&position).copied()
    }

    /// Returns true if nothing was removed or renumbered.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.map
            .iter()
            .all(|(&old, &fate)| fate == PositionFate::Renumbered(old))
    }

    /// The removed old positions, ascending.
    #[must_use]
    pub fn removed_positions(&self) -> Vec<u32> {
        self.map
            .iter()
            .filter(|(_, &fate)| fate == PositionFate::Removed)
            .map(|(&old, _)| old)
            .collect()
    }

    /// Number of positions that survive.
    #[must_use]
    pub fn surviving_count(&self) -> usize {
        self.map.len() - self.removed_positions().len()
    }
}
