//! The selection set

use bevy::prelude::*;

use crate::catalog::BodyId;

/// One open panel: which body, and the pixel coordinate it is anchored to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectionEntry {
    pub id: BodyId,
    pub anchor: Vec2,
}

/// Insertion-ordered set of open panels, keyed by body id. Order defines
/// panel stacking; an id appears at most once no matter how fast the user
/// clicks.
#[derive(Resource, Default, Debug)]
pub struct SelectionSet {
    entries: Vec<SelectionEntry>,
}

impl SelectionSet {
    pub fn contains(&self, id: BodyId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Append an entry. Returns `false` (and changes nothing) if the id is
    /// already present.
    pub fn insert(&mut self, id: BodyId, anchor: Vec2) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.push(SelectionEntry { id, anchor });
        true
    }

    /// Remove by id. Returns `false` if the id was not present.
    pub fn remove(&mut self, id: BodyId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// The most recently opened entry (top of the stacking order).
    pub fn top(&self) -> Option<&SelectionEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
