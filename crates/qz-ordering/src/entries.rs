//! Reorderable entry list with stable identity.
//!
//! # Invariants
//!
//! - Values live in an append-only arena; an `EntryId` is the arena index of
//!   its slot and is never reused, so ids survive reorder and removal.
//! - `order` holds the visible sequence of live ids. Every id in `order`
//!   points at an occupied slot; removed slots are tombstoned (`None`).
//! - The list never drops below `MIN_ENTRIES` visible entries.

use serde::{Deserialize, Serialize};

/// Floor on visible entries. Removing the last entry is a no-op.
pub const MIN_ENTRIES: usize = 1;

/// Stable synthetic identity of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(usize);

impl EntryId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    PositionOutOfRange { position: usize, len: usize },
    UnknownEntry(EntryId),
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryError::PositionOutOfRange { position, len } => {
                write!(f, "position {position} out of range (len={len})")
            }
            EntryError::UnknownEntry(id) => write!(f, "unknown {id}"),
        }
    }
}

impl std::error::Error for EntryError {}

/// Outcome of [`EntryList::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<T> {
    Removed(T),
    /// Only one entry remained; nothing was removed.
    KeptLastEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList<T> {
    arena: Vec<Option<T>>,
    order: Vec<EntryId>,
}

impl<T: Default> Default for EntryList<T> {
    fn default() -> Self {
        Self::from_values(std::iter::empty())
    }
}

impl<T> EntryList<T> {
    /// Build from values in visible order. An empty input is seeded with one
    /// blank entry so the floor holds from the start.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Default,
    {
        let mut list = Self {
            arena: Vec::new(),
            order: Vec::new(),
        };
        for v in values {
            list.append(v);
        }
        if list.order.is_empty() {
            list.append(T::default());
        }
        list
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn ids(&self) -> &[EntryId] {
        &self.order
    }

    pub fn id_at(&self, position: usize) -> Option<EntryId> {
        self.order.get(position).copied()
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.order.iter().position(|x| *x == id)
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.id_at(position).and_then(|id| self.get_by_id(id))
    }

    pub fn get_by_id(&self, id: EntryId) -> Option<&T> {
        self.arena.get(id.0).and_then(Option::as_ref)
    }

    /// Visible entries in order, with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &T)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.get_by_id(*id).map(|v| (*id, v)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values().cloned().collect()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn append(&mut self, value: T) -> EntryId {
        let id = EntryId(self.arena.len());
        self.arena.push(Some(value));
        self.order.push(id);
        id
    }

    pub fn append_default(&mut self) -> EntryId
    where
        T: Default,
    {
        self.append(T::default())
    }

    pub fn update(&mut self, position: usize, value: T) -> Result<(), EntryError> {
        self.update_with(position, |slot| *slot = value)
    }

    /// Mutate the entry at `position` in place.
    pub fn update_with(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut T),
    ) -> Result<(), EntryError> {
        let id = self.checked_id(position)?;
        let slot = self
            .arena
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(EntryError::UnknownEntry(id))?;
        f(slot);
        Ok(())
    }

    /// Remove the entry at `position`. A no-op when it is the only entry.
    pub fn remove(&mut self, position: usize) -> Result<Removal<T>, EntryError> {
        let id = self.checked_id(position)?;
        if self.order.len() <= MIN_ENTRIES {
            return Ok(Removal::KeptLastEntry);
        }
        let value = self
            .arena
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(EntryError::UnknownEntry(id))?;
        self.order.remove(position);
        Ok(Removal::Removed(value))
    }

    /// Move the entry at `from` to `to`, shifting the entries in between.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), EntryError> {
        let id = self.checked_id(from)?;
        self.checked_id(to)?;
        if from == to {
            return Ok(());
        }
        self.order.remove(from);
        self.order.insert(to, id);
        Ok(())
    }

    /// Drag-layer reorder: `active` was dropped onto `over`.
    pub fn move_entry(&mut self, active: EntryId, over: EntryId) -> Result<(), EntryError> {
        let from = self
            .position_of(active)
            .ok_or(EntryError::UnknownEntry(active))?;
        let to = self
            .position_of(over)
            .ok_or(EntryError::UnknownEntry(over))?;
        self.reorder(from, to)
    }

    fn checked_id(&self, position: usize) -> Result<EntryId, EntryError> {
        self.id_at(position).ok_or(EntryError::PositionOutOfRange {
            position,
            len: self.order.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> EntryList<String> {
        EntryList::from_values(values.iter().map(|s| s.to_string()))
    }

    #[test]
    fn empty_input_is_seeded_with_one_blank() {
        let l: EntryList<String> = EntryList::from_values(Vec::new());
        assert_eq!(l.to_vec(), vec![String::new()]);
    }

    #[test]
    fn reorder_moves_forward_and_backward() {
        let mut l = list(&["a", "b", "c", "d"]);
        l.reorder(0, 2).unwrap();
        assert_eq!(l.to_vec(), ["b", "c", "a", "d"]);
        l.reorder(3, 0).unwrap();
        assert_eq!(l.to_vec(), ["d", "b", "c", "a"]);
    }

    #[test]
    fn ids_survive_reorder_and_removal() {
        let mut l = list(&["a", "b", "c"]);
        let c = l.id_at(2).unwrap();
        l.reorder(2, 0).unwrap();
        assert_eq!(l.position_of(c), Some(0));
        l.remove(1).unwrap();
        assert_eq!(l.position_of(c), Some(0));
        assert_eq!(l.get_by_id(c).map(String::as_str), Some("c"));
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut l = list(&["a", "b"]);
        let b = l.id_at(1).unwrap();
        l.remove(1).unwrap();
        let fresh = l.append("z".into());
        assert_ne!(fresh, b);
        assert_eq!(l.position_of(b), None);
        assert_eq!(l.move_entry(b, fresh), Err(EntryError::UnknownEntry(b)));
    }

    #[test]
    fn removing_last_entry_is_noop() {
        let mut l = list(&["only"]);
        assert_eq!(l.remove(0).unwrap(), Removal::KeptLastEntry);
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn out_of_range_positions_error_without_mutation() {
        let mut l = list(&["a", "b"]);
        let before = l.clone();
        assert_eq!(
            l.update(5, "x".into()),
            Err(EntryError::PositionOutOfRange { position: 5, len: 2 })
        );
        assert!(l.reorder(0, 2).is_err());
        assert!(l.remove(9).is_err());
        assert_eq!(l, before);
    }

    #[test]
    fn move_entry_onto_itself_is_noop() {
        let mut l = list(&["a", "b"]);
        let a = l.id_at(0).unwrap();
        l.move_entry(a, a).unwrap();
        assert_eq!(l.to_vec(), ["a", "b"]);
    }
}
