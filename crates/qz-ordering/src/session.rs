//! Ordering edit session.
//!
//! The author works on `working`, always presented in intended (correct)
//! order. `original_items` is frozen at session start and is the storage
//! order that gets persisted. The mapping from one to the other is computed
//! only at commit.

use qz_schemas::OrderingQuestion;
use std::collections::HashMap;
use tracing::debug;

use crate::entries::{EntryError, EntryId, EntryList, Removal};
use crate::permutation::{derive_correct_order, display_order, PermutationError};

/// Result of committing a session: storage-order items plus their correct order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedOrder {
    pub items: Vec<String>,
    pub correct_order: Vec<usize>,
}

impl CommittedOrder {
    pub fn into_question(self, id: impl Into<String>, question: impl Into<String>) -> OrderingQuestion {
        OrderingQuestion {
            id: id.into(),
            question: question.into(),
            items: self.items,
            correct_order: self.correct_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingSession {
    original_items: Vec<String>,
    working: EntryList<String>,
}

impl Default for OrderingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderingSession {
    /// Session for a new question: one empty placeholder step.
    pub fn new() -> Self {
        Self {
            original_items: vec![String::new()],
            working: EntryList::from_values(vec![String::new()]),
        }
    }

    /// Session for an existing question. The working copy is the stored items
    /// re-sorted into correct order.
    pub fn edit(items: &[String], correct_order: &[usize]) -> Result<Self, PermutationError> {
        if items.is_empty() {
            return Err(PermutationError::Empty);
        }
        let working = display_order(items, correct_order)?
            .into_iter()
            .map(str::to_string);
        Ok(Self {
            original_items: items.to_vec(),
            working: EntryList::from_values(working),
        })
    }

    pub fn from_question(q: &OrderingQuestion) -> Result<Self, PermutationError> {
        Self::edit(&q.items, &q.correct_order)
    }

    pub fn original_items(&self) -> &[String] {
        &self.original_items
    }

    pub fn working(&self) -> &EntryList<String> {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut EntryList<String> {
        &mut self.working
    }

    pub fn working_items(&self) -> Vec<&str> {
        self.working.values().map(String::as_str).collect()
    }

    // -----------------------------------------------------------------------
    // Working-copy operations
    // -----------------------------------------------------------------------

    pub fn append(&mut self) -> EntryId {
        self.working.append_default()
    }

    pub fn update(&mut self, position: usize, text: impl Into<String>) -> Result<(), EntryError> {
        self.working.update(position, text.into())
    }

    pub fn remove(&mut self, position: usize) -> Result<Removal<String>, EntryError> {
        self.working.remove(position)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), EntryError> {
        self.working.reorder(from, to)
    }

    pub fn move_entry(&mut self, active: EntryId, over: EntryId) -> Result<(), EntryError> {
        self.working.move_entry(active, over)
    }

    // -----------------------------------------------------------------------
    // Commit
    // -----------------------------------------------------------------------

    /// Map the working copy back onto storage order.
    ///
    /// Stored items keep their positions, each text kept at most as many
    /// times as it occurs in the working copy; the surplus is dropped. Working
    /// steps left over are appended in working order, so `items` always holds
    /// the same multiset as the working copy. Each working step then resolves
    /// to the first stored item with equal text.
    pub fn commit(&self) -> Result<CommittedOrder, PermutationError> {
        let working = self.working_items();

        let mut budget: HashMap<&str, usize> = HashMap::new();
        for step in &working {
            *budget.entry(*step).or_default() += 1;
        }
        let mut take = |text: &str| match budget.get_mut(text) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        };

        let mut items: Vec<String> = Vec::with_capacity(working.len());
        for item in &self.original_items {
            if take(item.as_str()) {
                items.push(item.clone());
            }
        }
        let retained = items.len();

        for step in &working {
            if take(*step) {
                items.push(step.to_string());
            }
        }

        let correct_order = derive_correct_order(&items, &working)?;
        debug!(
            steps = working.len(),
            retained,
            appended = items.len() - retained,
            "ordering session committed"
        );

        Ok(CommittedOrder {
            items,
            correct_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn new_session_starts_with_placeholder() {
        let sess = OrderingSession::new();
        assert_eq!(sess.original_items(), &[String::new()]);
        assert_eq!(sess.working_items(), vec![""]);
    }

    #[test]
    fn edit_presents_steps_in_correct_order() {
        let sess = OrderingSession::edit(&s(&["a", "b", "c"]), &[2, 0, 1]).unwrap();
        assert_eq!(sess.working_items(), vec!["c", "a", "b"]);
        assert_eq!(sess.original_items(), s(&["a", "b", "c"]).as_slice());
    }

    #[test]
    fn edit_rejects_out_of_range_order() {
        let err = OrderingSession::edit(&s(&["a"]), &[3]).unwrap_err();
        assert!(matches!(err, PermutationError::OutOfRange { index: 3, .. }));
    }

    #[test]
    fn placeholder_is_replaced_by_authored_steps() {
        let mut sess = OrderingSession::new();
        sess.update(0, "first").unwrap();
        sess.append();
        sess.update(1, "second").unwrap();
        sess.reorder(1, 0).unwrap();

        let c = sess.commit().unwrap();
        assert_eq!(c.items, s(&["second", "first"]));
        assert_eq!(c.correct_order, vec![0, 1]);
    }

    #[test]
    fn edited_step_text_drops_old_and_appends_new() {
        let mut sess = OrderingSession::edit(&s(&["a", "b", "c"]), &[0, 1, 2]).unwrap();
        sess.update(1, "B").unwrap();

        let c = sess.commit().unwrap();
        assert_eq!(c.items, s(&["a", "c", "B"]));
        assert_eq!(c.correct_order, vec![0, 2, 1]);
    }
}
