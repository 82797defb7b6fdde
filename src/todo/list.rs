//! Todo lists and their items.

use std::fmt;

use super::validation::validate_name;
use super::ItemId;
use super::ListId;
use crate::error::{NameKind, TodoError};
use crate::Result;

/// A single named entry within a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Identifier within the parent list.
    pub id: ItemId,
    /// Trimmed, non-empty name.
    pub name: String,
    /// Whether the item has been checked off.
    pub completed: bool,
}

/// Whether every item of a non-empty list is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// Empty, or at least one item still open.
    Incomplete,
    /// Non-empty and every item completed.
    Complete,
}

impl CompletionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionState::Incomplete => "incomplete",
            CompletionState::Complete => "complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, CompletionState::Complete)
    }
}

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed versus total item count, displayed as `completed/total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed fraction in `[0, 1]`.
    ///
    /// Empty lists, and anything that would not produce a finite ratio,
    /// count as zero.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let ratio = self.completed as f64 / self.total as f64;
        if ratio.is_finite() {
            ratio
        } else {
            0.0
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// A named, ordered collection of items.
#[derive(Debug, Clone)]
pub struct TodoList {
    id: ListId,
    name: String,
    items: Vec<TodoItem>,
    next_item_id: u64,
}

impl TodoList {
    /// Create an empty list. The name must already be validated.
    pub(crate) fn new(id: ListId, name: String) -> Self {
        Self {
            id,
            name,
            items: Vec::new(),
            next_item_id: 0,
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Look up an item by identifier.
    pub fn item(&self, id: ItemId) -> Result<&TodoItem> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(TodoError::NotFound(NameKind::Item))
    }

    fn position(&self, id: ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TodoError::NotFound(NameKind::Item))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completion_state(&self) -> CompletionState {
        if !self.items.is_empty() && self.items.iter().all(|item| item.completed) {
            CompletionState::Complete
        } else {
            CompletionState::Incomplete
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.items.iter().filter(|item| item.completed).count(),
            total: self.items.len(),
        }
    }

    /// Append a new open item.
    ///
    /// The name is trimmed, length-checked and must not match any item
    /// already in this list.
    pub fn add_item(&mut self, raw: &str) -> Result<ItemId> {
        let name = validate_name(NameKind::Item, raw)?;
        if self.items.iter().any(|item| item.name == name) {
            return Err(TodoError::DuplicateName(NameKind::Item));
        }

        let id = ItemId::bump(&mut self.next_item_id);
        self.items.push(TodoItem {
            id,
            name,
            completed: false,
        });
        Ok(id)
    }

    /// Remove an item, returning it.
    pub fn remove_item(&mut self, id: ItemId) -> Result<TodoItem> {
        let pos = self.position(id)?;
        Ok(self.items.remove(pos))
    }

    /// Flip an item's completion flag, returning the new value.
    pub fn toggle_item(&mut self, id: ItemId) -> Result<bool> {
        let pos = self.position(id)?;
        let item = &mut self.items[pos];
        item.completed = !item.completed;
        Ok(item.completed)
    }

    /// Mark every item as completed.
    pub fn complete_all(&mut self) {
        for item in &mut self.items {
            item.completed = true;
        }
    }
}

/// Items with open ones first, then completed ones.
///
/// This is a stable partition: relative order within each group is kept.
pub fn sort_items_for_display(list: &TodoList) -> Vec<&TodoItem> {
    let (mut open, done): (Vec<&TodoItem>, Vec<&TodoItem>) =
        list.items.iter().partition(|item| !item.completed);
    open.extend(done);
    open
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(names: &[&str]) -> TodoList {
        let mut list = TodoList::new(ListId::from_raw(0), "Chores".to_string());
        for name in names {
            list.add_item(name).unwrap();
        }
        list
    }

    #[test]
    fn test_new_list_is_empty_and_incomplete() {
        let list = list_with(&[]);
        assert!(list.is_empty());
        assert_eq!(list.completion_state(), CompletionState::Incomplete);
        assert_eq!(list.progress().to_string(), "0/0");
        assert_eq!(list.progress().ratio(), 0.0);
    }

    #[test]
    fn test_add_item_trims_and_starts_open() {
        let mut list = list_with(&[]);
        let id = list.add_item("  Milk ").unwrap();
        let item = list.item(id).unwrap();
        assert_eq!(item.name, "Milk");
        assert!(!item.completed);
    }

    #[test]
    fn test_add_item_rejects_duplicate() {
        let mut list = list_with(&["Milk"]);
        let err = list.add_item("Milk").unwrap_err();
        assert!(matches!(err, TodoError::DuplicateName(NameKind::Item)));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_add_item_rejects_invalid_name() {
        let mut list = list_with(&[]);
        let err = list.add_item(&"x".repeat(101)).unwrap_err();
        assert!(matches!(err, TodoError::InvalidName(NameKind::Item)));
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_single_item_completes_list() {
        let mut list = list_with(&[]);
        let milk = list.add_item("Milk").unwrap();
        assert_eq!(list.completion_state(), CompletionState::Incomplete);

        assert!(list.toggle_item(milk).unwrap());
        assert_eq!(list.completion_state(), CompletionState::Complete);

        assert!(!list.toggle_item(milk).unwrap());
        assert_eq!(list.completion_state(), CompletionState::Incomplete);
    }

    #[test]
    fn test_toggle_one_of_many_stays_incomplete() {
        let mut list = list_with(&["Eggs"]);
        let milk = list.add_item("Milk").unwrap();
        list.toggle_item(milk).unwrap();
        assert_eq!(list.completion_state(), CompletionState::Incomplete);
    }

    #[test]
    fn test_progress_two_of_five() {
        let mut list = list_with(&["a", "b", "c", "d", "e"]);
        let ids: Vec<ItemId> = list.items().iter().map(|i| i.id).collect();
        list.toggle_item(ids[1]).unwrap();
        list.toggle_item(ids[3]).unwrap();

        let progress = list.progress();
        assert_eq!(progress.to_string(), "2/5");
        assert!((progress.ratio() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_item_keeps_sibling_ids() {
        let mut list = list_with(&["a", "b", "c"]);
        let ids: Vec<ItemId> = list.items().iter().map(|i| i.id).collect();

        let removed = list.remove_item(ids[0]).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(list.item(ids[1]).unwrap().name, "b");
        assert_eq!(list.item(ids[2]).unwrap().name, "c");
    }

    #[test]
    fn test_remove_unknown_item_is_not_found() {
        let mut list = list_with(&["a"]);
        let err = list.remove_item(ItemId::from_raw(5)).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(NameKind::Item)));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut list = list_with(&["a"]);
        let first = list.items()[0].id;
        list.remove_item(first).unwrap();
        let next = list.add_item("b").unwrap();
        assert_ne!(first, next);
        assert!(list.item(first).is_err());
    }

    #[test]
    fn test_toggle_unknown_item_is_not_found() {
        let mut list = list_with(&[]);
        assert!(matches!(
            list.toggle_item(ItemId::from_raw(0)),
            Err(TodoError::NotFound(NameKind::Item))
        ));
    }

    #[test]
    fn test_complete_all() {
        let mut list = list_with(&["a", "b", "c"]);
        list.complete_all();
        assert!(list.items().iter().all(|i| i.completed));
        assert!(list.completion_state().is_complete());
        assert_eq!(list.progress().to_string(), "3/3");
    }

    #[test]
    fn test_complete_all_on_empty_list_stays_incomplete() {
        let mut list = list_with(&[]);
        list.complete_all();
        assert_eq!(list.completion_state(), CompletionState::Incomplete);
    }

    #[test]
    fn test_sort_items_stable_partition() {
        let mut list = list_with(&["a", "b", "c", "d", "e"]);
        let ids: Vec<ItemId> = list.items().iter().map(|i| i.id).collect();
        list.toggle_item(ids[0]).unwrap();
        list.toggle_item(ids[3]).unwrap();

        let names: Vec<&str> = sort_items_for_display(&list)
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, ["b", "c", "e", "a", "d"]);
    }

    #[test]
    fn test_completion_state_str() {
        assert_eq!(CompletionState::Complete.to_string(), "complete");
        assert_eq!(CompletionState::Incomplete.as_str(), "incomplete");
    }
}
