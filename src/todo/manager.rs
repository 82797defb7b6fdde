//! Ordered collection of lists owned by one session.

use std::cmp::Ordering;

use tracing::debug;

use super::validation::validate_name;
use super::{ItemId, ListId, TodoItem, TodoList};
use crate::error::{NameKind, TodoError};
use crate::Result;

/// All lists of a single session, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ListManager {
    lists: Vec<TodoList>,
    next_list_id: u64,
}

impl ListManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lists in their stored order.
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    fn position(&self, id: ListId) -> Result<usize> {
        self.lists
            .iter()
            .position(|list| list.id() == id)
            .ok_or(TodoError::NotFound(NameKind::List))
    }

    fn name_taken(&self, name: &str, except: Option<ListId>) -> bool {
        self.lists
            .iter()
            .any(|list| Some(list.id()) != except && list.name() == name)
    }

    /// Create a new empty list at the end of the collection.
    pub fn create_list(&mut self, raw: &str) -> Result<ListId> {
        let name = validate_name(NameKind::List, raw)?;
        if self.name_taken(&name, None) {
            return Err(TodoError::DuplicateName(NameKind::List));
        }

        let id = ListId::bump(&mut self.next_list_id);
        debug!(list_id = %id, name = %name, "list created");
        self.lists.push(TodoList::new(id, name));
        Ok(id)
    }

    /// Look up a list by identifier.
    pub fn get_list(&self, id: ListId) -> Result<&TodoList> {
        self.lists
            .iter()
            .find(|list| list.id() == id)
            .ok_or(TodoError::NotFound(NameKind::List))
    }

    fn get_list_mut(&mut self, id: ListId) -> Result<&mut TodoList> {
        self.lists
            .iter_mut()
            .find(|list| list.id() == id)
            .ok_or(TodoError::NotFound(NameKind::List))
    }

    /// Rename a list.
    ///
    /// A missing name keeps the current one. Renaming a list to its own
    /// current name succeeds without change; only other lists take part
    /// in the uniqueness check.
    pub fn rename_list(&mut self, id: ListId, raw: Option<&str>) -> Result<()> {
        let current = self.get_list(id)?.name().to_string();
        let name = validate_name(NameKind::List, raw.unwrap_or(&current))?;

        if name == current {
            return Ok(());
        }
        if self.name_taken(&name, Some(id)) {
            return Err(TodoError::DuplicateName(NameKind::List));
        }

        debug!(list_id = %id, from = %current, to = %name, "list renamed");
        self.get_list_mut(id)?.set_name(name);
        Ok(())
    }

    /// Remove a list, returning it.
    pub fn delete_list(&mut self, id: ListId) -> Result<TodoList> {
        let pos = self.position(id)?;
        Ok(self.lists.remove(pos))
    }

    pub fn add_item(&mut self, id: ListId, raw: &str) -> Result<ItemId> {
        self.get_list_mut(id)?.add_item(raw)
    }

    pub fn remove_item(&mut self, id: ListId, item: ItemId) -> Result<TodoItem> {
        self.get_list_mut(id)?.remove_item(item)
    }

    /// Flip an item's completion flag, returning the new value.
    pub fn toggle_item(&mut self, id: ListId, item: ItemId) -> Result<bool> {
        self.get_list_mut(id)?.toggle_item(item)
    }

    pub fn complete_all(&mut self, id: ListId) -> Result<()> {
        self.get_list_mut(id)?.complete_all();
        Ok(())
    }

    /// Lists ordered for the index page. See [`sort_lists_for_display`].
    pub fn sorted_for_display(&self) -> Vec<&TodoList> {
        sort_lists_for_display(&self.lists)
    }
}

/// Order lists by completed ratio, least complete first.
///
/// Empty lists count as ratio 0. The sort is stable, so ties keep their
/// stored order.
pub fn sort_lists_for_display(lists: &[TodoList]) -> Vec<&TodoList> {
    let mut sorted: Vec<&TodoList> = lists.iter().collect();
    sorted.sort_by(|a, b| {
        a.progress()
            .ratio()
            .partial_cmp(&b.progress().ratio())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}
