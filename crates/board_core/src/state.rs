use chrono::{DateTime, Utc};

use crate::view_model::{BoardViewModel, ItemRowView};

pub type ItemId = i64;

/// One item mirrored from the remote source. The id and timestamp are
/// server-assigned and immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Transient controller state. Created empty at startup, populated by the
/// first refresh, discarded on exit. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    input: String,
    items: Vec<Item>,
    pending: bool,
    last_error: Option<String>,
    dirty: bool,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> BoardViewModel {
        BoardViewModel {
            input: self.input.clone(),
            items: self
                .items
                .iter()
                .map(|item| ItemRowView {
                    item_id: item.id,
                    text: item.text.clone(),
                    created_at: item.created_at,
                })
                .collect(),
            pending: self.pending,
            last_error: self.last_error.clone(),
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Entry point of insert/delete: busy until the matching completion
    /// arrives. The flag is advisory; overlapping completions are applied
    /// in arrival order and the last one wins.
    pub(crate) fn begin_mutation(&mut self) {
        self.pending = true;
        self.last_error = None;
        self.dirty = true;
    }

    /// Refresh clears the error banner but never touches the busy flag.
    pub(crate) fn begin_refresh(&mut self) {
        self.last_error = None;
        self.dirty = true;
    }

    pub(crate) fn apply_fetch(&mut self, result: Result<Vec<Item>, String>) {
        match result {
            // Wholesale replacement; an empty list is a valid empty state.
            Ok(items) => self.items = items,
            Err(message) => self.last_error = Some(message),
        }
        self.dirty = true;
    }

    pub(crate) fn apply_insert(&mut self, result: Result<Item, String>) {
        self.pending = false;
        match result {
            Ok(item) => {
                // Prepend the server-returned row, never a local guess.
                self.items.insert(0, item);
                self.input.clear();
            }
            Err(message) => self.last_error = Some(fallback(message, "Failed to add")),
        }
        self.dirty = true;
    }

    pub(crate) fn apply_delete(&mut self, item_id: ItemId, result: Result<(), String>) {
        self.pending = false;
        match result {
            // A filter, not a single-index removal: accidental duplicates
            // sharing an id all drop.
            Ok(()) => self.items.retain(|item| item.id != item_id),
            Err(message) => self.last_error = Some(fallback(message, "Failed to remove")),
        }
        self.dirty = true;
    }
}

fn fallback(message: String, default: &str) -> String {
    if message.is_empty() {
        default.to_string()
    } else {
        message
    }
}
