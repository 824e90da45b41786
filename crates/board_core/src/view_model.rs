use chrono::{DateTime, Utc};

use crate::ItemId;

/// Everything the rendering layer consumes. Rows are in display order,
/// newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardViewModel {
    pub input: String,
    pub items: Vec<ItemRowView>,
    pub pending: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowView {
    pub item_id: ItemId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
