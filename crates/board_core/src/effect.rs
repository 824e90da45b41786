#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read every row from the remote source, newest first.
    FetchAll,
    /// Insert a new row; the server assigns id and timestamp.
    Insert { text: String },
    /// Delete the row(s) matching the id.
    Delete { item_id: crate::ItemId },
}
