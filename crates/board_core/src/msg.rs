#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the item input box.
    InputChanged(String),
    /// User submitted the current input as a new item.
    SubmitClicked,
    /// User clicked delete on a row.
    DeleteClicked { item_id: crate::ItemId },
    /// Reload the list from the remote source (startup or manual).
    RefreshRequested,
    /// Remote read finished.
    FetchFinished {
        result: Result<Vec<crate::Item>, String>,
    },
    /// Remote insert finished.
    InsertFinished {
        result: Result<crate::Item, String>,
    },
    /// Remote delete finished.
    DeleteFinished {
        item_id: crate::ItemId,
        result: Result<(), String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
