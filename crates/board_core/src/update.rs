use crate::{BoardState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BoardState, msg: Msg) -> (BoardState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Blank input is a silent no-op, not an error: no remote call,
            // no busy flag, no banner change.
            if state.input().trim().is_empty() {
                return (state, Vec::new());
            }
            // The guard trims, the payload does not.
            let text = state.input().to_string();
            state.begin_mutation();
            vec![Effect::Insert { text }]
        }
        Msg::DeleteClicked { item_id } => {
            // Membership is not pre-checked; the remote delete is attempted
            // as given.
            state.begin_mutation();
            vec![Effect::Delete { item_id }]
        }
        Msg::RefreshRequested => {
            state.begin_refresh();
            vec![Effect::FetchAll]
        }
        Msg::FetchFinished { result } => {
            state.apply_fetch(result);
            Vec::new()
        }
        Msg::InsertFinished { result } => {
            state.apply_insert(result);
            Vec::new()
        }
        Msg::DeleteFinished { item_id, result } => {
            state.apply_delete(item_id, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
