use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::store::{PostgrestStore, RemoteStore, StoreSettings};
use crate::{EngineEvent, RecordId, StoreError};

enum EngineCommand {
    FetchAll,
    Insert { text: String },
    Delete { record_id: RecordId },
}

/// Command/event bridge between the synchronous front-end and the async
/// store. Commands are serviced on a dedicated runtime thread, one task
/// each, so two in-flight operations may complete in either order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let store = PostgrestStore::new(settings)?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Builds a handle around an injected store, e.g. a fake in tests.
    pub fn with_store(store: Arc<dyn RemoteStore>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let store = store.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(store.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn fetch_all(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchAll);
    }

    pub fn insert(&self, text: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Insert { text: text.into() });
    }

    pub fn delete(&self, record_id: RecordId) {
        let _ = self.cmd_tx.send(EngineCommand::Delete { record_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }
}

async fn handle_command(
    store: &dyn RemoteStore,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchAll => {
            let result = store.fetch_all().await;
            let _ = event_tx.send(EngineEvent::FetchCompleted { result });
        }
        EngineCommand::Insert { text } => {
            let result = store.insert(&text).await;
            let _ = event_tx.send(EngineEvent::InsertCompleted { result });
        }
        EngineCommand::Delete { record_id } => {
            let result = store.delete(record_id).await;
            let _ = event_tx.send(EngineEvent::DeleteCompleted { record_id, result });
        }
    }
}
