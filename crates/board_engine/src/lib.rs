//! Pinboard engine: remote CRUD calls and effect execution.
mod engine;
mod store;
mod types;

pub use engine::EngineHandle;
pub use store::{PostgrestStore, RemoteStore, StoreSettings};
pub use types::{EngineEvent, FailureKind, Record, RecordId, StoreError};
