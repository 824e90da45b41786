use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use board_core::{Effect, Item, Msg};
use board_engine::{EngineEvent, EngineHandle, Record, StoreSettings};
use board_logging::{board_info, board_warn};

use crate::app::AppEvent;
use crate::config::BoardConfig;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(event_tx: mpsc::Sender<AppEvent>, config: &BoardConfig) -> anyhow::Result<Self> {
        let mut settings = StoreSettings::new(&config.endpoint, &config.api_key);
        settings.table = config.table.clone();

        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchAll => {
                    board_info!("FetchAll");
                    self.engine.fetch_all();
                }
                Effect::Insert { text } => {
                    board_info!("Insert text_len={}", text.len());
                    self.engine.insert(text);
                }
                Effect::Delete { item_id } => {
                    board_info!("Delete id={}", item_id);
                    self.engine.delete(item_id);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::FetchCompleted { result } => Msg::FetchFinished {
                        result: result
                            .map(|records| records.into_iter().map(map_record).collect())
                            .map_err(|err| {
                                board_warn!("Fetch failed: {}", err);
                                err.to_string()
                            }),
                    },
                    EngineEvent::InsertCompleted { result } => Msg::InsertFinished {
                        result: result.map(map_record).map_err(|err| {
                            board_warn!("Insert failed: {}", err);
                            err.to_string()
                        }),
                    },
                    EngineEvent::DeleteCompleted { record_id, result } => Msg::DeleteFinished {
                        item_id: record_id,
                        result: result.map_err(|err| {
                            board_warn!("Delete of {} failed: {}", record_id, err);
                            err.to_string()
                        }),
                    },
                };
                if event_tx.send(AppEvent::Core(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_record(record: Record) -> Item {
    Item {
        id: record.id,
        text: record.text,
        created_at: record.created_at,
    }
}
