//! SyncBus - surface 間で column model を共有する
//!
//! # 仕組み
//! 1. 変更した surface が model 全体を durable slot に書き込む（in-memory の変更の直後）
//! 2. 同じ snapshot を broadcast channel に流す
//! 3. 読み取り専用の surface は mount 時に slot から lazy pull し、以降は通知を受け取る
//!
//! last-write-wins: merge はせず、最新の snapshot が常に前のものを置き換えます。

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, error, warn};

use crate::board::Columns;
use crate::ports::{DurableSlot, SlotError};

/// Slot key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "taskboard:columns";

/// Broadcast buffer size used when none is configured.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("failed to encode column model: {0}")]
    Encode(#[from] serde_json::Error),
}

struct Shared<S> {
    slot: S,
    key: String,
    sender: broadcast::Sender<Arc<Columns>>,
}

/// SyncBus は durable slot + broadcast channel をまとめたもの
///
/// Clone は同じ slot と channel を共有します。
pub struct SyncBus<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for SyncBus<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: DurableSlot> SyncBus<S> {
    pub fn new(slot: S, key: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                slot,
                key: key.into(),
                sender,
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.shared.key
    }

    /// Persists the snapshot to the slot, then broadcasts it.
    ///
    /// Having no subscriber is not an error.
    pub fn publish(&self, columns: &Columns) -> Result<(), SyncError> {
        let encoded = serde_json::to_string(columns)?;
        self.shared.slot.write(&self.shared.key, &encoded)?;
        let receivers = self
            .shared
            .sender
            .send(Arc::new(columns.clone()))
            .unwrap_or(0);
        debug!(key = %self.shared.key, tasks = columns.len(), receivers, "column model published");
        Ok(())
    }

    /// Reads the current snapshot from the slot.
    ///
    /// A missing slot yields an empty model; an unreadable one is logged and
    /// also yields an empty model.
    pub fn pull(&self) -> Columns {
        match self.shared.slot.read(&self.shared.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(columns) => columns,
                Err(err) => {
                    warn!(key = %self.shared.key, error = %err, "failed to parse stored columns");
                    Columns::default()
                }
            },
            Ok(None) => Columns::default(),
            Err(err) => {
                error!(key = %self.shared.key, error = %err, "failed to read stored columns");
                Columns::default()
            }
        }
    }

    /// Mounts a read-only surface: subscribe, then pull the current snapshot.
    pub fn mount(&self) -> Surface<S> {
        let receiver = self.shared.sender.subscribe();
        let columns = self.pull();
        Surface {
            bus: self.clone(),
            receiver,
            columns,
        }
    }
}

/// Surface は独立してマウントされる読み取り専用ビューの購読口
pub struct Surface<S> {
    bus: SyncBus<S>,
    receiver: broadcast::Receiver<Arc<Columns>>,
    columns: Columns,
}

impl<S: DurableSlot> Surface<S> {
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Applies pending notifications without waiting.
    ///
    /// Only the latest snapshot matters. Returns `true` when the view changed.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => {
                    self.columns = (*snapshot).clone();
                    changed = true;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "surface lagged, pulling from slot");
                    self.columns = self.bus.pull();
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }

    /// Waits for the next snapshot. Returns `None` once every publisher is gone.
    pub async fn changed(&mut self) -> Option<&Columns> {
        match self.receiver.recv().await {
            Ok(snapshot) => self.columns = (*snapshot).clone(),
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "surface lagged, pulling from slot");
                self.columns = self.bus.pull();
            }
            Err(RecvError::Closed) => return None,
        }
        Some(&self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use crate::domain::task::fixtures::task;
    use crate::impls::InMemoryDurableSlot;

    fn bus() -> SyncBus<Arc<InMemoryDurableSlot>> {
        SyncBus::new(
            Arc::new(InMemoryDurableSlot::new()),
            DEFAULT_STORAGE_KEY,
            DEFAULT_BROADCAST_CAPACITY,
        )
    }

    #[test]
    fn publish_writes_the_slot() {
        let bus = bus();
        let columns = Columns::from_tasks(vec![task("A", Status::Done)]);
        bus.publish(&columns).unwrap();
        assert_eq!(bus.pull(), columns);
    }

    #[test]
    fn surface_mounted_later_sees_latest_snapshot() {
        let bus = bus();
        let columns = Columns::from_tasks(vec![task("A", Status::InProgress)]);
        bus.publish(&columns).unwrap();

        let surface = bus.mount();
        assert_eq!(surface.columns(), &columns);
    }

    #[test]
    fn refresh_keeps_last_write() {
        let bus = bus();
        let mut surface = bus.mount();
        assert!(surface.columns().is_empty());

        let first = Columns::from_tasks(vec![task("A", Status::Todo)]);
        let second = Columns::from_tasks(vec![task("B", Status::Done)]);
        bus.publish(&first).unwrap();
        bus.publish(&second).unwrap();

        assert!(surface.refresh());
        assert_eq!(surface.columns(), &second);
        assert!(!surface.refresh());
    }

    #[test]
    fn lagged_surface_recovers_from_slot() {
        let bus = SyncBus::new(Arc::new(InMemoryDurableSlot::new()), DEFAULT_STORAGE_KEY, 1);
        let mut surface = bus.mount();

        let mut last = Columns::default();
        for i in 0..5 {
            last = Columns::from_tasks(vec![task(&format!("T{i}"), Status::Todo)]);
            bus.publish(&last).unwrap();
        }

        surface.refresh();
        assert_eq!(surface.columns(), &last);
    }

    #[test]
    fn corrupt_slot_mounts_empty() {
        let slot = Arc::new(InMemoryDurableSlot::new());
        slot.write(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let bus = SyncBus::new(slot, DEFAULT_STORAGE_KEY, 4);
        assert!(bus.mount().columns().is_empty());
    }

    #[tokio::test]
    async fn changed_wakes_on_publish() {
        let bus = bus();
        let mut surface = bus.mount();
        let columns = Columns::from_tasks(vec![task("A", Status::Done)]);

        let publisher = bus.clone();
        let expected = columns.clone();
        tokio::spawn(async move {
            publisher.publish(&expected).unwrap();
        });

        let seen = surface.changed().await.cloned();
        assert_eq!(seen, Some(columns));
    }
}
