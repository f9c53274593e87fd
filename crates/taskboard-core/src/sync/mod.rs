//! Sync - cross-surface sync bus（durable slot + broadcast）

pub mod bus;

pub use self::bus::{
    DEFAULT_BROADCAST_CAPACITY, DEFAULT_STORAGE_KEY, Surface, SyncBus, SyncError,
};
