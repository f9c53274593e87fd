//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（task store, auth provider, ブラウザの永続領域, toast UI）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - TaskStore が source of truth（正本）
//! - DurableSlot は surface 間共有のための snapshot 置き場（正本ではない）
//! - すべての port は `Send + Sync`

pub mod clock;
pub mod durable_slot;
pub mod id_generator;
pub mod identity;
pub mod notice_sink;
pub mod task_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::durable_slot::{DurableSlot, SlotError};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::identity::{Identity, IdentityProvider};
pub use self::notice_sink::NoticeSink;
pub use self::task_store::{StoreError, TaskStore};
