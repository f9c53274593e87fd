//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: 開発用の task store
//! - **FlakyTaskStore**: 障害注入用のラッパー
//! - **InMemoryDurableSlot / FileDurableSlot**: column model の保存先
//! - **StaticIdentity**: 固定の identity provider
//! - **TracingNoticeSink / CollectingNoticeSink**: 通知の出力先
//!
//! # 本番用実装
//! 本番用の store（ORM + DB）や identity provider は別クレートに配置します。

pub mod flaky_store;
pub mod inmem_store;
pub mod slots;
pub mod support;

// 主要な型を再エクスポート
pub use self::flaky_store::FlakyTaskStore;
pub use self::inmem_store::InMemoryTaskStore;
pub use self::slots::{FileDurableSlot, InMemoryDurableSlot};
pub use self::support::{CollectingNoticeSink, StaticIdentity, TracingNoticeSink};
