//! IdGenerator port - ID 生成の抽象化
//!
//! store 側で task id を採番するためのインターフェースです。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース

use crate::domain::ids::{DragToken, TaskId, UserId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は衝突しない ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
pub trait IdGenerator: Send + Sync {
    /// Task ID を生成
    fn generate_task_id(&self) -> TaskId;

    /// User ID を生成
    fn generate_user_id(&self) -> UserId;

    /// Drag gesture の token を生成
    fn generate_drag_token(&self) -> DragToken;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// これにより、テスト時に FixedClock を使って timestamp 部分を固定できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_task_id(&self) -> TaskId {
        TaskId::from(self.next_ulid())
    }

    fn generate_user_id(&self) -> UserId {
        UserId::from(self.next_ulid())
    }

    fn generate_drag_token(&self) -> DragToken {
        DragToken::from(self.next_ulid())
    }
}
