//! BoardBuilder - board の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 未ログインなら engine を作らずに login へ振り向ける
//! - 開発体験の改善（明確なエラーメッセージ）

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{BoardConfig, ConfigError};
use crate::domain::BoardError;
use crate::drag::{DragController, DragOutcome, Point};
use crate::impls::TracingNoticeSink;
use crate::ports::{DurableSlot, IdentityProvider, NoticeSink, SystemClock, TaskStore, UlidGenerator};
use crate::reconcile::{MoveOutcome, ReconcileEngine};
use crate::sync::{Surface, SyncBus};
use crate::views::Summary;

use super::guard::{HOME_PATH, login_redirect};

/// BoardBuilder は Board を構築
///
/// # 使用例
/// ```ignore
/// let mut board = BoardBuilder::new(store, identity_provider, slot)
///     .config(config)
///     .notices(Arc::new(TracingNoticeSink))
///     .path("/task")
///     .build()?;
/// board.engine_mut().load().await?;
/// ```
///
/// # Fail-fast 設計
/// - build() 時に identity provider へ問い合わせる
/// - 未ログインなら BuildError::Unauthenticated（redirect 先つき）を返す
/// - 設定値が不正なら BuildError::Config を返す
pub struct BoardBuilder<S, P, D> {
    store: S,
    identity_provider: P,
    slot: D,
    config: BoardConfig,
    notices: Option<Arc<dyn NoticeSink>>,
    path: String,
}

/// BuildError は board 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("not signed in, redirect to {redirect}")]
    Unauthenticated { redirect: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl<S, P, D> BoardBuilder<S, P, D>
where
    S: TaskStore,
    P: IdentityProvider,
    D: DurableSlot,
{
    /// 新しい BoardBuilder を作成
    pub fn new(store: S, identity_provider: P, slot: D) -> Self {
        Self {
            store,
            identity_provider,
            slot,
            config: BoardConfig::default(),
            notices: None,
            path: HOME_PATH.to_string(),
        }
    }

    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// 通知の出力先（省略時は TracingNoticeSink）
    pub fn notices(mut self, notices: Arc<dyn NoticeSink>) -> Self {
        self.notices = Some(notices);
        self
    }

    /// 表示しようとしている path（未ログイン時の redirect の `from`）
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// BoardBuilder を構築して Board を生成
    ///
    /// # 検証
    /// - 設定値が使えるか
    /// - identity provider が identity を返すか
    pub fn build(self) -> Result<Board<S, D>, BuildError> {
        self.config.validate()?;
        let Some(identity) = self.identity_provider.current_identity() else {
            let redirect = login_redirect(&self.path);
            warn!(path = %self.path, "no identity, redirecting to login");
            return Err(BuildError::Unauthenticated { redirect });
        };
        info!(user_id = %identity.user_id, key = %self.config.storage_key, "board ready");

        let bus = SyncBus::new(
            self.slot,
            self.config.storage_key.clone(),
            self.config.broadcast_capacity,
        );
        let notices = self
            .notices
            .unwrap_or_else(|| Arc::new(TracingNoticeSink) as Arc<dyn NoticeSink>);
        let engine = ReconcileEngine::new(identity, self.store, bus, notices);
        let drag = DragController::new(
            UlidGenerator::new(SystemClock),
            self.config.activation_distance,
        );
        Ok(Board {
            engine,
            drag,
            config: self.config,
        })
    }
}

/// Board は engine と drag controller をまとめたもの
///
/// drop の結果を engine へ渡す配線だけを持ちます。
pub struct Board<S, D> {
    engine: ReconcileEngine<S, D, Arc<dyn NoticeSink>>,
    drag: DragController<UlidGenerator<SystemClock>>,
    config: BoardConfig,
}

impl<S: TaskStore, D: DurableSlot> Board<S, D> {
    pub fn engine(&self) -> &ReconcileEngine<S, D, Arc<dyn NoticeSink>> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReconcileEngine<S, D, Arc<dyn NoticeSink>> {
        &mut self.engine
    }

    pub fn drag(&self) -> &DragController<UlidGenerator<SystemClock>> {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragController<UlidGenerator<SystemClock>> {
        &mut self.drag
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Mounts another read-only surface on this board's bus.
    pub fn mount(&self) -> Surface<D> {
        self.engine.bus().mount()
    }

    /// Dashboard summary with the configured upcoming limit.
    pub fn summary(&self, query: &str) -> Summary {
        Summary::from_columns(self.engine.columns(), query, self.config.upcoming_limit)
    }

    /// Ends the active gesture and applies a drop.
    ///
    /// Returns the gesture outcome and, for a drop, the move result.
    pub async fn release(
        &mut self,
        at: Point,
    ) -> Option<(DragOutcome, Option<Result<MoveOutcome, BoardError>>)> {
        let outcome = self.drag.release(at)?;
        let moved = match outcome {
            DragOutcome::Dropped(intent) => Some(self.engine.apply_intent(intent).await),
            DragOutcome::Click(_) | DragOutcome::Cancelled => None,
        };
        Some((outcome, moved))
    }
}
