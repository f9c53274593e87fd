//! DragController - 1 本のポインタによる drag gesture の状態機械
//!
//! # 状態遷移
//! - Idle → Pressed: task card 上での pointer-down（まだ click と区別できない）
//! - Pressed → Dragging: activation distance 以上ポインタが動いた
//! - Pressed → Idle: そのまま離した（click、move intent なし）
//! - Dragging → Dropped: drop 先 column が解決できた（MoveIntent を返す）
//! - Dragging → Cancelled: 解決できない / pointer capture を失った
//!
//! # セッションの所有
//! gesture ごとの payload と hover 中の column は、controller が持つ 1 つの
//! `DragSession` にまとめています。drag 元（card, dashboard list）と drop 先（column）は
//! どちらも `DragToken` で controller に問い合わせます。グローバルな fallback slot は持ちません。
//!
//! # 後始末
//! 終端遷移（Dropped / Cancelled / click）では、結果を返す前に必ずセッションを破棄します。
//! 中断された gesture の payload が後続の無関係な pointer-up で解決されることはありません。

use tracing::{debug, info, warn};

use crate::domain::{DragToken, Status, Task, TaskId};
use crate::ports::IdGenerator;

use super::geometry::{Point, Rect};
use super::payload::DragPayload;
use super::targets::DropTargets;

/// Default activation distance (pointer units) separating a click from a drag.
pub const DEFAULT_ACTIVATION_DISTANCE: f64 = 5.0;

/// Resolved outcome of a drop: which task goes to which column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub task_id: TaskId,
    pub to: Status,
}

/// Observable phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released before the activation distance was reached.
    Click(TaskId),
    Dropped(MoveIntent),
    Cancelled,
}

/// Where the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// A card on the board itself (goes through the activation phase).
    Card,
    /// Another surface, e.g. the dashboard's upcoming list.
    External,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag gesture is already active ({0})")]
    GestureActive(DragToken),

    #[error("no active gesture for {0}")]
    UnknownToken(DragToken),
}

#[derive(Debug, Clone)]
struct DragSession {
    token: DragToken,
    payload: DragPayload,
    source: DragSource,
    origin: Point,
    activated: bool,
    hovered: Option<Status>,
}

/// DragController は drag gesture を 1 つずつ管理する
///
/// # 使用例
/// ```ignore
/// let mut drag = DragController::new(id_gen, DEFAULT_ACTIVATION_DISTANCE);
/// drag.register_target(Status::Done, Rect::new(220.0, 0.0, 100.0, 400.0));
///
/// let token = drag.press(&task, Point::new(10.0, 10.0))?;
/// drag.pointer_move(Point::new(240.0, 20.0));
/// drag.enter(Status::Done);
/// if let Some(DragOutcome::Dropped(intent)) = drag.release(Point::new(240.0, 20.0)) {
///     engine.apply_intent(intent).await?;
/// }
/// ```
pub struct DragController<G> {
    id_gen: G,
    activation_distance: f64,
    targets: DropTargets,
    session: Option<DragSession>,
}

impl<G: IdGenerator> DragController<G> {
    pub fn new(id_gen: G, activation_distance: f64) -> Self {
        Self {
            id_gen,
            activation_distance: activation_distance.max(0.0),
            targets: DropTargets::new(),
            session: None,
        }
    }

    pub fn register_target(&mut self, column: Status, bounds: Rect) {
        self.targets.register(column, bounds);
    }

    pub fn unregister_target(&mut self, column: Status) {
        self.targets.unregister(column);
        if let Some(session) = self.session.as_mut()
            && session.hovered == Some(column)
        {
            session.hovered = None;
        }
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(s) if s.activated => DragPhase::Dragging,
            Some(_) => DragPhase::Pressed,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Token of the active gesture, if any.
    pub fn active_token(&self) -> Option<DragToken> {
        self.session.as_ref().map(|s| s.token)
    }

    /// Payload lookup used by both the drag source and the drop targets.
    ///
    /// Returns `None` for a token whose gesture has ended.
    pub fn payload(&self, token: DragToken) -> Option<&DragPayload> {
        self.session
            .as_ref()
            .filter(|s| s.token == token)
            .map(|s| &s.payload)
    }

    /// Like [`DragController::payload`], for callers that treat a stale token as an error.
    pub fn lookup(&self, token: DragToken) -> Result<&DragPayload, DragError> {
        self.payload(token).ok_or(DragError::UnknownToken(token))
    }

    /// Column currently under the dragged card (enter/leave tracking).
    pub fn hovered(&self) -> Option<Status> {
        self.session
            .as_ref()
            .filter(|s| s.activated)
            .and_then(|s| s.hovered)
    }

    /// Pointer-down on a board card.
    ///
    /// A second pointer-down while a gesture is active is rejected and leaves
    /// the active gesture untouched.
    pub fn press(&mut self, task: &Task, at: Point) -> Result<DragToken, DragError> {
        self.start(DragPayload::from_task(task), DragSource::Card, at, false)
    }

    /// Starts a drag that originated on another surface.
    ///
    /// Such a gesture is already past its activation phase.
    pub fn begin_external(&mut self, payload: DragPayload, at: Point) -> Result<DragToken, DragError> {
        self.start(payload, DragSource::External, at, true)
    }

    fn start(
        &mut self,
        payload: DragPayload,
        source: DragSource,
        at: Point,
        activated: bool,
    ) -> Result<DragToken, DragError> {
        if let Some(active) = &self.session {
            debug!(active = %active.token, task_id = %payload.task_id, "ignoring pointer-down during active gesture");
            return Err(DragError::GestureActive(active.token));
        }
        let token = self.id_gen.generate_drag_token();
        debug!(token = %token, task_id = %payload.task_id, ?source, "gesture started");
        self.session = Some(DragSession {
            token,
            payload,
            source,
            origin: at,
            activated,
            hovered: None,
        });
        Ok(token)
    }

    /// Pointer moved. Activates the drag once the threshold is reached.
    pub fn pointer_move(&mut self, to: Point) -> DragPhase {
        if let Some(session) = self.session.as_mut()
            && !session.activated
            && session.origin.distance_to(to) >= self.activation_distance
        {
            session.activated = true;
            debug!(token = %session.token, task_id = %session.payload.task_id, "drag activated");
        }
        self.phase()
    }

    /// Dragged card entered a column.
    pub fn enter(&mut self, column: Status) {
        if let Some(session) = self.session.as_mut().filter(|s| s.activated) {
            session.hovered = Some(column);
        }
    }

    /// Dragged card left a column. Leaving a column that is not the hovered
    /// one (late event after entering the next) is ignored.
    pub fn leave(&mut self, column: Status) {
        if let Some(session) = self.session.as_mut()
            && session.hovered == Some(column)
        {
            session.hovered = None;
        }
    }

    /// Pointer-up. Ends the gesture whatever happens.
    ///
    /// Returns `None` when no gesture was active.
    pub fn release(&mut self, at: Point) -> Option<DragOutcome> {
        let session = self.session.take()?;
        let outcome = if !session.activated {
            DragOutcome::Click(session.payload.task_id)
        } else {
            match self.targets.resolve(at, session.hovered) {
                Some(to) => DragOutcome::Dropped(MoveIntent {
                    task_id: session.payload.task_id,
                    to,
                }),
                None => DragOutcome::Cancelled,
            }
        };
        match outcome {
            DragOutcome::Dropped(intent) => {
                info!(token = %session.token, task_id = %intent.task_id, to = %intent.to, source = ?session.source, "dropped")
            }
            DragOutcome::Cancelled if self.targets.is_empty() => {
                warn!(token = %session.token, task_id = %session.payload.task_id, "released with no drop targets registered")
            }
            DragOutcome::Cancelled => {
                debug!(token = %session.token, task_id = %session.payload.task_id, "released outside any column")
            }
            DragOutcome::Click(_) => {}
        }
        Some(outcome)
    }

    /// Pointer capture was lost (window blur, touch cancel, ...).
    pub fn lose_capture(&mut self) -> Option<DragOutcome> {
        self.cancel()
    }

    /// Aborts the active gesture without a move intent.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        let session = self.session.take()?;
        debug!(token = %session.token, task_id = %session.payload.task_id, "gesture cancelled");
        Some(DragOutcome::Cancelled)
    }
}
