//! Drag - drag-and-drop の session 管理
//!
//! - **controller**: gesture の状態機械（Idle → Pressed → Dragging → Dropped/Cancelled）
//! - **targets**: drop 先 column の登録と closest-center 判定
//! - **payload**: gesture 中だけ存在する task の snapshot
//! - **geometry**: Point / Rect

pub mod controller;
pub mod geometry;
pub mod payload;
pub mod targets;

pub use self::controller::{
    DEFAULT_ACTIVATION_DISTANCE, DragController, DragError, DragOutcome, DragPhase, DragSource,
    MoveIntent,
};
pub use self::geometry::{Point, Rect};
pub use self::payload::{DragPayload, PAYLOAD_MEDIA_TYPE};
pub use self::targets::DropTargets;
