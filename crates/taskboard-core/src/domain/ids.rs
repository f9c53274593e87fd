//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID + ジェネリック実装
//! ID は ULID (Universally Unique Lexicographically Sortable Identifier) を使用します。
//! Phantom type パターンで TaskId / UserId / DragToken を型レベルで区別します。
//!
//! ## 文字列表現
//! - Display: `task-01HV...` のようにプレフィックス付き
//! - Serialize: Display と同じ文字列（durable slot や store の JSON にそのまま載る）
//! - FromStr / Deserialize: プレフィックス付き・なしの両方を受け付ける

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"task-", "user-", "drag-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    /// Display で使うプレフィックス（例: "task-"）
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しませんが、
/// コンパイル時に型安全性を提供します。
///
/// # 例
/// ```ignore
/// let task_id: TaskId = Id::from(Ulid::new());
/// let user_id: UserId = Id::from(Ulid::new());
/// // task_id と user_id は異なる型なので、混同できない
/// ```
#[repr(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// ULID から Id を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

// derive だと `T: Clone` などの境界が付いてしまうため手書きする
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ulid == other.ulid
    }
}

impl<T: IdMarker> Eq for Id<T> {}

impl<T: IdMarker> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ulid.hash(state);
    }
}

impl<T: IdMarker> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IdMarker> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ulid.cmp(&other.ulid)
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// ID 文字列のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier '{input}'")]
pub struct ParseIdError {
    input: String,
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(T::prefix()).unwrap_or(s);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|_| ParseIdError {
                input: s.to_string(),
            })
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Task のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// User のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum User {}

impl IdMarker for User {
    fn prefix() -> &'static str {
        "user-"
    }
}

/// Drag gesture のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Drag {}

impl IdMarker for Drag {
    fn prefix() -> &'static str {
        "drag-"
    }
}

// ========================================
// Type Alias（使いやすさのため）
// ========================================

/// Identifier of a Task (stable for the task's lifetime, assigned by the store).
pub type TaskId = Id<Task>;

/// Identifier of a User (owner of tasks).
pub type UserId = Id<User>;

/// Token of a single drag gesture, handed out by the drag controller.
pub type DragToken = Id<Drag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let ulid1 = Ulid::new();
        let ulid2 = Ulid::new();
        let ulid3 = Ulid::new();

        let task = TaskId::from_ulid(ulid1);
        let user = UserId::from_ulid(ulid2);
        let drag = DragToken::from_ulid(ulid3);

        assert_eq!(task.as_ulid(), ulid1);
        assert_eq!(user.as_ulid(), ulid2);
        assert_eq!(drag.as_ulid(), ulid3);

        assert!(task.to_string().starts_with("task-"));
        assert!(user.to_string().starts_with("user-"));
        assert!(drag.to_string().starts_with("drag-"));

        // let _: TaskId = user; // <- does not compile
    }

    #[test]
    fn serializes_as_prefixed_string() {
        let task_id = TaskId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&task_id).unwrap();
        assert_eq!(serialized, format!("\"{task_id}\""));

        let deserialized: TaskId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(task_id, deserialized);
    }

    #[test]
    fn parses_with_or_without_prefix() {
        let ulid = Ulid::new();
        let prefixed: TaskId = format!("task-{ulid}").parse().unwrap();
        let bare: TaskId = ulid.to_string().parse().unwrap();
        assert_eq!(prefixed, bare);
    }

    #[test]
    fn rejects_garbage() {
        assert!("task-not-a-ulid".parse::<TaskId>().is_err());
        assert!("".parse::<TaskId>().is_err());
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;

        assert_eq!(size_of::<TaskId>(), size_of::<Ulid>());
        assert_eq!(size_of::<DragToken>(), 16);
    }
}
