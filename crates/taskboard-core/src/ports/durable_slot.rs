//! DurableSlot port - 名前付きの永続スロット
//!
//! column model を JSON 文字列として 1 キーに保存します。
//! 後からマウントされた surface が、broadcaster 不在でも最新状態を読めるようにするためのものです。
//!
//! # 実装
//! - **InMemoryDurableSlot**: 同一プロセス内のテスト用
//! - **FileDurableSlot**: ディレクトリ配下にキーごとのファイル

/// SlotError は DurableSlot の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("slot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid slot key '{0}'")]
    InvalidKey(String),
}

/// DurableSlot は key → 文字列 の単純な永続領域
///
/// # 設計原則
/// - 書き込みは全体置き換え（merge しない）
/// - 読み込みで値がなければ `Ok(None)`
pub trait DurableSlot: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError>;
}

impl<S: DurableSlot + ?Sized> DurableSlot for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        (**self).write(key, value)
    }
}
