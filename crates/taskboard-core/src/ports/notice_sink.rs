//! NoticeSink port - ユーザーに見せる一時通知（toast）の出力先
//!
//! # 実装
//! - TracingNoticeSink: tracing に流すだけ（CLI 用）
//! - CollectingNoticeSink: 受け取った通知を溜める（テスト用）

use crate::domain::Notice;

/// NoticeSink は engine が出す通知を受け取る
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<N: NoticeSink + ?Sized> NoticeSink for std::sync::Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
