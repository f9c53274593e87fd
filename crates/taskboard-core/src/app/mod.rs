//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて board を組み立てます。
//!
//! # 主要コンポーネント
//! - **BoardBuilder**: board の構築とワイヤリング（未ログインなら fail-fast）
//! - **Board**: engine と drag controller の配線
//! - **guard**: 画面遷移の認証チェック

pub mod builder;
pub mod guard;

// 主要な型を再エクスポート
pub use self::builder::{Board, BoardBuilder, BuildError};
pub use self::guard::{RouteDecision, login_redirect, route};
