//! IdentityProvider port - 現在のユーザー
//!
//! session の発行そのものは外部（auth provider）の責務です。
//! ここでは「今誰としてログインしているか」だけを問い合わせます。

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// 認証済みユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Identity {
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// IdentityProvider は現在の identity を返す（未ログインなら None）
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}
