//! Route guard - 未ログインの画面遷移を login へ振り向ける
//!
//! # ルール
//! - `/_next`・`/api` 配下と、`.` を含む path（静的ファイル）はそのまま通す
//! - 未ログインで `/login` 以外 → `/login?from=<path>`
//! - ログイン済みで `/login` → `/`

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

pub fn route(path: &str, authenticated: bool) -> RouteDecision {
    if path.starts_with("/_next") || path.starts_with("/api") || path.contains('.') {
        return RouteDecision::Allow;
    }
    match (authenticated, path == LOGIN_PATH) {
        (false, false) => RouteDecision::Redirect(login_redirect(path)),
        (true, true) => RouteDecision::Redirect(HOME_PATH.to_string()),
        _ => RouteDecision::Allow,
    }
}

/// `/login?from=<path>` with the path form-encoded.
pub fn login_redirect(from: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("from", from)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}
