//! Small port implementations: a fixed identity provider and notice sinks.

use std::sync::Mutex;

use tracing::{error, info};

use crate::domain::Notice;
use crate::ports::{Identity, IdentityProvider, NoticeSink};

/// Returns the same identity (or none) every time.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

/// Logs notices through `tracing` instead of showing a toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            error!(notice = %notice.message);
        } else {
            info!(notice = %notice.message);
        }
    }
}

/// Keeps every notice it receives, in order.
#[derive(Debug, Default)]
pub struct CollectingNoticeSink {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl NoticeSink for CollectingNoticeSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}
