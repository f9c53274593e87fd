//! Reconcile - column model と task store の同期
//!
//! - **engine**: optimistic move / rollback、create / edit / delete

pub mod engine;

pub use self::engine::{MoveOutcome, ReconcileEngine};
