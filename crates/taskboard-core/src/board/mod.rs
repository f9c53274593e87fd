//! Board - column model（status ごとの 3 バケット）
//!
//! 独立したストレージは持たず、task collection からの純粋な射影です。

pub mod columns;

pub use self::columns::{Columns, Partition};
