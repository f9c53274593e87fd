//! Views - column model からの読み取り専用の射影
//!
//! - **search**: 検索クエリによる絞り込み
//! - **dashboard**: 件数と upcoming
//! - **calendar**: 月表示のグリッドと期日ごとの task

pub mod calendar;
pub mod dashboard;
pub mod search;

pub use self::calendar::{InvalidMonth, MonthGrid};
pub use self::dashboard::{DEFAULT_UPCOMING_LIMIT, Summary};
pub use self::search::{filter, filter_columns};
