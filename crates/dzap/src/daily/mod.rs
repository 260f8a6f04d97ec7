//! 日付つき問題データセットから「今日の 1 問」を選び、
//! 通知メッセージに整形する機能を提供する。
//!
//! 解決と整形は純粋な関数で、I/O はデータセットの読み込みだけが行う。

mod dataset;
mod dates;
mod fields;
mod message;
mod resolve;
mod schedule;

pub use dataset::{Dataset, DatasetError, Row};
pub use dates::parse_date;
pub use fields::{LogicalFields, map_fields};
pub use message::{render, render_preview};
pub use resolve::{resolve_exact, resolve_exact_or_next, row_date};
pub use schedule::{DailyTrigger, next_occurrence};

use chrono::NaiveDate;
use chrono_tz::Asia::Kolkata;

/// 現在の IST 日付を取得する。
pub fn today_ist() -> NaiveDate {
    let now = chrono::Utc::now().with_timezone(&Kolkata);
    now.date_naive()
}
