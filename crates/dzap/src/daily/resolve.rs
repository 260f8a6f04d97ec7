//! 対象日に対応する行の解決。

use chrono::NaiveDate;

use super::dataset::{Dataset, Row};
use super::dates::parse_date;

/// 設定された日付列が行に存在しないときに順に試す列名。
///
/// 取り込み元によって行の形が揃っていないデータセットがあるため、
/// 全モードで同じ順序を適用する。
const DATE_COLUMN_FALLBACKS: &[&str] = &["f1", "Date", "date"];

/// 行の日付を読む。日付列 → フォールバック列の順で最初の空でない値をパースする。
pub fn row_date(row: &Row, date_column: &str) -> Option<NaiveDate> {
    let raw = row
        .first_of(&[date_column])
        .or_else(|| row.first_of(DATE_COLUMN_FALLBACKS))?;
    parse_date(raw)
}

/// 対象日と日付が一致する最初の行を返す。
///
/// 同じ日付の行が複数あっても、ファイル順で最初の行を決定的に返す。
pub fn resolve_exact<'a>(
    dataset: &'a Dataset,
    date_column: &str,
    target: NaiveDate,
) -> Option<&'a Row> {
    dataset
        .rows()
        .iter()
        .find(|row| row_date(row, date_column) == Some(target))
}

/// 対象日の行、なければ日付が最も近い未来の行を返す。
///
/// 過去の行は完全一致の場合を除き返さない。未来の行同士の同日はファイル順で
/// 最初のものが勝つ。日付をパースできない行は読み飛ばす。
pub fn resolve_exact_or_next<'a>(
    dataset: &'a Dataset,
    date_column: &str,
    target: NaiveDate,
) -> Option<&'a Row> {
    let mut next: Option<(NaiveDate, &Row)> = None;

    for row in dataset.rows() {
        let Some(date) = row_date(row, date_column) else {
            continue;
        };

        if date == target {
            return Some(row);
        }

        if date > target && next.is_none_or(|(nearest, _)| date < nearest) {
            next = Some((date, row));
        }
    }

    next.map(|(_, row)| row)
}
