//! 行から表示用の論理フィールドへのマッピング。

use crate::config::DatasetConfig;

use super::dataset::Row;

/// メッセージ整形に使う論理フィールド。欠損は既定値に落ちるため常に埋まっている。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalFields {
    pub category: String,
    pub problem: String,
    pub difficulty: String,
    pub description: String,
    /// 空文字列のときは URL 行ごと省略される。
    pub url: String,
}

/// 候補の列名を順に引き、どれも埋まっていなければ既定値を返す。
fn lookup(row: &Row, candidates: &[&str], default: &str) -> String {
    row.first_of(candidates).unwrap_or(default).to_string()
}

/// 行から論理フィールドを取り出す。
///
/// 各フィールドの解決順は、設定された列名 → 慣用的なヘッダ名 → 既定値。
pub fn map_fields(row: &Row, config: &DatasetConfig) -> LogicalFields {
    LogicalFields {
        category: lookup(row, &[&config.category_column, "Topic/Category"], "Unknown"),
        problem: lookup(row, &[&config.problem_column, "Question Title"], "Unnamed Problem"),
        difficulty: lookup(row, &[&config.difficulty_column, "Difficulty"], "Unknown"),
        description: lookup(
            row,
            &[&config.description_column, "Question Description"],
            "No description.",
        ),
        url: lookup(row, &[&config.url_column, "url"], ""),
    }
}
