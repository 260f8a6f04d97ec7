//! 問題データセット (CSV) の読み込みと行の表現。

use std::{collections::HashMap, fs, path::Path};

use csv::ReaderBuilder;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV record: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// データセットの 1 行。列名から値へのマッピング。
///
/// 読み込み後は不変。列が欠けている行も有効で、値の解決は利用側で行う。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// 候補の列名を順に引き、最初に見つかった空でない値を返す。
    pub fn first_of(&self, candidates: &[&str]) -> Option<&str> {
        candidates
            .iter()
            .find_map(|column| self.get(column).filter(|value| !value.is_empty()))
    }
}

/// ファイル順を保持した行の列。日付の重複は許容する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// CSV ファイルを読み込む。ヘッダ行を列名として使う。
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_csv(&content)
    }

    /// CSV 文字列からデータセットを構築する。
    ///
    /// 行ごとの列数の不一致 (flexible) を許容し、短い行は単に列が欠ける。
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let values = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();
            rows.push(Row { values });
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}
