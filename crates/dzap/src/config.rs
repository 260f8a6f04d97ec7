use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiscordConfig {
    pub token: String,
    /// 明示的な送信先。未設定なら channel_name でチャンネルを探す。
    #[serde(default)]
    pub channel_id: Option<u64>,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    /// 起動時に疎通確認メッセージを送るかどうか。
    #[serde(default)]
    pub startup_notice: bool,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: "YOUR_DISCORD_BOT_TOKEN".to_string(),
            channel_id: None,
            channel_name: default_channel_name(),
            startup_notice: false,
        }
    }
}

fn default_channel_name() -> String {
    "daily-dsa".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    /// 日付の列名。行にこの列がないときは f1 / Date / date を順に試す。
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_category_column")]
    pub category_column: String,
    #[serde(default = "default_problem_column")]
    pub problem_column: String,
    #[serde(default = "default_difficulty_column")]
    pub difficulty_column: String,
    #[serde(default = "default_description_column")]
    pub description_column: String,
    #[serde(default = "default_url_column")]
    pub url_column: String,
    #[serde(default = "default_prefix_text")]
    pub prefix_text: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            date_column: default_date_column(),
            category_column: default_category_column(),
            problem_column: default_problem_column(),
            difficulty_column: default_difficulty_column(),
            description_column: default_description_column(),
            url_column: default_url_column(),
            prefix_text: default_prefix_text(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("questions.csv")
}

fn default_date_column() -> String {
    "f1".to_string()
}

fn default_category_column() -> String {
    "f5".to_string()
}

fn default_problem_column() -> String {
    "f2".to_string()
}

fn default_difficulty_column() -> String {
    "f4".to_string()
}

fn default_description_column() -> String {
    "f3".to_string()
}

fn default_url_column() -> String {
    "f9".to_string()
}

fn default_prefix_text() -> String {
    "Ready to sharpen your problem-solving skills? Rise and grind!".to_string()
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    /// この日以降にのみ投稿する。未設定なら即時有効。
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
            start_date: None,
        }
    }
}

fn default_hour() -> u32 {
    8
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PreviewConfig {
    /// 起動時にプレビュー (今日または次回分) を送るかどうか。
    #[serde(default = "default_true")]
    pub on_start: bool,
    /// プレビューの対象日の上書き。日付パーサが受理する任意の表記。
    #[serde(default)]
    pub date: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            on_start: true,
            date: None,
        }
    }
}

fn default_true() -> bool {
    true
}

pub fn open_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
    let config: Config = toml::from_str(&content).context("Failed to parse configuration file")?;
    Ok(config)
}

pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let config = Config::default();
    let content = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
    fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
    Ok(())
}
