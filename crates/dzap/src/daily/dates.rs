//! 表記ゆれのある日付文字列を `NaiveDate` に正規化する。

use chrono::{NaiveDate, NaiveDateTime};

/// 受理する日付のみのフォーマット。先頭から順に試し、最初に完全一致したものが勝つ。
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d/%m/%Y"];

/// 時刻つきのフォーマット。日付部分だけを取り出す。
const DATETIME_FORMATS: &[&str] = &["%m/%d/%y %I:%M %p", "%m/%d/%Y %I:%M %p"];

/// 日付文字列をパースする。どのフォーマットにも一致しなければ `None`。
///
/// 存在しない日付 (`31-02-2025` など) は chrono が拒否するため `None` になる。
/// パース失敗は正常系であり、エラーとしては扱わない。
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parse_iso() {
        assert_eq!(parse_date("2025-12-25"), Some(date(2025, 12, 25)));
    }

    #[test]
    fn parse_day_first_dashes() {
        assert_eq!(parse_date("25-12-2025"), Some(date(2025, 12, 25)));
    }

    #[test]
    fn parse_month_first_slashes() {
        assert_eq!(parse_date("12/25/2025"), Some(date(2025, 12, 25)));
    }

    #[test]
    fn parse_day_first_slashes() {
        // 月優先のフォーマットが先に試されるため、13 日以降でのみ到達する
        assert_eq!(parse_date("25/12/2025"), Some(date(2025, 12, 25)));
    }

    #[test]
    fn parse_timestamp_keeps_date_only() {
        assert_eq!(parse_date("12/25/2025 08:00 AM"), Some(date(2025, 12, 25)));
        assert_eq!(parse_date("1/5/2026 11:30 PM"), Some(date(2026, 1, 5)));
    }

    #[test]
    fn parse_two_digit_year_maps_to_2000s() {
        assert_eq!(parse_date("12/25/25 08:00 AM"), Some(date(2025, 12, 25)));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_date("  2025-12-25  "), Some(date(2025, 12, 25)));
    }

    #[test]
    fn parse_rejects_invalid_calendar_date() {
        assert_eq!(parse_date("31-02-2025"), None);
        assert_eq!(parse_date("2025-02-31"), None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("2025-12-25 extra"), None);
    }

    #[test]
    fn ambiguous_slashes_prefer_month_first() {
        // 02/03 は両方のフォーマットに一致しうるが、順序により米国式が勝つ
        assert_eq!(parse_date("02/03/2025"), Some(date(2025, 2, 3)));
    }
}
