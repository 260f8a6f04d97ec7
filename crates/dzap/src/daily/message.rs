//! 通知メッセージの整形。

use chrono::NaiveDate;

use super::fields::LogicalFields;

const HEADER: &str = "⭐ Daily DSA Problem ⭐";

/// フィールドを固定レイアウトのメッセージに整形する。
///
/// 純粋関数であり、同じ入力からは常に同じ文字列が得られる。
/// prefix と URL は空のとき行ごと省略され、空行が連続することはない。
pub fn render(fields: &LogicalFields, prefix_text: &str) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(9);

    lines.push(HEADER.to_string());
    if !prefix_text.is_empty() {
        lines.push(prefix_text.to_string());
    }
    lines.push(String::new());
    lines.push(format!("📌 Category: {}", fields.category));
    lines.push(format!("🧠 Problem: {}", fields.problem));
    lines.push(format!("⚡ Difficulty: {}", fields.difficulty));
    lines.push("📖 Problem Description:".to_string());
    lines.push(fields.description.clone());
    if !fields.url.is_empty() {
        lines.push(format!("🔗 Url: {}", fields.url));
    }

    lines.join("\n")
}

/// プレビュー用に、対象の行がいつ投稿される予定かを示すヘッダを前置する。
///
/// 行自身の日付が再パースできなかった場合は "(unknown date)" と表示する。
pub fn render_preview(
    fields: &LogicalFields,
    prefix_text: &str,
    scheduled_for: Option<NaiveDate>,
) -> String {
    let when = match scheduled_for {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "(unknown date)".to_string(),
    };

    format!(
        "👀 Preview: Daily DSA (scheduled for {} IST)\n\n{}",
        when,
        render(fields, prefix_text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> LogicalFields {
        LogicalFields {
            category: "Arrays".to_string(),
            problem: "Two Sum".to_string(),
            difficulty: "Easy".to_string(),
            description: "Find two numbers...".to_string(),
            url: "http://x".to_string(),
        }
    }

    const PREFIX: &str = "Rise and grind!";

    #[test]
    fn renders_all_lines_in_fixed_order() {
        let message = render(&fields(), PREFIX);

        assert_eq!(
            message,
            "⭐ Daily DSA Problem ⭐\n\
             Rise and grind!\n\
             \n\
             📌 Category: Arrays\n\
             🧠 Problem: Two Sum\n\
             ⚡ Difficulty: Easy\n\
             📖 Problem Description:\n\
             Find two numbers...\n\
             🔗 Url: http://x"
        );
    }

    #[test]
    fn empty_url_suppresses_url_line() {
        let mut fields = fields();
        fields.url = String::new();

        let message = render(&fields, PREFIX);
        assert!(!message.contains("🔗 Url:"));
        assert!(message.ends_with("Find two numbers..."));
    }

    #[test]
    fn empty_prefix_omits_its_line() {
        let message = render(&fields(), "");

        assert!(message.starts_with("⭐ Daily DSA Problem ⭐\n\n📌 Category:"));
        assert!(!message.contains("\n\n\n"));
    }

    #[test]
    fn no_doubled_blank_lines() {
        assert!(!render(&fields(), PREFIX).contains("\n\n\n"));
    }

    #[test]
    fn identical_inputs_render_identically() {
        assert_eq!(render(&fields(), PREFIX), render(&fields(), PREFIX));
    }

    #[test]
    fn preview_header_names_resolved_date() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let message = render_preview(&fields(), PREFIX, Some(date));

        assert!(message.starts_with("👀 Preview: Daily DSA (scheduled for 2025-12-25 IST)\n\n⭐"));
    }

    #[test]
    fn preview_header_without_reparseable_date() {
        let message = render_preview(&fields(), PREFIX, None);
        assert!(message.contains("(scheduled for (unknown date) IST)"));
    }
}
