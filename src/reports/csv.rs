use super::Overview;
use crate::Result;
use core::fmt::Write;
use std::borrow::Cow;

/// Render the overview as long-format CSV: one `Section,Name,Value` row per
/// fact, so the output stays a flat table no matter how many members exist.
pub fn generate<W: Write>(overview: &Overview, writer: &mut W) -> Result<()> {
    writeln!(writer, "Section,Name,Value")?;

    writeln!(writer, "Summary,Members,{}", overview.member_count)?;
    writeln!(writer, "Summary,Connected,{}", overview.connected_count)?;
    match overview.fetched_at {
        Some(at) => writeln!(writer, "Summary,Fetched At,{}", escape_csv(&at.to_rfc3339()))?,
        None => writeln!(writer, "Summary,Fetched At,")?,
    }

    for (field, value) in &overview.totals {
        writeln!(writer, "Totals,{},{value}", escape_csv(&field.to_string()))?;
    }

    let field_name = overview.leaderboard_field.to_string();
    let field = escape_csv(&field_name);
    for row in &overview.leaderboard {
        writeln!(writer, "Leaderboard ({field}),{},{}", escape_csv(&row.name), row.value)?;
    }

    for day in &overview.trend {
        writeln!(writer, "Pull Request Trend,{},{}", day.date.format("%Y-%m-%d"), day.count)?;
    }

    for share in &overview.languages.shares {
        writeln!(writer, "Languages,{},{}", escape_csv(&share.name), share.count)?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivitySnapshot, Member};
    use crate::stats::ActivityField;
    use chrono::NaiveDate;

    fn overview() -> Overview {
        let members = vec![Member {
            display_name: Some("Lovelace, Ada".to_string()),
            github_connected: true,
            github_data: Some(ActivitySnapshot {
                commits: 7,
                ..ActivitySnapshot::default()
            }),
            ..Member::default()
        }];

        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        Overview::build(&members, None, ActivityField::Commits, 2, 10, today)
    }

    #[test]
    fn test_escape_csv_no_special_chars() {
        let result = escape_csv("hello world");
        assert_eq!(result, "hello world");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_csv_with_quotes() {
        let result = escape_csv("hello \"world\"");
        assert_eq!(result, "\"hello \"\"world\"\"\"");
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn test_escape_csv_with_comma() {
        let result = escape_csv("hello,world");
        assert_eq!(result, "\"hello,world\"");
        assert!(matches!(result, Cow::Owned(_)));
    }

    #[test]
    fn test_escape_csv_empty() {
        let result = escape_csv("");
        assert_eq!(result, "");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_generate_rows() {
        let mut output = String::new();
        generate(&overview(), &mut output).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Section,Name,Value");
        assert!(lines.contains(&"Summary,Members,1"));
        assert!(lines.contains(&"Summary,Fetched At,"));
        assert!(lines.contains(&"Totals,Commits,7"));
        assert!(output.contains("Leaderboard (Commits),\"Lovelace, Ada\",7"));
        // One row per trend day
        assert_eq!(lines.iter().filter(|l| l.starts_with("Pull Request Trend,")).count(), 2);
    }
}
