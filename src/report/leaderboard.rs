//! BBCode leaderboard post.
//!
//! Layout per member line, space separated:
//! category code, rank movement, intensity code, rank, name, posts, delta.

use chrono::{DateTime, Utc};

use super::intensity;
use crate::store::diff::RankedEntry;

pub const HEADER_OPEN: &str = "[size=14pt][b]";
pub const HEADER_CLOSE: &str = "[/b][/size]";
pub const BODY_OPEN: &str = "[code]";
pub const BODY_CLOSE: &str = "[/code]";

pub const UP: char = '↑';
pub const DOWN: char = '↓';
pub const NO_CHANGE: &str = "  =";
pub const NEW_ENTRY: &str = "NEW";
pub const NOT_APPLICABLE: &str = "N/A";

/// Signed, three wide, with the sign swapped for an arrow.
pub fn rank_indicator(rank_delta: Option<i64>) -> String {
    match rank_delta {
        None => NEW_ENTRY.to_string(),
        Some(0) => NO_CHANGE.to_string(),
        Some(d) => {
            let arrow = if d > 0 { UP } else { DOWN };
            let field = format!("{arrow}{}", d.unsigned_abs());
            format!("{field:>3}")
        }
    }
}

fn count_delta(delta: Option<i64>) -> String {
    match delta {
        Some(d) => format!("({d})"),
        None => format!("({NOT_APPLICABLE})"),
    }
}

pub fn header(now: DateTime<Utc>) -> String {
    format!(
        "{HEADER_OPEN}Top posters as of {}{HEADER_CLOSE}",
        now.format("%d %B %Y, %H:%M %Z")
    )
}

pub fn line(entry: &RankedEntry, name_width: usize) -> String {
    format!(
        "{} {} {} {:03} {:<width$} {} {}",
        entry.record.category().code(),
        rank_indicator(entry.diff.rank_delta),
        intensity::encode(entry.diff.count_delta),
        entry.rank,
        entry.record.display_name,
        entry.record.count,
        count_delta(entry.diff.count_delta),
        width = name_width,
    )
}

/// Renders the whole post. `footer` is appended verbatim after a blank
/// line unless it is empty.
pub fn render(entries: &[RankedEntry], now: DateTime<Utc>, footer: Option<&str>) -> String {
    let name_width = entries
        .iter()
        .map(|e| e.record.display_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = header(now);
    output.push('\n');
    output.push_str(BODY_OPEN);
    output.push('\n');

    for entry in entries {
        output.push_str(&line(entry, name_width));
        output.push('\n');
    }

    output.push_str(BODY_CLOSE);
    output.push('\n');

    if let Some(text) = footer.filter(|t| !t.is_empty()) {
        output.push('\n');
        output.push_str(text);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EntityRecord;
    use crate::store::diff::DiffResult;
    use chrono::TimeZone;

    fn entry(rank: usize, name: &str, category: &str, count: u64, diff: DiffResult) -> RankedEntry {
        RankedEntry {
            rank,
            record: EntityRecord {
                identity: rank as u64,
                display_name: name.to_string(),
                category: category.to_string(),
                count,
            },
            diff,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 18, 5, 0).unwrap()
    }

    #[test]
    fn indicator_formats() {
        assert_eq!(rank_indicator(Some(0)), NO_CHANGE);
        assert_eq!(rank_indicator(Some(3)), " ↑3");
        assert_eq!(rank_indicator(Some(-12)), "↓12");
        assert_eq!(rank_indicator(Some(150)), "↑150");
        assert_eq!(rank_indicator(None), NEW_ENTRY);
        assert_eq!(rank_indicator(Some(5)).chars().count(), 3);
    }

    #[test]
    fn header_has_date_time_and_zone() {
        assert_eq!(
            header(now()),
            "[size=14pt][b]Top posters as of 01 March 2024, 18:05 UTC[/b][/size]"
        );
    }

    #[test]
    fn line_layout() {
        let e = entry(
            7,
            "Bob",
            "Global Moderator",
            170,
            DiffResult {
                count_delta: Some(20),
                rank_delta: Some(0),
            },
        );
        assert_eq!(line(&e, 6), "MOD   = ⠃⠀⠀⠀ 007 Bob    170 (20)");
    }

    #[test]
    fn unknown_delta_line() {
        let e = entry(1, "Alice", "Jr. Member", 5, DiffResult::default());
        assert_eq!(line(&e, 5), format!("MEM NEW {} 001 Alice 5 (N/A)", intensity::NO_DATA));
    }

    #[test]
    fn names_pad_to_widest() {
        let entries = vec![
            entry(1, "Zoë", "Member", 10, DiffResult::default()),
            entry(2, "Longername", "Member", 9, DiffResult::default()),
        ];
        let report = render(&entries, now(), None);
        assert!(report.contains(" 001 Zoë        10 "));
        assert!(report.contains(" 002 Longername 9 "));
    }

    #[test]
    fn wrapped_in_markup() {
        let report = render(&[], now(), None);
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with(HEADER_OPEN));
        assert!(lines[0].ends_with(HEADER_CLOSE));
        assert_eq!(lines[1], BODY_OPEN);
        assert_eq!(lines[2], BODY_CLOSE);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn footer_after_blank_line() {
        let report = render(&[], now(), Some("See you next month!"));
        assert!(report.ends_with("[/code]\n\nSee you next month!"));
    }

    #[test]
    fn footer_is_verbatim() {
        let report = render(&[], now(), Some("  [i]bye[/i]\n\n"));
        assert!(report.ends_with("[/code]\n\n  [i]bye[/i]\n\n"));

        let report = render(&[], now(), Some("   "));
        assert!(report.ends_with("[/code]\n\n   "));
    }

    #[test]
    fn empty_footer_is_skipped() {
        assert_eq!(render(&[], now(), Some("")), render(&[], now(), None));
    }
}
