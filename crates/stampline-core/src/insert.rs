//! Splices a link line into the target note right under the anchor line.
//!
//! Newest entries go first. When the entry below the anchor is from an earlier
//! month, a blank line is left after the new entry so months stay visually grouped.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::format::DATE_FORMAT;

static DATE_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{2}").expect("date stamp pattern is valid"));

/// Insert `line` directly after the first line equal to `anchor`.
pub fn insert_under_anchor(
    text: &str,
    anchor: &str,
    line: &str,
    today: NaiveDate,
) -> Result<String, InsertError> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let anchor_idx = lines
        .iter()
        .position(|&l| l.strip_suffix('\r').unwrap_or(l) == anchor)
        .ok_or_else(|| InsertError::AnchorNotFound(anchor.to_string()))?;

    // Inserted lines follow the anchor's line ending.
    let eol = if lines[anchor_idx].ends_with('\r') { "\r" } else { "" };
    let line = format!("{}{}", line, eol);

    let starts_new_month = lines
        .get(anchor_idx + 1)
        .and_then(|next| extract_date(next))
        .map_or(false, |previous| !same_month(previous, today));

    let at = anchor_idx + 1;
    if starts_new_month {
        debug!("previous entry is from another month; separating with a blank line");
        lines.insert(at, eol);
    }
    lines.insert(at, &line);
    Ok(lines.join("\n"))
}

/// First `DD.MM.YY` stamp in `line`, if it is a real calendar date.
pub fn extract_date(line: &str) -> Option<NaiveDate> {
    let stamp = DATE_STAMP.find(line)?;
    NaiveDate::parse_from_str(stamp.as_str(), DATE_FORMAT).ok()
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    #[error("anchor line {0:?} not found")]
    AnchorNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn inserts_under_anchor_same_month() {
        let text = "# Applied\n- old entry - 01.03.24";
        let line = "- [[Germany/Note A.md|Note A]] - 15.03.24";
        let out = insert_under_anchor(text, "# Applied", line, date(2024, 3, 15)).unwrap();
        assert_eq!(
            out,
            "# Applied\n- [[Germany/Note A.md|Note A]] - 15.03.24\n- old entry - 01.03.24"
        );
    }

    #[test]
    fn new_month_leaves_blank_line() {
        let text = "# Applied\n- [[x.md|x]] - 05.03.24";
        let out = insert_under_anchor(text, "# Applied", "- new - 02.04.24", date(2024, 4, 2)).unwrap();
        assert_eq!(out, "# Applied\n- new - 02.04.24\n\n- [[x.md|x]] - 05.03.24");
    }

    #[test]
    fn same_month_adds_no_blank_line() {
        let text = "# Applied\n- [[x.md|x]] - 05.03.24";
        let out = insert_under_anchor(text, "# Applied", "- new - 20.03.24", date(2024, 3, 20)).unwrap();
        assert_eq!(out, "# Applied\n- new - 20.03.24\n- [[x.md|x]] - 05.03.24");
    }

    #[test]
    fn same_month_different_year_is_new_month() {
        let text = "# Applied\n- a - 20.03.23";
        let out = insert_under_anchor(text, "# Applied", "- b", date(2024, 3, 20)).unwrap();
        assert_eq!(out, "# Applied\n- b\n\n- a - 20.03.23");
    }

    #[test]
    fn anchor_at_end_of_text() {
        let out = insert_under_anchor("Intro\n# Applied", "# Applied", "- a", date(2024, 1, 1)).unwrap();
        assert_eq!(out, "Intro\n# Applied\n- a");
    }

    #[test]
    fn only_first_anchor_is_used() {
        let text = "# Applied\n\n# Applied\n";
        let out = insert_under_anchor(text, "# Applied", "- a", date(2024, 1, 1)).unwrap();
        assert_eq!(out, "# Applied\n- a\n\n# Applied\n");
    }

    #[test]
    fn anchor_must_match_whole_line() {
        let err = insert_under_anchor("## Applied\n# Applied today", "# Applied", "- a", date(2024, 1, 1));
        assert_eq!(err, Err(InsertError::AnchorNotFound("# Applied".to_string())));
    }

    #[test]
    fn crlf_anchor_matches() {
        let out = insert_under_anchor("# Applied\r\n- a - 01.01.24", "# Applied", "- b", date(2024, 1, 2)).unwrap();
        assert_eq!(out, "# Applied\r\n- b\r\n- a - 01.01.24");
    }

    #[test]
    fn crlf_new_month_keeps_line_endings() {
        let text = "# Applied\r\n- a - 01.02.24\r\n";
        let out = insert_under_anchor(text, "# Applied", "- b - 15.03.24", date(2024, 3, 15)).unwrap();
        assert_eq!(out, "# Applied\r\n- b - 15.03.24\r\n\r\n- a - 01.02.24\r\n");
        assert!(!out.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn undated_or_invalid_next_line_adds_no_blank() {
        for next in ["", "- no date here", "- bad - 31.02.24"] {
            let text = format!("# Applied\n{next}");
            let out = insert_under_anchor(&text, "# Applied", "- new", date(2024, 4, 2)).unwrap();
            assert_eq!(out, format!("# Applied\n- new\n{next}"));
        }
    }

    #[test]
    fn inserted_line_follows_anchor() {
        let text = "preamble\n# Applied\n- x - 01.01.24\ntrailer\n";
        let line = "- [[Canada/Trip.md|Trip 🇨🇦]] - 10.01.24";
        let out = insert_under_anchor(text, "# Applied", line, date(2024, 1, 10)).unwrap();
        let lines: Vec<&str> = out.split('\n').collect();
        let anchor = lines.iter().position(|l| *l == "# Applied").unwrap();
        assert_eq!(lines[anchor + 1], line);
        assert!(out.ends_with("trailer\n"));
    }

    #[test]
    fn extract_date_finds_stamp() {
        assert_eq!(extract_date("- [[a|b]] - 05.03.24"), Some(date(2024, 3, 5)));
        assert_eq!(extract_date("nothing"), None);
        assert_eq!(extract_date("13.13.24"), None);
    }
}
