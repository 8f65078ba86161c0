//! Builds the link line that goes into the target note.

use chrono::NaiveDate;
use tracing::warn;

use crate::classify::Classification;
use crate::country::CountryTable;

/// Date stamp format: day, month, two-digit year.
pub const DATE_FORMAT: &str = "%d.%m.%y";

/// `- [[<path>|<display name>]] - DD.MM.YY`, with the country flag appended to the
/// display name unless the country is the default one.
pub fn format_link_line(
    path: &str,
    classification: &Classification,
    default_country: &str,
    table: &CountryTable,
    date: NaiveDate,
) -> String {
    let label = display_label(classification, default_country, table);
    format!("- [[{}|{}]] - {}", path, label, date.format(DATE_FORMAT))
}

fn display_label(classification: &Classification, default_country: &str, table: &CountryTable) -> String {
    let name = &classification.display_name;
    if classification.country.eq_ignore_ascii_case(default_country.trim()) {
        return name.clone();
    }
    match table.emoji(&classification.country) {
        Some(emoji) => format!("{} {}", name, emoji),
        None => {
            warn!(country = %classification.country, "classified country has no emoji; leaving label bare");
            name.clone()
        }
    }
}
