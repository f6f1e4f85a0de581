//! Mapping of free-form spreadsheet text onto the board's filter codes.

use jobcore::Section;
use time::macros::format_description;
use time::Date;

pub const NORTHEAST_STATES: &[&str] = &[
    "nagaland", "assam", "manipur", "meghalaya", "mizoram", "tripura", "arunachal", "sikkim",
];

const STATE_TABLE: &[(&str, &str)] = &[
    ("nagaland", "nagaland"),
    ("assam", "assam"),
    ("manipur", "manipur"),
    ("meghalaya", "meghalaya"),
    ("mizoram", "mizoram"),
    ("tripura", "tripura"),
    ("arunachal pradesh", "arunachal"),
    ("sikkim", "sikkim"),
    ("all india", "all-india"),
    ("india", "all-india"),
    ("pan india", "all-india"),
];

// Order matters: the first key contained in the text wins, so longer keys
// that embed shorter ones come first.
const QUALIFICATION_TABLE: &[(&str, &str)] = &[
    ("10th", "10th"),
    ("matriculation", "10th"),
    ("12th", "12th"),
    ("intermediate", "12th"),
    ("post graduate", "postgraduate"),
    ("postgraduate", "postgraduate"),
    ("master", "postgraduate"),
    ("graduate", "graduate"),
    ("graduation", "graduate"),
    ("bachelor", "graduate"),
    ("diploma", "diploma"),
    ("iti", "diploma"),
];

const CATEGORY_TABLE: &[(&str, &str)] = &[
    ("bank", "banking"),
    ("banking", "banking"),
    ("railway", "railway"),
    ("rrb", "railway"),
    ("defense", "defense"),
    ("defence", "defense"),
    ("army", "defense"),
    ("navy", "defense"),
    ("air force", "defense"),
    ("teaching", "teaching"),
    ("teacher", "teaching"),
    ("tet", "teaching"),
    ("police", "police"),
    ("constable", "police"),
    ("upsc", "upsc"),
    ("civil service", "upsc"),
    ("psc", "psc"),
    ("public service", "psc"),
    ("ssc", "ssc"),
];

/// Exact lookup; anything unrecognised is treated as nationwide.
pub fn normalize_state(raw: &str) -> &'static str {
    let key = raw.trim().to_lowercase();
    STATE_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("all-india")
}

pub fn normalize_qualification(raw: &str) -> &'static str {
    first_contained(QUALIFICATION_TABLE, raw).unwrap_or("graduate")
}

pub fn normalize_category(raw: &str) -> &'static str {
    first_contained(CATEGORY_TABLE, raw).unwrap_or("psc")
}

fn first_contained(table: &[(&str, &'static str)], raw: &str) -> Option<&'static str> {
    let text = raw.trim().to_lowercase();
    table.iter().find(|(k, _)| text.contains(k)).map(|(_, v)| *v)
}

pub fn is_northeast(state: &str) -> bool {
    NORTHEAST_STATES.contains(&state)
}

pub fn determine_section(state: &str, category: &str, urgent: bool) -> Section {
    if urgent {
        Section::Closing
    } else if is_northeast(state) {
        Section::Northeast
    } else if matches!(category, "banking" | "upsc" | "defense") {
        Section::Featured
    } else {
        Section::AllIndia
    }
}

pub fn determine_tag(state: &str, category: &str, urgent: bool) -> &'static str {
    if urgent {
        "Urgent"
    } else if is_northeast(state) {
        "Northeast"
    } else if matches!(category, "banking" | "defense" | "railway") {
        "Hot"
    } else {
        "New"
    }
}

/// Accepts `YYYY-MM-DD`, `DD-MM-YYYY`, `DD/MM/YYYY` and `MM/DD/YYYY`, tried in
/// that order.
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let formats = [
        format_description!("[year]-[month padding:none]-[day padding:none]"),
        format_description!("[day padding:none]-[month padding:none]-[year]"),
        format_description!("[day padding:none]/[month padding:none]/[year]"),
        format_description!("[month padding:none]/[day padding:none]/[year]"),
    ];
    formats.iter().find_map(|f| Date::parse(raw, *f).ok())
}

pub fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// True when the last date falls within `window_days` of `today`, including
/// dates that have already passed.
pub fn is_closing_soon(last_date: Option<Date>, today: Date, window_days: i64) -> bool {
    match last_date {
        Some(d) => (d - today).whole_days() <= window_days,
        None => false,
    }
}
