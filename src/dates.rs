use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// The date picker and the read API speak ISO `YYYY-MM-DD`; the write API
/// and configuration records speak `DD.MM.YYYY`. Both directions of that
/// conversion live here and nowhere else.
const PICKER_FORMAT: &str = "%Y-%m-%d";
const API_FORMAT: &str = "%d.%m.%Y";

pub fn parse_picker_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), PICKER_FORMAT).ok()
}

pub fn to_picker_date(date: NaiveDate) -> String {
    date.format(PICKER_FORMAT).to_string()
}

pub fn to_api_date(date: NaiveDate) -> String {
    date.format(API_FORMAT).to_string()
}

pub fn from_api_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), API_FORMAT).ok()
}

/// Whether a configuration record's `date` string names the selected day.
/// Parsed comparison first, so `1.5.2024` and `01.05.2024` both match; a
/// string chrono cannot read still matches by exact equality with the
/// canonical zero-padded form.
pub fn config_date_matches(record_date: &str, selected: NaiveDate) -> bool {
    match from_api_date(record_date) {
        Some(parsed) => parsed == selected,
        None => record_date.trim() == to_api_date(selected),
    }
}

/// Local calendar day a pickup timestamp falls on, or None when the value
/// cannot be read. A record with an unreadable timestamp is dropped from the
/// day's pickup set, never an error.
pub fn pickup_local_day(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    // Zoneless timestamps are taken as local wall-clock time.
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%d.%m.%Y %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.date());
        }
    }
    None
}
