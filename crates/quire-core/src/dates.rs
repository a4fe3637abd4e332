//! Calendar helpers shared by the extractor and the query evaluators

use chrono::{Datelike, NaiveDate, Weekday};

/// Parse a strict `YYYY-MM-DD` string into a date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Check whether a string is a valid `YYYY-MM-DD` date
pub fn is_date_string(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Parse an ISO week id such as `2024-W05` into `(year, week)`
pub fn parse_week(s: &str) -> Option<(i32, u32)> {
    let bytes = s.as_bytes();
    if bytes.len() != 8 || bytes[4] != b'-' || bytes[5] != b'W' {
        return None;
    }
    if !bytes[..4].iter().chain(&bytes[6..]).all(u8::is_ascii_digit) {
        return None;
    }
    let year: i32 = s[..4].parse().ok()?;
    let week: u32 = s[6..].parse().ok()?;
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
    Some((year, week))
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Human-readable daily note name, e.g. `Mon, Jan 1, 2024`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Human-readable weekly note name, e.g. `Week 5, 2024`
pub fn display_week(year: i32, week: u32) -> String {
    format!("Week {}, {}", week, year)
}

/// Parse a month/day string `MM-DD`
pub fn parse_month_day(s: &str) -> Option<(u32, u32)> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'-' {
        return None;
    }
    let month: u32 = s[..2].parse().ok()?;
    let day: u32 = s[3..].parse().ok()?;
    // 2000 is a leap year, so Feb 29 is accepted
    NaiveDate::from_ymd_opt(2000, month, day)?;
    Some((month, day))
}

/// Next occurrence of `month/day` on or after `today`.
///
/// Feb 29 falls on Mar 1 in non-leap years.
pub fn next_anniversary(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(today.year(), month, day)?;
    if this_year >= today {
        Some(this_year)
    } else {
        anniversary_in(today.year() + 1, month, day)
    }
}

fn anniversary_in(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| {
        if month == 2 && day == 29 {
            NaiveDate::from_ymd_opt(year, 3, 1)
        } else {
            None
        }
    })
}
