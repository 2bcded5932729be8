//! Calendar name tables and relative date parsing
//!
//! US-English month and weekday names, the short date form used across the
//! demo ("Apr 18, 2010"), and the spoken relative-date vocabulary
//! ("today", "tomorrow", "the day after", weekday names).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Full month names, January first.
pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August",
    "September", "October", "November", "December",
];

/// Abbreviated month names, January first.
pub const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
    "Nov", "Dec",
];

/// Full weekday names in lowercase, Sunday first.
pub const DAYS_OF_WEEK: [&str; 7] = [
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday",
];

/// Abbreviated weekday names, Sunday first.
pub const DOWS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Zero-pad a number to two digits.
pub fn two_digit(n: u32) -> String {
    format!("{:02}", n)
}

/// Abbreviated month name for a date.
pub fn month_short(date: NaiveDate) -> &'static str {
    MONTHS_SHORT[date.month0() as usize]
}

/// Abbreviated weekday name for a date.
pub fn dow_short(date: NaiveDate) -> &'static str {
    DOWS[date.weekday().num_days_from_sunday() as usize]
}

/// Format a date in the short form used by list headers: "Apr 18, 2010".
pub fn short_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_short(date), date.day(), date.year())
}

/// Look up a month number (1-12) from an abbreviated or full name.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS_SHORT
        .iter()
        .position(|m| m.to_lowercase() == lower)
        .or_else(|| MONTHS.iter().position(|m| m.to_lowercase() == lower))
        .map(|i| i as u32 + 1)
}

/// Resolve a spoken relative date against a reference date.
///
/// Accepts "today", "tomorrow", "the day after", and weekday names in
/// either full or abbreviated form. Weekday references resolve to the next
/// future occurrence (a reference to the current weekday means next week).
/// Returns `None` for anything else.
pub fn parse_relative(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let spoken = text.trim().to_lowercase();

    match spoken.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "the day after" => return Some(today + Duration::days(2)),
        _ => {}
    }

    let target = DAYS_OF_WEEK
        .iter()
        .position(|d| *d == spoken)
        .or_else(|| DOWS.iter().position(|d| d.to_lowercase() == spoken))?;

    let current = weekday_index(today.weekday());
    let days_off = match target.cmp(&current) {
        std::cmp::Ordering::Less => target + 7 - current,
        std::cmp::Ordering::Greater => target - current,
        std::cmp::Ordering::Equal => 7,
    };
    Some(today + Duration::days(days_off as i64))
}

fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}
