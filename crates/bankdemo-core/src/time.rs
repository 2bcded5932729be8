//! Timestamp resolution for the raw temporal forms
//!
//! Raw records describe their instant in one of three ways: an absolute
//! epoch timestamp in milliseconds, a days-ago offset with a time of day,
//! or a full calendar tuple with a zone abbreviation. Everything downstream
//! works on resolved epoch milliseconds; a record whose form cannot be
//! resolved carries the `-1` sentinel and is compared like any other value.

use bankdemo_data::RecordDate;
use bankdemo_utils::calendar;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for a date that could not be resolved.
pub const UNRESOLVED: i64 = -1;

/// Milliseconds in one day.
pub const DAY_MILLIS: i64 = 86_400_000;

/// UTC offsets in hours for the zone abbreviations the mock data uses.
const ZONES: [(&str, i64); 10] = [
    ("UTC", 0),
    ("GMT", 0),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

/// UTC offset in milliseconds for a zone abbreviation, `None` if unknown.
pub fn zone_offset_millis(zone: &str) -> Option<i64> {
    let upper = zone.trim().to_uppercase();
    ZONES
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, hours)| hours * 3_600_000)
}

/// Parse a clock time of the form "HH:MM" or "HH:MM:SS".
fn parse_clock(time: &str) -> Option<(u32, u32, u32)> {
    let mut parts = time.trim().split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some((hour, minute, second))
}

fn calendar_millis(
    month: &str,
    day: &str,
    year: &str,
    time: &str,
    zone: &str,
) -> Option<i64> {
    let month = calendar::month_number(month)?;
    let day: u32 = day.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    let (hour, minute, second) = parse_clock(time)?;
    let offset = zone_offset_millis(zone)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)?;
    Some(naive.and_utc().timestamp_millis() - offset)
}

fn daysago_millis(daysago: i64, time: &str, zone: &str, now_millis: i64) -> Option<i64> {
    // A missing zone on the days-ago form means the demo's reference clock.
    let offset = if zone.trim().is_empty() {
        0
    } else {
        zone_offset_millis(zone)?
    };
    let (hour, minute, second) = parse_clock(time)?;

    let local_now = DateTime::from_timestamp_millis(now_millis + offset)?;
    let date = local_now.date_naive() - Duration::days(daysago);
    let naive = date.and_hms_opt(hour, minute, second)?;
    Some(naive.and_utc().timestamp_millis() - offset)
}

/// Resolve a raw temporal descriptor to epoch milliseconds.
///
/// `now_millis` anchors the days-ago form. Anything unresolvable, including
/// an absent descriptor or an unknown zone abbreviation, yields
/// [`UNRESOLVED`].
pub fn resolve_record_date(date: Option<&RecordDate>, now_millis: i64) -> i64 {
    let resolved = match date {
        Some(RecordDate::Timestamp { timestamp }) => Some(*timestamp),
        Some(RecordDate::Calendar {
            month,
            day,
            year,
            time,
            zone,
            ..
        }) => calendar_millis(month, day, year, time, zone),
        Some(RecordDate::DaysAgo {
            daysago,
            time,
            zone,
        }) => daysago_millis(*daysago, time, zone, now_millis),
        None => None,
    };
    resolved.unwrap_or(UNRESOLVED)
}

/// Calendar display strings derived from a resolved timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParts {
    pub dow: String,
    pub month: String,
    pub day: String,
    pub year: String,
    pub time: String,
}

/// Break a resolved timestamp into UTC display parts.
pub fn timestamp_to_parts(ts_millis: i64) -> Option<DateParts> {
    if ts_millis < 0 {
        return None;
    }
    let dt = DateTime::<Utc>::from_timestamp_millis(ts_millis)?;
    let date = dt.date_naive();
    Some(DateParts {
        dow: calendar::dow_short(date).to_string(),
        month: calendar::month_short(date).to_string(),
        day: date.day().to_string(),
        year: date.year().to_string(),
        time: format!(
            "{}:{}:{}",
            calendar::two_digit(dt.hour()),
            calendar::two_digit(dt.minute()),
            calendar::two_digit(dt.second())
        ),
    })
}

static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:,?\s+(\d{4}))?",
    )
    .unwrap()
});

/// Interpret a spoken or typed date filter value as epoch milliseconds.
///
/// A digit string is taken as milliseconds directly. Text of the form
/// "[Dow ]Mon D[ YYYY]" resolves to midnight UTC of that calendar date,
/// with the year defaulting to the year of `now_millis`. Anything else is
/// [`UNRESOLVED`].
pub fn date_value_to_timestamp(value: &str, now_millis: i64) -> i64 {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().unwrap_or(UNRESOLVED);
    }

    let Some(caps) = MONTH_DAY_RE.captures(trimmed) else {
        return UNRESOLVED;
    };
    let parsed = (|| {
        let month = calendar::month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = match caps.get(3) {
            Some(y) => y.as_str().parse().ok()?,
            None => DateTime::from_timestamp_millis(now_millis)?.year(),
        };
        let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        Some(naive.and_utc().timestamp_millis())
    })();
    parsed.unwrap_or(UNRESOLVED)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2010-04-18T00:00:00Z
    const APRIL_18_2010: i64 = 1_271_548_800_000;

    fn calendar_record() -> RecordDate {
        RecordDate::Calendar {
            dow: "Sun".to_string(),
            month: "Apr".to_string(),
            day: "18".to_string(),
            year: "2010".to_string(),
            time: "17:35".to_string(),
            zone: "CST".to_string(),
        }
    }

    #[test]
    fn test_zone_offsets() {
        assert_eq!(zone_offset_millis("CST"), Some(-6 * 3_600_000));
        assert_eq!(zone_offset_millis("utc"), Some(0));
        assert_eq!(zone_offset_millis("XYZ"), None);
        assert_eq!(zone_offset_millis(""), None);
    }

    #[test]
    fn test_resolve_calendar_tuple() {
        // 17:35 CST is 23:35 UTC
        let expected = APRIL_18_2010 + (23 * 3600 + 35 * 60) * 1000;
        assert_eq!(resolve_record_date(Some(&calendar_record()), 0), expected);
    }

    #[test]
    fn test_resolve_calendar_unknown_zone() {
        let date = RecordDate::Calendar {
            dow: "Sun".to_string(),
            month: "Apr".to_string(),
            day: "18".to_string(),
            year: "2010".to_string(),
            time: "17:35".to_string(),
            zone: "Mars".to_string(),
        };
        assert_eq!(resolve_record_date(Some(&date), 0), UNRESOLVED);
    }

    #[test]
    fn test_resolve_timestamp_passthrough() {
        let date = RecordDate::Timestamp {
            timestamp: 1_271_626_500_000,
        };
        assert_eq!(resolve_record_date(Some(&date), 0), 1_271_626_500_000);
    }

    #[test]
    fn test_resolve_daysago() {
        // Three days before April 18 at 09:00 UTC
        let now = APRIL_18_2010 + 12 * 3_600_000;
        let date = RecordDate::DaysAgo {
            daysago: 3,
            time: "09:00".to_string(),
            zone: String::new(),
        };
        let expected = APRIL_18_2010 - 3 * DAY_MILLIS + 9 * 3_600_000;
        assert_eq!(resolve_record_date(Some(&date), now), expected);
    }

    #[test]
    fn test_resolve_missing_date() {
        assert_eq!(resolve_record_date(None, 0), UNRESOLVED);
    }

    #[test]
    fn test_timestamp_to_parts() {
        let ts = APRIL_18_2010 + (17 * 3600 + 35 * 60) * 1000;
        let parts = timestamp_to_parts(ts).unwrap();
        assert_eq!(parts.dow, "Sun");
        assert_eq!(parts.month, "Apr");
        assert_eq!(parts.day, "18");
        assert_eq!(parts.year, "2010");
        assert_eq!(parts.time, "17:35:00");
    }

    #[test]
    fn test_timestamp_to_parts_sentinel() {
        assert_eq!(timestamp_to_parts(UNRESOLVED), None);
    }

    #[test]
    fn test_date_value_digit_string() {
        assert_eq!(
            date_value_to_timestamp("1271626500000", 0),
            1_271_626_500_000
        );
    }

    #[test]
    fn test_date_value_month_day() {
        assert_eq!(
            date_value_to_timestamp("Apr 18 2010", 0),
            APRIL_18_2010
        );
        // Year defaults to the year of the reference clock
        assert_eq!(
            date_value_to_timestamp("April 18", APRIL_18_2010),
            APRIL_18_2010
        );
        assert_eq!(
            date_value_to_timestamp("Sun Apr 18 2010", 0),
            APRIL_18_2010
        );
    }

    #[test]
    fn test_date_value_unparseable() {
        assert_eq!(date_value_to_timestamp("whenever", 0), UNRESOLVED);
        assert_eq!(date_value_to_timestamp("", 0), UNRESOLVED);
    }
}
