//! The resolved transaction presented to the rest of the app
//!
//! A [`Transaction`] is built once from a raw record: the timestamp is
//! resolved up front and the calendar display strings are fixed at
//! construction, so the list engine can sort and filter without touching
//! the raw temporal forms again.

use crate::time::{self, DateParts};
use bankdemo_data::{RecordDate, TransactionRecord};
use bankdemo_utils::currency;
use serde::Serialize;

/// Default separator for [`Transaction::html_address`].
pub const ADDRESS_DELIMITER: &str = "<br />";

/// One transaction with its instant resolved and display parts derived.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,
    /// Merchant / display name (may contain HTML entities)
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// Signed monetary string as it appears in the raw data
    pub amount: String,
    /// Resolved epoch milliseconds, `-1` when unresolvable
    timestamp: i64,
    dow: String,
    month: String,
    day: String,
    year: String,
    time: String,
    zone: String,
}

impl Transaction {
    /// Build a transaction from a raw record, anchoring the days-ago form
    /// at `now_millis`.
    ///
    /// The calendar-tuple form keeps its raw display strings; the other
    /// forms derive theirs from the resolved timestamp in UTC.
    pub fn from_record_at(record: TransactionRecord, now_millis: i64) -> Self {
        let timestamp = time::resolve_record_date(record.date.as_ref(), now_millis);

        let (dow, month, day, year, time, zone) = match record.date {
            Some(RecordDate::Calendar {
                dow,
                month,
                day,
                year,
                time,
                zone,
            }) => (dow, month, day, year, time, zone),
            Some(RecordDate::DaysAgo { time, zone, .. }) => {
                // Derive the calendar parts in the record's own zone so
                // they agree with the raw time string kept alongside.
                let offset = time::zone_offset_millis(&zone).unwrap_or(0);
                let parts = time::timestamp_to_parts(timestamp + offset)
                    .unwrap_or_default();
                (parts.dow, parts.month, parts.day, parts.year, time, zone)
            }
            Some(RecordDate::Timestamp { .. }) | None => {
                let DateParts {
                    dow,
                    month,
                    day,
                    year,
                    time,
                } = time::timestamp_to_parts(timestamp).unwrap_or_default();
                (dow, month, day, year, time, String::new())
            }
        };

        Transaction {
            id: record.id,
            name: record.name,
            address: record.address,
            city: record.city,
            state: record.state,
            zipcode: record.zipcode,
            amount: record.amount,
            timestamp,
            dow,
            month,
            day,
            year,
            time,
            zone,
        }
    }

    /// Resolved epoch milliseconds, `-1` when the record's date could not
    /// be resolved.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Numeric amount; an unparseable amount string counts as zero.
    pub fn amount_value(&self) -> f64 {
        currency::parse_amount(&self.amount).unwrap_or(0.0)
    }

    pub fn dow(&self) -> &str {
        &self.dow
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// "City, State". Empty fields are skipped rather than leaving
    /// stray separators; a payment record with no address renders "".
    pub fn location_short(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.city.is_empty() {
            parts.push(&self.city);
        }
        if !self.state.is_empty() {
            parts.push(&self.state);
        }
        parts.join(", ")
    }

    /// "City, State Zip"
    pub fn location(&self) -> String {
        let mut out = self.location_short();
        if !self.zipcode.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&self.zipcode);
        }
        out
    }

    /// "Address, City, State Zip"
    pub fn full_address(&self) -> String {
        let location = self.location();
        if self.address.is_empty() {
            return location;
        }
        if location.is_empty() {
            return self.address.clone();
        }
        format!("{}, {}", self.address, location)
    }

    /// Address and location joined by a markup delimiter
    /// ([`ADDRESS_DELIMITER`] by default). A transaction without a street
    /// address renders just the location, and vice versa.
    pub fn html_address(&self, delimiter: Option<&str>) -> String {
        let location = self.location();
        if self.address.is_empty() {
            return location;
        }
        if location.is_empty() {
            return self.address.clone();
        }
        let delimiter = delimiter.unwrap_or(ADDRESS_DELIMITER);
        format!("{}{}{}", self.address, delimiter, location)
    }

    /// "Sun, Apr"
    pub fn dow_month(&self) -> String {
        format!("{}, {}", self.dow, self.month)
    }

    /// "Sun, Apr 18, 2010 17:35 CST"
    pub fn full_date(&self) -> String {
        format!(
            "{}, {} {}, {} {} {}",
            self.dow, self.month, self.day, self.year, self.time, self.zone
        )
        .trim_end()
        .to_string()
    }

    /// Whether this entry is a payment rather than a charge.
    pub fn is_payment(&self) -> bool {
        self.name.eq_ignore_ascii_case("payment")
    }

    /// The amount a payment was made for, without the leading sign.
    /// Charges come back unchanged.
    pub fn payment_amount(&self) -> &str {
        if self.is_payment() {
            self.amount.strip_prefix('-').unwrap_or(&self.amount)
        } else {
            &self.amount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankdemo_data::TransactionFile;

    // 2010-04-18T12:00:00Z
    const NOW: i64 = 1_271_592_000_000;

    fn charge() -> Transaction {
        let json = r#"{
            "id": 1234,
            "name": "Ye Olde Candy Shoppe",
            "address": "123 Main St.",
            "city": "Anywhere",
            "state": "Ohio",
            "zipcode": "54321",
            "amount": "$23.57",
            "dow": "Sun", "day": "18", "month": "Apr",
            "year": "2010", "time": "17:35", "zone": "CST"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        Transaction::from_record_at(record, NOW)
    }

    fn payment() -> Transaction {
        let json = r#"{
            "id": 2263,
            "name": "Payment",
            "address": "", "city": "", "state": "", "zipcode": "",
            "amount": "-$726.81",
            "daysago": 26, "time": "23:12", "zone": "PDT"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        Transaction::from_record_at(record, NOW)
    }

    #[test]
    fn test_calendar_display_parts_are_raw() {
        let tx = charge();
        assert_eq!(tx.dow(), "Sun");
        assert_eq!(tx.month(), "Apr");
        assert_eq!(tx.day(), "18");
        assert_eq!(tx.year(), "2010");
        assert_eq!(tx.time(), "17:35");
        assert_eq!(tx.zone(), "CST");
    }

    #[test]
    fn test_calendar_timestamp_resolved() {
        // 17:35 CST on Apr 18 2010 is 23:35 UTC
        assert_eq!(charge().timestamp(), 1_271_633_700_000);
    }

    #[test]
    fn test_locations() {
        let tx = charge();
        assert_eq!(tx.location_short(), "Anywhere, Ohio");
        assert_eq!(tx.location(), "Anywhere, Ohio 54321");
        assert_eq!(tx.full_address(), "123 Main St., Anywhere, Ohio 54321");
        assert_eq!(
            tx.html_address(None),
            "123 Main St.<br />Anywhere, Ohio 54321"
        );
        assert_eq!(
            tx.html_address(Some(" / ")),
            "123 Main St. / Anywhere, Ohio 54321"
        );
    }

    #[test]
    fn test_empty_location_fields_render_empty() {
        let tx = payment();
        assert_eq!(tx.location_short(), "");
        assert_eq!(tx.location(), "");
        assert_eq!(tx.full_address(), "");
        assert_eq!(tx.html_address(None), "");
    }

    #[test]
    fn test_partial_location_skips_empty_parts() {
        let json = r#"{
            "id": 7, "name": "Kiosk", "address": "",
            "city": "Seattle", "state": "", "zipcode": "98101",
            "amount": "$2.00", "timestamp": 1271626500000
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        let tx = Transaction::from_record_at(record, NOW);
        assert_eq!(tx.location_short(), "Seattle");
        assert_eq!(tx.location(), "Seattle 98101");
        assert_eq!(tx.html_address(None), "Seattle 98101");
    }

    #[test]
    fn test_date_strings() {
        let tx = charge();
        assert_eq!(tx.dow_month(), "Sun, Apr");
        assert_eq!(tx.full_date(), "Sun, Apr 18, 2010 17:35 CST");
    }

    #[test]
    fn test_payment_detection_and_amount() {
        let tx = payment();
        assert!(tx.is_payment());
        assert_eq!(tx.payment_amount(), "$726.81");

        let tx = charge();
        assert!(!tx.is_payment());
        assert_eq!(tx.payment_amount(), "$23.57");
    }

    #[test]
    fn test_amount_value() {
        assert_eq!(charge().amount_value(), 23.57);
        assert_eq!(payment().amount_value(), -726.81);
    }

    #[test]
    fn test_daysago_derives_calendar_parts() {
        let tx = payment();
        // 26 days before Apr 18 2010 (as seen from PDT's local calendar)
        assert_eq!(tx.dow(), "Tue");
        assert_eq!(tx.month(), "Mar");
        assert_eq!(tx.day(), "23");
        assert_eq!(tx.year(), "2010");
        // Raw time and zone are kept
        assert_eq!(tx.time(), "23:12");
        assert_eq!(tx.zone(), "PDT");
    }

    #[test]
    fn test_unresolved_record() {
        let json = r#"{"id": 9, "name": "Mystery", "amount": "$1.00"}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        let tx = Transaction::from_record_at(record, NOW);
        assert_eq!(tx.timestamp(), -1);
        assert_eq!(tx.dow(), "");
        assert_eq!(tx.full_date(), ", , ");
    }

    #[test]
    fn test_timestamp_form_derives_everything() {
        let file: TransactionFile = serde_json::from_str(
            r#"{"transactions": [{"id": 1, "name": "City Market",
                "amount": "$56.92", "timestamp": 1271626500000}]}"#,
        )
        .unwrap();
        let tx =
            Transaction::from_record_at(file.transactions[0].clone(), NOW);
        assert_eq!(tx.timestamp(), 1_271_626_500_000);
        // 21:35 UTC on Sunday April 18
        assert_eq!(tx.dow(), "Sun");
        assert_eq!(tx.time(), "21:35:00");
        assert_eq!(tx.zone(), "");
        assert_eq!(tx.full_date(), "Sun, Apr 18, 2010 21:35:00");
    }
}
