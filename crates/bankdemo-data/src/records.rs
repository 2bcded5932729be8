//! Raw record types for the mock JSON data
//!
//! These mirror the JSON documents the demo ships with: one account file
//! per demo account (`<account>.json`) and one transaction file per card
//! (`transactions-<card>.json`).

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Accept either a JSON string or a bare number for loosely typed fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
    }

    match Raw::deserialize(deserializer)? {
        Raw::String(s) => Ok(s),
        Raw::Number(n) => Ok(n.to_string()),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    string_or_number(deserializer).map(Some)
}

/// The temporal descriptor of a raw transaction record.
///
/// Exactly one of the three forms appears in well-formed data. A record
/// carrying none of them still deserializes; its date is simply absent and
/// timestamp resolution yields the sentinel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum RecordDate {
    /// Absolute epoch timestamp in milliseconds
    Timestamp { timestamp: i64 },
    /// Calendar tuple: "Sun", "Apr", "18", "2010", "17:35", "CST"
    Calendar {
        dow: String,
        month: String,
        day: String,
        year: String,
        time: String,
        zone: String,
    },
    /// Offset in days from "now" plus a time of day
    DaysAgo {
        daysago: i64,
        time: String,
        zone: String,
    },
}

/// One raw ledger entry as it appears in the transaction JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawTransactionRecord")]
pub struct TransactionRecord {
    pub id: i64,
    /// Merchant / display name (may contain HTML entities)
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// Signed monetary string, e.g. "$23.57" or "-$726.81"
    pub amount: String,
    pub date: Option<RecordDate>,
}

/// Flat deserialization shape for [`TransactionRecord`]. The three temporal
/// forms arrive as sibling fields of the record, so they are collected here
/// and folded into [`RecordDate`] with the same precedence the data uses:
/// absolute timestamp, then days-ago offset, then the calendar tuple.
#[derive(Debug, Deserialize)]
struct RawTransactionRecord {
    id: i64,
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    zipcode: Option<String>,
    amount: String,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    daysago: Option<i64>,
    #[serde(default)]
    dow: Option<String>,
    #[serde(default)]
    month: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    day: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    year: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    zone: Option<String>,
}

impl From<RawTransactionRecord> for TransactionRecord {
    fn from(raw: RawTransactionRecord) -> Self {
        let date = if let Some(timestamp) = raw.timestamp {
            Some(RecordDate::Timestamp { timestamp })
        } else if let (Some(daysago), Some(time)) = (raw.daysago, raw.time.clone()) {
            Some(RecordDate::DaysAgo {
                daysago,
                time,
                zone: raw.zone.clone().unwrap_or_default(),
            })
        } else {
            match (raw.dow, raw.month, raw.day, raw.year, raw.time, raw.zone) {
                (Some(dow), Some(month), Some(day), Some(year), Some(time), Some(zone)) => {
                    Some(RecordDate::Calendar {
                        dow,
                        month,
                        day,
                        year,
                        time,
                        zone,
                    })
                }
                _ => None,
            }
        };

        TransactionRecord {
            id: raw.id,
            name: raw.name,
            address: raw.address,
            city: raw.city,
            state: raw.state,
            zipcode: raw.zipcode.unwrap_or_default(),
            amount: raw.amount,
            date,
        }
    }
}

/// Envelope of a `transactions-<card>.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionFile {
    pub transactions: Vec<TransactionRecord>,
}

/// One account entry (either a pay-from bank account or a pay-to card).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub routing: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub duedate: Option<String>,
    #[serde(default)]
    pub minpmt: Option<String>,
}

/// Envelope of an `<account>.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountFile {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub src_accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub dest_accounts: Vec<AccountRecord>,
}
