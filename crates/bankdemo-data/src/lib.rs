//! Mock account and transaction data for the demo banking app
//!
//! The original demo ships JSON documents instead of talking to a real
//! backend; this crate models those documents, loads them asynchronously,
//! and tracks the active account/card selections.

pub mod accounts;
pub mod error;
pub mod provider;
pub mod records;

pub use accounts::{Account, AccountData, AccountStore};
pub use error::{DataError, DataResult};
pub use provider::{AccountProvider, JsonDataProvider, ProviderRef, TransactionProvider};
pub use records::{AccountFile, AccountRecord, RecordDate, TransactionFile, TransactionRecord};
