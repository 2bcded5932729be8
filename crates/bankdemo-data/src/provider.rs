//! Async data provider trait and the JSON file implementation
//!
//! The demo loads mock JSON documents: `transactions-<card>.json` for each
//! card and `<account>.json` for the demo account. The provider trait is
//! what the transaction list engine consumes; anything that can produce raw
//! records (a fixture directory, an in-memory stub in tests) can stand in.

use crate::error::{DataError, DataResult};
use crate::records::{AccountFile, TransactionFile, TransactionRecord};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Provider reference type
pub type ProviderRef = Arc<dyn TransactionProvider>;

/// Trait for transaction data providers
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Fetch the raw transaction records for a card number.
    async fn fetch_transactions(&self, card_number: &str)
        -> DataResult<Vec<TransactionRecord>>;
}

/// Trait for account data providers
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Fetch the account document for a demo account number.
    async fn fetch_account(&self, account_number: &str) -> DataResult<AccountFile>;
}

/// Default provider reading the mock JSON files from a directory.
#[derive(Debug, Clone)]
pub struct JsonDataProvider {
    base_path: PathBuf,
}

impl JsonDataProvider {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Path of the transaction document for a card number.
    fn transactions_path(&self, card_number: &str) -> PathBuf {
        self.base_path
            .join(format!("transactions-{}.json", card_number))
    }

    /// Path of the account document for an account number.
    fn account_path(&self, account_number: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", account_number))
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &Path,
        key: &str,
    ) -> DataResult<T> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DataError::NotFound {
                    key: key.to_string(),
                }
            } else {
                DataError::Io {
                    path: path.to_string_lossy().to_string(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| DataError::Json {
            source_name: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TransactionProvider for JsonDataProvider {
    async fn fetch_transactions(
        &self,
        card_number: &str,
    ) -> DataResult<Vec<TransactionRecord>> {
        let path = self.transactions_path(card_number);
        log::debug!("fetching transactions from {}", path.display());
        let file: TransactionFile = self.read_json(&path, card_number).await?;
        Ok(file.transactions)
    }
}

#[async_trait]
impl AccountProvider for JsonDataProvider {
    async fn fetch_account(&self, account_number: &str) -> DataResult<AccountFile> {
        let path = self.account_path(account_number);
        log::debug!("fetching account data from {}", path.display());
        self.read_json(&path, account_number).await
    }
}
