//! Account display model and the active-account store
//!
//! Accounts come in two flavors: "pay from" bank accounts and "pay to"
//! cards. Both get display derivations (card number masking, dropdown
//! labels) computed once from the client configuration.

use crate::error::{DataError, DataResult};
use crate::provider::AccountProvider;
use crate::records::AccountRecord;
use bankdemo_config::ClientConfig;
use std::sync::{Arc, RwLock};

/// An account with its display derivations.
#[derive(Debug, Clone)]
pub struct Account {
    pub name: String,
    pub number: String,
    pub routing: Option<String>,
    pub balance: Option<String>,
    pub duedate: Option<String>,
    /// Minimum payment, defaulted when the record omits it
    pub minpmt: String,
    /// Trailing digits shown in card dropdowns
    pub card_digits: String,
    /// Prefix + trailing digits, e.g. "...3333"
    pub card_display: String,
    /// "name ... {last 4 digits}"
    pub pay_from: String,
    /// "name {prefix} {digits}"
    pub pay_to: String,
}

fn tail(s: &str, n: usize) -> &str {
    &s[s.len().saturating_sub(n)..]
}

impl Account {
    /// Build an account from a raw record using the client display rules.
    pub fn from_record(record: AccountRecord, client: &ClientConfig) -> Self {
        let card_digits = tail(&record.number, client.card_show_digits).to_string();
        let card_display = format!("{}{}", client.card_digits_prefix, card_digits);
        let pay_from = format!("{} ... {}", record.name, tail(&record.number, 4));
        let pay_to = format!(
            "{} {} {}",
            record.name, client.card_digits_prefix, card_digits
        );

        Self {
            name: record.name,
            number: record.number,
            routing: record.routing,
            balance: record.balance,
            duedate: record.duedate,
            minpmt: record.minpmt.unwrap_or_else(|| "20.00".to_string()),
            card_digits,
            card_display,
            pay_from,
            pay_to,
        }
    }
}

/// Loaded account data for one demo account.
#[derive(Debug, Clone, Default)]
pub struct AccountData {
    pub fullname: String,
    pub src_accounts: Vec<Account>,
    pub dest_accounts: Vec<Account>,
}

#[derive(Debug, Default)]
struct StoreState {
    data: Option<AccountData>,
    active_card_number: Option<String>,
    active_src_number: Option<String>,
}

/// Holds the loaded account data and tracks the active selections.
///
/// Loading happens once per account number; switching accounts goes through
/// `init`, which resets everything.
pub struct AccountStore {
    provider: Arc<dyn AccountProvider>,
    client: ClientConfig,
    account_number: RwLock<Option<String>>,
    state: RwLock<StoreState>,
}

impl AccountStore {
    pub fn new(provider: Arc<dyn AccountProvider>, client: ClientConfig) -> Self {
        Self {
            provider,
            client,
            account_number: RwLock::new(None),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Select the demo account and discard any previously loaded data.
    pub fn init(&self, account_number: &str) {
        *self.account_number.write().unwrap() = Some(account_number.to_string());
        *self.state.write().unwrap() = StoreState::default();
    }

    /// The selected demo account number.
    pub fn account_number(&self) -> Option<String> {
        self.account_number.read().unwrap().clone()
    }

    /// Load the account document if it has not been loaded yet.
    pub async fn load(&self) -> DataResult<AccountData> {
        if let Some(data) = self.state.read().unwrap().data.clone() {
            return Ok(data);
        }

        let number = self.account_number().ok_or(DataError::NotLoaded)?;
        let file = self.provider.fetch_account(&number).await?;

        let data = AccountData {
            fullname: file.fullname,
            src_accounts: file
                .src_accounts
                .into_iter()
                .map(|r| Account::from_record(r, &self.client))
                .collect(),
            dest_accounts: file
                .dest_accounts
                .into_iter()
                .map(|r| Account::from_record(r, &self.client))
                .collect(),
        };

        log::info!(
            "account {} loaded: {} pay-from, {} pay-to",
            number,
            data.src_accounts.len(),
            data.dest_accounts.len()
        );

        self.state.write().unwrap().data = Some(data.clone());
        Ok(data)
    }

    /// The loaded account data.
    pub fn data(&self) -> DataResult<AccountData> {
        self.state
            .read()
            .unwrap()
            .data
            .clone()
            .ok_or(DataError::NotLoaded)
    }

    /// Set the active pay-to card number.
    pub fn set_active_card_number(&self, number: &str) {
        self.state.write().unwrap().active_card_number = Some(number.to_string());
    }

    /// The active pay-to card number, defaulting to the first card.
    pub fn active_card_number(&self) -> DataResult<String> {
        let mut state = self.state.write().unwrap();
        if state.active_card_number.is_none() {
            let data = state.data.as_ref().ok_or(DataError::NotLoaded)?;
            let first = data.dest_accounts.first().ok_or_else(|| DataError::NotFound {
                key: "dest_accounts".to_string(),
            })?;
            state.active_card_number = Some(first.number.clone());
        }
        Ok(state.active_card_number.clone().unwrap())
    }

    /// The active pay-to card account.
    pub fn dest_account(&self) -> DataResult<Account> {
        let number = self.active_card_number()?;
        let data = self.data()?;
        data.dest_accounts
            .into_iter()
            .find(|a| a.number == number)
            .ok_or(DataError::NotFound { key: number })
    }

    /// Set the active pay-from account number.
    pub fn set_active_src_number(&self, number: &str) {
        self.state.write().unwrap().active_src_number = Some(number.to_string());
    }

    /// The active pay-from account, defaulting to the first one.
    pub fn src_account(&self) -> DataResult<Account> {
        let number = {
            let mut state = self.state.write().unwrap();
            if state.active_src_number.is_none() {
                let data = state.data.as_ref().ok_or(DataError::NotLoaded)?;
                let first = data.src_accounts.first().ok_or_else(|| DataError::NotFound {
                    key: "src_accounts".to_string(),
                })?;
                state.active_src_number = Some(first.number.clone());
            }
            state.active_src_number.clone().unwrap()
        };
        let data = self.data()?;
        data.src_accounts
            .into_iter()
            .find(|a| a.number == number)
            .ok_or(DataError::NotFound { key: number })
    }

    /// Add a new pay-from account.
    pub fn add_src_account(&self, name: &str, routing: &str, number: &str) -> DataResult<()> {
        let account = Account::from_record(
            AccountRecord {
                name: name.to_string(),
                number: number.to_string(),
                routing: Some(routing.to_string()),
                balance: None,
                duedate: None,
                minpmt: None,
            },
            &self.client,
        );
        let mut state = self.state.write().unwrap();
        let data = state.data.as_mut().ok_or(DataError::NotLoaded)?;
        data.src_accounts.push(account);
        Ok(())
    }

    /// Balance of the active card, when the record carries one.
    pub fn current_balance(&self) -> DataResult<Option<String>> {
        Ok(self.dest_account()?.balance)
    }

    /// Minimum payment of the active card.
    pub fn minimum_payment(&self) -> DataResult<String> {
        Ok(self.dest_account()?.minpmt)
    }
}
