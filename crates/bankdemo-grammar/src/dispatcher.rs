//! Recent-transactions grammar dispatcher
//!
//! Applies a recognition result to a [`TransactionList`] and reports what
//! the page should do next. Each navigation context owns its own
//! dispatcher, so recognition error counts never leak between pages.

use crate::interpretation::{Intent, RecognitionHit};
use crate::prompts;
use bankdemo_core::{time, FilterKind, SortColumn, Transaction, TransactionList};
use bankdemo_utils::text;
use once_cell::sync::Lazy;
use regex::Regex;

/// Where a recognized command sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Chat,
    Payment,
    MainMenu,
    RecentTransactions,
}

/// What the page should do after a recognition result was handled.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// A filter or sort was applied; `label` captions the cancel button.
    Filtered {
        kind: FilterKind,
        label: String,
        active: usize,
    },
    /// Show the details of one transaction.
    Detail {
        index: usize,
        transaction: Option<Transaction>,
    },
    Navigate(Page),
    /// Nothing usable was recognized; play `prompt`.
    RecognitionError { errors: u32, prompt: &'static str },
}

/// Caption for an applied amount filter, e.g. "Over 10.00".
fn amount_filter_label(value: &str, comparison: &str) -> String {
    if comparison.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", text::capitalize(comparison), value)
    }
}

static MONTH_DAY_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[JFMASOND][a-z]{2} \d+").unwrap());

/// Caption for an applied date filter, e.g. "Since Apr 18".
///
/// A numeric value is rendered from its calendar parts; anything else
/// keeps the "Mon D" fragment of the spoken text, or the text itself when
/// no such fragment is found.
fn date_filter_label(value: &str, comparison: &str) -> String {
    let day = match value.trim().parse::<i64>().ok().and_then(time::timestamp_to_parts) {
        Some(parts) => format!("{} {}", parts.month, parts.day),
        None => MONTH_DAY_LABEL_RE
            .find(value)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| value.to_string()),
    };

    if comparison.is_empty() {
        day
    } else {
        format!("{} {}", text::capitalize(comparison), day)
    }
}

/// One page's grammar dispatcher. Carries the running recognition error
/// count for that page and nothing else.
#[derive(Debug, Default)]
pub struct RecentTransactionsDispatcher {
    reco_errors: u32,
}

impl RecentTransactionsDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reco_errors(&self) -> u32 {
        self.reco_errors
    }

    pub fn clear_reco_errors(&mut self) {
        self.reco_errors = 0;
    }

    /// Apply a recognition result to the list and decide the page's next
    /// move. Filter and sort commands clear the error count; anything
    /// unrecognized increments it and escalates the reprompt.
    pub fn handle(
        &mut self,
        list: &TransactionList,
        result: &[RecognitionHit],
    ) -> DispatchOutcome {
        let Some(intent) = Intent::from_result(result) else {
            self.reco_errors += 1;
            log::debug!("unusable recognition result ({} errors)", self.reco_errors);
            return DispatchOutcome::RecognitionError {
                errors: self.reco_errors,
                prompt: prompts::reco_error_prompt(self.reco_errors),
            };
        };

        match intent {
            Intent::Sort { column, direction } => {
                let active = list.sort(column, direction);
                self.clear_reco_errors();
                let column_name = match column {
                    SortColumn::Amount => "amount",
                    SortColumn::Date => "date",
                    SortColumn::Merchant => "merchant",
                };
                DispatchOutcome::Filtered {
                    kind: FilterKind::Sort,
                    label: format!("Sort {}", column_name),
                    active,
                }
            }
            Intent::Filter {
                kind,
                value,
                comparison,
            } => {
                let applied = match kind {
                    FilterKind::Amount => Some((
                        list.filter_by_amount(&value, &comparison),
                        amount_filter_label(&value, &comparison),
                    )),
                    FilterKind::Date => Some((
                        list.filter_by_date(&value, &comparison),
                        date_filter_label(&value, &comparison),
                    )),
                    FilterKind::Merchant => {
                        Some((list.filter_by_merchant(&value), value.clone()))
                    }
                    // "filter by sort" is not a thing the grammar produces
                    FilterKind::Sort => None,
                };
                let Some((active, label)) = applied else {
                    self.reco_errors += 1;
                    return DispatchOutcome::RecognitionError {
                        errors: self.reco_errors,
                        prompt: prompts::reco_error_prompt(self.reco_errors),
                    };
                };
                self.clear_reco_errors();
                DispatchOutcome::Filtered {
                    kind,
                    label,
                    active,
                }
            }
            Intent::Detail { index } => DispatchOutcome::Detail {
                index,
                transaction: list.get(Some(index)),
            },
            Intent::Chat => DispatchOutcome::Navigate(Page::Chat),
            Intent::MakePayment => DispatchOutcome::Navigate(Page::Payment),
            Intent::MainMenu => DispatchOutcome::Navigate(Page::MainMenu),
            Intent::RecentTransactions => {
                DispatchOutcome::Navigate(Page::RecentTransactions)
            }
        }
    }
}
