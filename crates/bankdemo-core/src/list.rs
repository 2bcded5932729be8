//! The transaction list engine
//!
//! Owns the raw transactions for the active card, the filter state, the
//! cached derived view, and the cursor. Every mutation recomputes the view
//! from the raw collection in a fixed order (date filter, merchant filter,
//! amount filter, then sort) and hands the result to the attached renderer.

use crate::error::CoreResult;
use crate::filter::{
    FilterKind, SortColumn, SortDirection, SortSpec, TransactionFilter,
};
use crate::render::RendererRef;
use crate::time;
use crate::transaction::Transaction;
use bankdemo_data::ProviderRef;
use bankdemo_utils::{currency, text};
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::RwLock;

/// What an `init` call produced once the provider came back.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The load is current; carries the freshly resolved transactions.
    Loaded(Vec<Transaction>),
    /// A newer `init` started while this one was in flight; its result
    /// was discarded.
    Superseded,
}

#[derive(Default)]
struct ListState {
    card_number: Option<String>,
    /// Bumped at the start of every load; a completion whose epoch no
    /// longer matches is stale.
    epoch: u64,
    /// Reference clock captured at load time; anchors days-ago records
    /// and default years in date filter values.
    now_millis: i64,
    raw: Vec<Transaction>,
    view: Option<Vec<Transaction>>,
    cursor: usize,
    filter: TransactionFilter,
}

/// The per-card transaction list.
pub struct TransactionList {
    provider: ProviderRef,
    renderer: RwLock<Option<RendererRef>>,
    state: RwLock<ListState>,
}

impl TransactionList {
    pub fn new(provider: ProviderRef) -> Self {
        Self {
            provider,
            renderer: RwLock::new(None),
            state: RwLock::new(ListState::default()),
        }
    }

    /// Attach the renderer that receives every recomputed view.
    pub fn set_renderer(&self, renderer: RendererRef) {
        *self.renderer.write().unwrap() = Some(renderer);
    }

    /// The card the list currently holds data for.
    pub fn card_number(&self) -> Option<String> {
        self.state.read().unwrap().card_number.clone()
    }

    // ==================== Loading ====================

    /// Load the transactions for a card, replacing whatever the list held.
    ///
    /// Concurrent loads race by epoch: only the most recently started call
    /// may install its result. A call that finishes after being overtaken
    /// returns [`LoadOutcome::Superseded`] and changes nothing; even its
    /// provider error is discarded, since the list no longer wants that
    /// card's data.
    pub async fn init(&self, card_number: &str) -> CoreResult<LoadOutcome> {
        let epoch = {
            let mut state = self.state.write().unwrap();
            state.epoch += 1;
            state.card_number = Some(card_number.to_string());
            state.epoch
        };
        log::info!("loading transactions for card {} (epoch {})", card_number, epoch);

        let result = self.provider.fetch_transactions(card_number).await;
        let now_millis = Utc::now().timestamp_millis();

        let loaded = {
            let mut state = self.state.write().unwrap();
            if state.epoch != epoch {
                log::debug!(
                    "discarding stale load for card {} (epoch {} < {})",
                    card_number,
                    epoch,
                    state.epoch
                );
                return Ok(LoadOutcome::Superseded);
            }

            let records = result?;
            state.now_millis = now_millis;
            state.raw = records
                .into_iter()
                .map(|record| Transaction::from_record_at(record, now_millis))
                .collect();
            // Filter state is left alone: criteria recorded while the
            // fetch was in flight apply to the data it delivers.
            state.cursor = 0;
            Self::recompute_locked(&mut state);
            state.raw.clone()
        };

        log::info!("loaded {} transactions for card {}", loaded.len(), card_number);
        self.notify_renderer();
        Ok(LoadOutcome::Loaded(loaded))
    }

    // ==================== Filtering ====================

    /// Set the date filter and recompute. Returns the active filter count.
    pub fn filter_by_date(&self, value: &str, comparison: &str) -> usize {
        let count = {
            let mut state = self.state.write().unwrap();
            let count = state.filter.add_date(value, comparison);
            Self::recompute_locked(&mut state);
            count
        };
        self.notify_renderer();
        count
    }

    /// Set the amount filter and recompute. Returns the active filter count.
    pub fn filter_by_amount(&self, value: &str, comparison: &str) -> usize {
        let count = {
            let mut state = self.state.write().unwrap();
            let count = state.filter.add_amount(value, comparison);
            Self::recompute_locked(&mut state);
            count
        };
        self.notify_renderer();
        count
    }

    /// Set the merchant filter and recompute. Returns the active filter count.
    pub fn filter_by_merchant(&self, value: &str) -> usize {
        let count = {
            let mut state = self.state.write().unwrap();
            let count = state.filter.add_merchant(value);
            Self::recompute_locked(&mut state);
            count
        };
        self.notify_renderer();
        count
    }

    /// Set the ordering and recompute. Returns the active filter count.
    pub fn sort(&self, column: SortColumn, direction: SortDirection) -> usize {
        let count = {
            let mut state = self.state.write().unwrap();
            let count = state.filter.add_sort(column, direction);
            Self::recompute_locked(&mut state);
            count
        };
        self.notify_renderer();
        count
    }

    /// Drop one filter slot. Returns the number of stored entries removed;
    /// the view is only recomputed when something was actually there.
    pub fn remove_filter(&self, kind: FilterKind) -> usize {
        let removed = {
            let mut state = self.state.write().unwrap();
            let removed = state.filter.remove(kind);
            if removed > 0 {
                Self::recompute_locked(&mut state);
            }
            removed
        };
        if removed > 0 {
            self.notify_renderer();
        }
        removed
    }

    /// Drop every filter. Returns how many slots were active; the view is
    /// only recomputed when at least one was.
    pub fn clear_filters(&self) -> usize {
        let cleared = {
            let mut state = self.state.write().unwrap();
            let cleared = state.filter.clear();
            if cleared > 0 {
                Self::recompute_locked(&mut state);
            }
            cleared
        };
        if cleared > 0 {
            self.notify_renderer();
        }
        cleared
    }

    /// Number of active filter slots.
    pub fn filter_count(&self) -> usize {
        self.state.read().unwrap().filter.count()
    }

    // ==================== View access ====================

    /// The current derived view. Empty before any successful load.
    pub fn get_data(&self) -> Vec<Transaction> {
        self.state
            .read()
            .unwrap()
            .view
            .clone()
            .unwrap_or_default()
    }

    /// Fetch a transaction by view index and move the cursor there.
    ///
    /// `None` reads at the current cursor. An out-of-range index clamps to
    /// the nearest end. An empty view yields nothing and leaves the cursor
    /// at zero.
    pub fn get(&self, index: Option<usize>) -> Option<Transaction> {
        let mut state = self.state.write().unwrap();
        let len = state.view.as_ref().map_or(0, |view| view.len());
        if len == 0 {
            return None;
        }
        let target = index.unwrap_or(state.cursor).min(len - 1);
        state.cursor = target;
        state.view.as_ref().map(|view| view[target].clone())
    }

    /// Advance the cursor one entry, saturating at the end of the view.
    pub fn next(&self) -> Option<Transaction> {
        let mut state = self.state.write().unwrap();
        let len = state.view.as_ref().map_or(0, |view| view.len());
        if len == 0 {
            return None;
        }
        state.cursor = (state.cursor + 1).min(len - 1);
        let cursor = state.cursor;
        state.view.as_ref().map(|view| view[cursor].clone())
    }

    /// Step the cursor back one entry, saturating at the start.
    pub fn prev(&self) -> Option<Transaction> {
        let mut state = self.state.write().unwrap();
        let len = state.view.as_ref().map_or(0, |view| view.len());
        if len == 0 {
            return None;
        }
        state.cursor = state.cursor.min(len - 1).saturating_sub(1);
        let cursor = state.cursor;
        state.view.as_ref().map(|view| view[cursor].clone())
    }

    /// The cursor position, clamped to the current view.
    pub fn current_index(&self) -> usize {
        let state = self.state.read().unwrap();
        let len = state.view.as_ref().map_or(0, |view| view.len());
        if len == 0 {
            0
        } else {
            state.cursor.min(len - 1)
        }
    }

    /// Index of the first view entry whose name matches, ignoring case.
    pub fn find_first(&self, name: &str) -> Option<usize> {
        let state = self.state.read().unwrap();
        state.view.as_ref()?.iter().position(|tx| {
            tx.name.eq_ignore_ascii_case(name)
        })
    }

    /// Distinct merchant names in the view, first occurrence order,
    /// joined with `delimiter`.
    pub fn get_merchants(&self, delimiter: &str) -> String {
        let state = self.state.read().unwrap();
        let mut seen: Vec<&str> = Vec::new();
        if let Some(view) = state.view.as_ref() {
            for tx in view {
                if !seen.contains(&tx.name.as_str()) {
                    seen.push(&tx.name);
                }
            }
        }
        seen.join(delimiter)
    }

    // ==================== Derivation ====================

    fn recompute_locked(state: &mut ListState) {
        let mut view: Vec<Transaction> = state.raw.clone();

        if let Some(date) = state.filter.date() {
            let target = time::date_value_to_timestamp(&date.value, state.now_millis);
            let comparison = date.comparison;
            view.retain(|tx| comparison.matches(tx.timestamp(), target));
        }

        if let Some(merchant) = state.filter.merchant() {
            let wanted = merchant.value.trim().to_lowercase();
            view.retain(|tx| text::merchant_candidates(&tx.name).contains(&wanted));
        }

        if let Some(amount) = state.filter.amount() {
            match currency::parse_amount(&amount.value) {
                Some(target) => {
                    let comparison = amount.comparison;
                    view.retain(|tx| comparison.matches(tx.amount_value(), target));
                }
                // A target that is not a number can match nothing.
                None => view.clear(),
            }
        }

        if let Some(sort) = state.filter.sort() {
            Self::sort_view(&mut view, sort);
        }

        log::debug!(
            "recomputed view: {} of {} transactions, {} filter(s)",
            view.len(),
            state.raw.len(),
            state.filter.count()
        );
        state.view = Some(view);
    }

    fn sort_view(view: &mut [Transaction], sort: SortSpec) {
        view.sort_by(|a, b| {
            let ordering = match sort.column {
                SortColumn::Amount => a
                    .amount_value()
                    .partial_cmp(&b.amount_value())
                    .unwrap_or(Ordering::Equal),
                SortColumn::Date => a.timestamp().cmp(&b.timestamp()),
                SortColumn::Merchant => a.name.cmp(&b.name),
            };
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    fn notify_renderer(&self) {
        let renderer = self.renderer.read().unwrap().clone();
        if let Some(renderer) = renderer {
            let view = self.get_data();
            renderer.display_transactions(&view);
        }
    }
}
