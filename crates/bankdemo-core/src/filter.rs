//! Filter state for the transaction list
//!
//! Four independent slots: amount, date, merchant, and sort. Adding to a
//! slot replaces whatever was there; the slot vocabulary (the comparison
//! phrases a recognizer can produce) is folded into small enums here so
//! the list engine never sees raw phrases.

use crate::time::DAY_MILLIS;
use thiserror::Error;

/// Half-width of the "about" amount window, in currency units.
const ABOUT_WINDOW: f64 = 0.50;

#[derive(Debug, Error)]
#[error("unknown filter kind: {0}")]
pub struct UnknownFilterKind(String);

/// The four filter slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Amount,
    Date,
    Merchant,
    Sort,
}

impl std::str::FromStr for FilterKind {
    type Err = UnknownFilterKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amount" => Ok(FilterKind::Amount),
            "date" => Ok(FilterKind::Date),
            "merchant" => Ok(FilterKind::Merchant),
            "sort" => Ok(FilterKind::Sort),
            other => Err(UnknownFilterKind(other.to_string())),
        }
    }
}

/// How an amount filter compares against its target value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountComparison {
    Over,
    Under,
    /// Within an exclusive ±0.50 window of the target
    About,
    #[default]
    Exactly,
}

impl AmountComparison {
    /// Map a spoken comparison phrase. Anything unrecognized means an
    /// exact match.
    pub fn from_phrase(phrase: &str) -> Self {
        match phrase.trim().to_lowercase().as_str() {
            "over" | "more than" | "greater than" => AmountComparison::Over,
            "under" | "less than" => AmountComparison::Under,
            "about" | "around" => AmountComparison::About,
            _ => AmountComparison::Exactly,
        }
    }

    pub fn matches(self, amount: f64, target: f64) -> bool {
        match self {
            AmountComparison::Over => amount > target,
            AmountComparison::Under => amount < target,
            AmountComparison::About => {
                amount > target - ABOUT_WINDOW && amount < target + ABOUT_WINDOW
            }
            AmountComparison::Exactly => amount == target,
        }
    }
}

/// How a date filter compares against its target instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateComparison {
    /// At or after the target
    Since,
    /// Strictly before the target
    Before,
    /// Within the 24 hours starting at the target
    #[default]
    On,
}

impl DateComparison {
    pub fn from_phrase(phrase: &str) -> Self {
        match phrase.trim().to_lowercase().as_str() {
            "since" | "after" => DateComparison::Since,
            "before" | "prior to" => DateComparison::Before,
            _ => DateComparison::On,
        }
    }

    pub fn matches(self, timestamp: i64, target: i64) -> bool {
        match self {
            DateComparison::Since => timestamp >= target,
            DateComparison::Before => timestamp < target,
            DateComparison::On => {
                timestamp >= target && timestamp < target + DAY_MILLIS
            }
        }
    }
}

/// The column a sort entry orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Amount,
    Date,
    Merchant,
}

impl std::str::FromStr for SortColumn {
    type Err = UnknownFilterKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amount" => Ok(SortColumn::Amount),
            "date" => Ok(SortColumn::Date),
            "merchant" => Ok(SortColumn::Merchant),
            other => Err(UnknownFilterKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// "desc" reverses; any other phrase sorts ascending.
    pub fn from_phrase(phrase: &str) -> Self {
        if phrase.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmountFilter {
    pub value: String,
    pub comparison: AmountComparison,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateFilter {
    pub value: String,
    pub comparison: DateComparison,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MerchantFilter {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// The filter state of one transaction list.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    amount: Option<AmountFilter>,
    date: Option<DateFilter>,
    merchant: Option<MerchantFilter>,
    sort: Option<SortSpec>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        [
            self.amount.is_some(),
            self.date.is_some(),
            self.merchant.is_some(),
            self.sort.is_some(),
        ]
        .iter()
        .filter(|occupied| **occupied)
        .count()
    }

    /// Set the amount slot, replacing any previous amount filter.
    /// Returns the number of occupied slots afterwards.
    pub fn add_amount(&mut self, value: &str, comparison: &str) -> usize {
        self.amount = Some(AmountFilter {
            value: value.to_string(),
            comparison: AmountComparison::from_phrase(comparison),
        });
        self.count()
    }

    /// Set the date slot, replacing any previous date filter.
    pub fn add_date(&mut self, value: &str, comparison: &str) -> usize {
        self.date = Some(DateFilter {
            value: value.to_string(),
            comparison: DateComparison::from_phrase(comparison),
        });
        self.count()
    }

    /// Set the merchant slot, replacing any previous merchant filter.
    pub fn add_merchant(&mut self, value: &str) -> usize {
        self.merchant = Some(MerchantFilter {
            value: value.to_string(),
        });
        self.count()
    }

    /// Set the sort slot, replacing any previous ordering.
    pub fn add_sort(&mut self, column: SortColumn, direction: SortDirection) -> usize {
        self.sort = Some(SortSpec { column, direction });
        self.count()
    }

    /// Empty one slot. Returns the number of stored entries that were
    /// removed: the value/comparison pairs count as two, a merchant value
    /// as one, and an already empty slot as zero.
    pub fn remove(&mut self, kind: FilterKind) -> usize {
        match kind {
            FilterKind::Amount => self.amount.take().map_or(0, |_| 2),
            FilterKind::Date => self.date.take().map_or(0, |_| 2),
            FilterKind::Merchant => self.merchant.take().map_or(0, |_| 1),
            FilterKind::Sort => self.sort.take().map_or(0, |_| 2),
        }
    }

    /// Empty every slot. Returns how many slots were occupied.
    pub fn clear(&mut self) -> usize {
        let active = self.count();
        *self = Self::default();
        active
    }

    pub fn amount(&self) -> Option<&AmountFilter> {
        self.amount.as_ref()
    }

    pub fn date(&self) -> Option<&DateFilter> {
        self.date.as_ref()
    }

    pub fn merchant(&self) -> Option<&MerchantFilter> {
        self.merchant.as_ref()
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_kind_parsing() {
        assert_eq!("merchant".parse::<FilterKind>().unwrap(), FilterKind::Merchant);
        assert_eq!("Sort".parse::<FilterKind>().unwrap(), FilterKind::Sort);
        assert!("color".parse::<FilterKind>().is_err());
    }

    #[test]
    fn test_amount_comparison_vocabulary() {
        assert_eq!(AmountComparison::from_phrase("over"), AmountComparison::Over);
        assert_eq!(
            AmountComparison::from_phrase("more than"),
            AmountComparison::Over
        );
        assert_eq!(
            AmountComparison::from_phrase("greater than"),
            AmountComparison::Over
        );
        assert_eq!(
            AmountComparison::from_phrase("less than"),
            AmountComparison::Under
        );
        assert_eq!(
            AmountComparison::from_phrase("around"),
            AmountComparison::About
        );
        assert_eq!(AmountComparison::from_phrase(""), AmountComparison::Exactly);
        assert_eq!(
            AmountComparison::from_phrase("exactly"),
            AmountComparison::Exactly
        );
    }

    #[test]
    fn test_about_window_is_exclusive() {
        let about = AmountComparison::About;
        assert!(about.matches(10.49, 10.0));
        assert!(about.matches(9.51, 10.0));
        assert!(!about.matches(10.50, 10.0));
        assert!(!about.matches(9.50, 10.0));
    }

    #[test]
    fn test_date_comparison_vocabulary() {
        assert_eq!(DateComparison::from_phrase("since"), DateComparison::Since);
        assert_eq!(DateComparison::from_phrase("after"), DateComparison::Since);
        assert_eq!(
            DateComparison::from_phrase("prior to"),
            DateComparison::Before
        );
        assert_eq!(DateComparison::from_phrase("on"), DateComparison::On);
        assert_eq!(DateComparison::from_phrase(""), DateComparison::On);
    }

    #[test]
    fn test_on_matches_a_single_day() {
        let midnight = 1_271_548_800_000;
        let on = DateComparison::On;
        assert!(on.matches(midnight, midnight));
        assert!(on.matches(midnight + DAY_MILLIS - 1, midnight));
        assert!(!on.matches(midnight + DAY_MILLIS, midnight));
        assert!(!on.matches(midnight - 1, midnight));
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::from_phrase("desc"), SortDirection::Descending);
        assert_eq!(SortDirection::from_phrase("asc"), SortDirection::Ascending);
        assert_eq!(SortDirection::from_phrase(""), SortDirection::Ascending);
    }

    #[test]
    fn test_add_returns_slot_count() {
        let mut filter = TransactionFilter::new();
        assert_eq!(filter.add_date("Apr 18 2010", "since"), 1);
        assert_eq!(filter.add_amount("10.00", "over"), 2);
        assert_eq!(filter.add_sort(SortColumn::Date, SortDirection::Ascending), 3);
        // Replacing a slot does not grow the count
        assert_eq!(filter.add_amount("25.00", "under"), 3);
        assert_eq!(
            filter.amount().unwrap().comparison,
            AmountComparison::Under
        );
    }

    #[test]
    fn test_remove_reports_entries() {
        let mut filter = TransactionFilter::new();
        filter.add_amount("10.00", "over");
        filter.add_merchant("Starbucks");
        assert_eq!(filter.remove(FilterKind::Amount), 2);
        assert_eq!(filter.remove(FilterKind::Amount), 0);
        assert_eq!(filter.remove(FilterKind::Merchant), 1);
        assert_eq!(filter.remove(FilterKind::Date), 0);
        assert_eq!(filter.count(), 0);
    }

    #[test]
    fn test_clear_reports_active_slots() {
        let mut filter = TransactionFilter::new();
        filter.add_date("Apr 1", "");
        filter.add_amount("5.00", "about");
        filter.add_sort(SortColumn::Amount, SortDirection::Descending);
        assert_eq!(filter.clear(), 3);
        assert_eq!(filter.clear(), 0);
        assert_eq!(filter.count(), 0);
    }
}
