//! Transaction list engine for the demo banking app
//!
//! Turns the raw mock records into resolved [`Transaction`]s and drives
//! the recent-transactions page: filtering by date, merchant, and amount,
//! sorting, and cursor-style navigation over the derived view. Loading is
//! asynchronous and last-writer-wins; a load overtaken by a newer one is
//! discarded.

pub mod error;
pub mod filter;
pub mod list;
pub mod render;
pub mod time;
pub mod transaction;

pub use error::{CoreError, CoreResult, ErrorCode};
pub use filter::{
    AmountComparison, DateComparison, FilterKind, SortColumn, SortDirection,
    TransactionFilter,
};
pub use list::{LoadOutcome, TransactionList};
pub use render::{Renderer, RendererRef};
pub use transaction::Transaction;
