//! Formatting and parsing helpers shared across the demo banking crates

pub mod calendar;
pub mod currency;
pub mod text;

pub use currency::{format_amount, parse_amount};
pub use text::{capitalize, decode_entities, merchant_candidates};
