//! Recognition grammar bridge for the demo banking app
//!
//! The native shell posts recognition results as JSON; this crate types
//! them, maps them to intents, applies them to the transaction list, and
//! picks the audio prompts the page should play.

pub mod dispatcher;
pub mod interpretation;
pub mod prompts;

pub use dispatcher::{DispatchOutcome, Page, RecentTransactionsDispatcher};
pub use interpretation::{Intent, Interpretation, RecognitionHit};
pub use prompts::{prompt_file, reco_error_prompt};
