//! Renderer seam between the list engine and whatever draws it

use crate::transaction::Transaction;
use std::sync::Arc;

/// Renderer reference type
pub type RendererRef = Arc<dyn Renderer>;

/// Anything that can present a derived transaction view.
///
/// The list engine calls this after every recomputation with the full
/// derived view, in order.
pub trait Renderer: Send + Sync {
    fn display_transactions(&self, transactions: &[Transaction]);
}
