//! Trade-ledger access port trait.

use crate::domain::error::MarketscopeError;
use crate::domain::trades::TransactionBook;

pub trait LedgerPort {
    /// Load the full transaction book. A malformed ledger is fatal for the
    /// session; there is no partial-data fallback.
    fn load(&self) -> Result<TransactionBook, MarketscopeError>;
}
