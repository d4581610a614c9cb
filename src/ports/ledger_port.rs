//! Append-only sink for executed trades.

use crate::domain::error::StocksimError;
use crate::domain::ledger::LedgerRecord;

pub trait LedgerPort {
    fn append(&mut self, record: &LedgerRecord) -> Result<(), StocksimError>;
}

/// In-memory ledger.
impl LedgerPort for Vec<LedgerRecord> {
    fn append(&mut self, record: &LedgerRecord) -> Result<(), StocksimError> {
        self.push(record.clone());
        Ok(())
    }
}
