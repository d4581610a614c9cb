//! Ledger files: one headerless CSV row per executed trade.

use crate::domain::error::StocksimError;
use crate::domain::ledger::LedgerRecord;
use crate::ports::ledger_port::LedgerPort;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Writes ledger records as they are executed.
pub struct CsvLedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvLedgerWriter<File> {
    /// Create (or truncate) the ledger file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, StocksimError> {
        let path = path.as_ref();
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| StocksimError::Ledger {
                reason: format!("failed to create {}: {}", path.display(), e),
            })?;
        log::debug!("writing ledger to {}", path.display());
        Ok(Self { writer })
    }
}

impl<W: Write> CsvLedgerWriter<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(inner),
        }
    }

    pub fn into_inner(self) -> Result<W, StocksimError> {
        self.writer.into_inner().map_err(|e| StocksimError::Ledger {
            reason: format!("failed to flush ledger: {}", e.error()),
        })
    }
}

impl<W: Write> LedgerPort for CsvLedgerWriter<W> {
    fn append(&mut self, record: &LedgerRecord) -> Result<(), StocksimError> {
        self.writer
            .serialize(record)
            .map_err(|e| StocksimError::Ledger {
                reason: format!("failed to write ledger row: {}", e),
            })?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every record of the ledger file at `path`.
pub fn read_ledger<P: AsRef<Path>>(path: P) -> Result<Vec<LedgerRecord>, StocksimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| StocksimError::Ledger {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    read_ledger_from(file).map_err(|e| match e {
        StocksimError::Ledger { reason } => StocksimError::Ledger {
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

pub fn read_ledger_from<R: Read>(reader: R) -> Result<Vec<LedgerRecord>, StocksimError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize()
        .enumerate()
        .map(|(line, row)| {
            row.map_err(|e| StocksimError::Ledger {
                reason: format!("row {}: {}", line + 1, e),
            })
        })
        .collect()
}
