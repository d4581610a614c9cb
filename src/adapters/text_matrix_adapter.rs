//! Whitespace-delimited price matrix files.
//!
//! Row 0 holds volatilities, row 1 initial prices, and every row from 1 on
//! is one day of prices. Unavailable prices are written as `nan`. Blank lines
//! and lines starting with `#` are ignored.

use crate::domain::error::StocksimError;
use crate::domain::historical::HistoricalData;
use crate::ports::price_data_port::PriceDataPort;
use std::fs;
use std::path::{Path, PathBuf};

pub struct TextMatrixAdapter {
    path: PathBuf,
}

impl TextMatrixAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PriceDataPort for TextMatrixAdapter {
    fn load(&self) -> Result<HistoricalData, StocksimError> {
        let content = fs::read_to_string(&self.path).map_err(|e| StocksimError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let data = parse_matrix(&content)?;
        log::info!(
            "loaded {} instruments over {} days from {}",
            data.instruments(),
            data.prices.days(),
            self.path.display()
        );
        Ok(data)
    }
}

pub fn parse_matrix(content: &str) -> Result<HistoricalData, StocksimError> {
    let mut rows = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|cell| parse_cell(cell, line_no + 1))
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }
    HistoricalData::from_rows(&rows)
}

fn parse_cell(cell: &str, line: usize) -> Result<f64, StocksimError> {
    if cell.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| StocksimError::Data {
        reason: format!("line {}: '{}' is not a number", line, cell),
    })
}

pub fn format_matrix(data: &HistoricalData) -> String {
    let mut out = String::new();
    for row in data.to_rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|v| if v.is_nan() { "nan".to_string() } else { v.to_string() })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Write `data` in the layout [`parse_matrix`] reads back.
pub fn write_matrix<P: AsRef<Path>>(path: P, data: &HistoricalData) -> Result<(), StocksimError> {
    fs::write(path.as_ref(), format_matrix(data))?;
    log::info!(
        "wrote {} instruments over {} days to {}",
        data.instruments(),
        data.prices.days(),
        path.as_ref().display()
    );
    Ok(())
}
