//! Historical price data access port trait.

use crate::domain::error::StocksimError;
use crate::domain::historical::HistoricalData;

pub trait PriceDataPort {
    fn load(&self) -> Result<HistoricalData, StocksimError>;
}
