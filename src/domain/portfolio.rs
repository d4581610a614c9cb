//! Per-instrument share holdings.

/// Shares held of each instrument, indexed by instrument.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Portfolio {
    holdings: Vec<u64>,
}

impl Portfolio {
    pub fn new(instruments: usize) -> Self {
        Portfolio {
            holdings: vec![0; instruments],
        }
    }

    pub fn instruments(&self) -> usize {
        self.holdings.len()
    }

    pub fn shares(&self, instrument: usize) -> u64 {
        self.holdings.get(instrument).copied().unwrap_or(0)
    }

    pub fn holds(&self, instrument: usize) -> bool {
        self.shares(instrument) > 0
    }

    pub fn add_shares(&mut self, instrument: usize, shares: u64) {
        if let Some(held) = self.holdings.get_mut(instrument) {
            *held += shares;
        }
    }

    /// Remove every share of `instrument`, returning how many were held.
    pub fn clear(&mut self, instrument: usize) -> u64 {
        self.holdings
            .get_mut(instrument)
            .map(std::mem::take)
            .unwrap_or(0)
    }

    pub fn holdings(&self) -> &[u64] {
        &self.holdings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_portfolio_holds_nothing() {
        let portfolio = Portfolio::new(3);
        assert_eq!(portfolio.instruments(), 3);
        assert_eq!(portfolio.holdings(), &[0, 0, 0]);
        assert!(!portfolio.holds(0));
    }

    #[test]
    fn add_and_clear_shares() {
        let mut portfolio = Portfolio::new(2);
        portfolio.add_shares(1, 40);
        portfolio.add_shares(1, 2);
        assert_eq!(portfolio.shares(1), 42);
        assert!(portfolio.holds(1));

        assert_eq!(portfolio.clear(1), 42);
        assert_eq!(portfolio.shares(1), 0);
        assert_eq!(portfolio.clear(1), 0);
    }

    #[test]
    fn unknown_instrument_holds_nothing() {
        let mut portfolio = Portfolio::new(1);
        portfolio.add_shares(5, 10);
        assert_eq!(portfolio.shares(5), 0);
        assert_eq!(portfolio.clear(5), 0);
    }
}
