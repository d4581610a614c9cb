//! Ledger aggregation and strategy comparison.

use crate::domain::indicator::round2;
use crate::domain::ledger::LedgerRecord;
use std::collections::BTreeMap;

/// Totals for one ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub total_transactions: usize,
    pub final_profit: f64,
    /// `(day, cumulative cash)` starting from `(0, 0.0)`, one point per
    /// distinct trading day.
    pub cash_over_time: Vec<(usize, f64)>,
}

/// How often a strategy produced the best profit across instruments.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyScore {
    /// Position of the ledger in the evaluated list.
    pub strategy_id: usize,
    pub win_count: usize,
    pub win_rate: f64,
}

pub fn summarise(records: &[LedgerRecord]) -> LedgerSummary {
    let final_profit = round2(records.iter().map(|r| r.cash).sum());

    let mut per_day: BTreeMap<usize, f64> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.day).or_insert(0.0) += record.cash;
    }

    let mut cash_over_time = Vec::with_capacity(per_day.len() + 1);
    cash_over_time.push((0, 0.0));
    let mut running = 0.0;
    for (day, cash) in per_day {
        running = round2(running + cash);
        cash_over_time.push((day, running));
    }

    LedgerSummary {
        total_transactions: records.len(),
        final_profit,
        cash_over_time,
    }
}

/// Net cash per instrument, ascending by instrument id. Instruments without
/// trades are absent.
pub fn profits_per_instrument(records: &[LedgerRecord]) -> Vec<(usize, f64)> {
    let mut totals: BTreeMap<usize, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.instrument).or_insert(0.0) += record.cash;
    }
    totals
        .into_iter()
        .map(|(instrument, cash)| (instrument, round2(cash)))
        .collect()
}

/// Count, for each instrument, which ledger made the most profit on it.
///
/// The earliest ledger wins ties. An instrument missing from a ledger counts
/// as zero profit there.
pub fn evaluate(instrument_count: usize, ledgers: &[Vec<LedgerRecord>]) -> Vec<StrategyScore> {
    let profits: Vec<BTreeMap<usize, f64>> = ledgers
        .iter()
        .map(|records| profits_per_instrument(records).into_iter().collect())
        .collect();

    let mut wins = vec![0usize; ledgers.len()];
    if !ledgers.is_empty() {
        for instrument in 0..instrument_count {
            let profit_of = |id: usize| profits[id].get(&instrument).copied().unwrap_or(0.0);
            let mut best = 0;
            for id in 1..ledgers.len() {
                if profit_of(id) > profit_of(best) {
                    best = id;
                }
            }
            wins[best] += 1;
        }
    }

    wins.into_iter()
        .enumerate()
        .map(|(strategy_id, win_count)| StrategyScore {
            strategy_id,
            win_count,
            win_rate: if instrument_count > 0 {
                round2(win_count as f64 / instrument_count as f64)
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::TradeAction;

    fn record(day: usize, instrument: usize, cash: f64) -> LedgerRecord {
        let action = if cash < 0.0 {
            TradeAction::Buy
        } else {
            TradeAction::Sell
        };
        LedgerRecord {
            action,
            day,
            instrument,
            shares: if cash < 0.0 { 1 } else { -1 },
            price: cash.abs(),
            cash,
            fee: 0.0,
        }
    }

    #[test]
    fn summary_of_empty_ledger() {
        let summary = summarise(&[]);
        assert_eq!(summary.total_transactions, 0);
        assert_eq!(summary.final_profit, 0.0);
        assert_eq!(summary.cash_over_time, vec![(0, 0.0)]);
    }

    #[test]
    fn summary_groups_by_day_in_order() {
        let records = vec![
            record(0, 0, -100.0),
            record(0, 1, -50.0),
            record(9, 0, 130.0),
            record(4, 1, 60.25),
        ];
        let summary = summarise(&records);
        assert_eq!(summary.total_transactions, 4);
        assert_eq!(summary.final_profit, 40.25);
        assert_eq!(
            summary.cash_over_time,
            vec![(0, 0.0), (0, -150.0), (4, -89.75), (9, 40.25)]
        );
    }

    #[test]
    fn profit_per_instrument_sorted_by_id() {
        let records = vec![
            record(0, 2, -10.0),
            record(0, 0, -20.0),
            record(5, 2, 15.556),
            record(5, 0, 19.0),
        ];
        assert_eq!(
            profits_per_instrument(&records),
            vec![(0, -1.0), (2, 5.56)]
        );
    }

    #[test]
    fn evaluate_counts_wins() {
        let a = vec![record(0, 0, 10.0), record(0, 1, -5.0), record(0, 2, 3.0)];
        let b = vec![record(0, 0, 5.0), record(0, 1, 1.0), record(0, 2, 3.0)];
        let scores = evaluate(3, &[a, b]);

        // Instrument 2 is a tie and goes to the first ledger.
        assert_eq!(
            scores,
            vec![
                StrategyScore {
                    strategy_id: 0,
                    win_count: 2,
                    win_rate: 0.67
                },
                StrategyScore {
                    strategy_id: 1,
                    win_count: 1,
                    win_rate: 0.33
                },
            ]
        );
    }

    #[test]
    fn evaluate_reports_strategies_without_wins() {
        let a = vec![record(0, 0, 10.0)];
        let b = vec![record(0, 0, 1.0)];
        let c = vec![record(0, 0, 2.0)];
        let scores = evaluate(1, &[a, b, c]);
        let wins: Vec<usize> = scores.iter().map(|s| s.win_count).collect();
        assert_eq!(wins, vec![1, 0, 0]);
        assert_eq!(scores[1].win_rate, 0.0);
    }

    #[test]
    fn missing_instrument_counts_as_zero() {
        let a = vec![record(0, 0, -4.0)];
        let b: Vec<LedgerRecord> = Vec::new();
        let scores = evaluate(1, &[a, b]);
        assert_eq!(scores[1].win_count, 1);
    }

    #[test]
    fn evaluate_without_ledgers_or_instruments() {
        assert!(evaluate(3, &[]).is_empty());
        let scores = evaluate(0, &[vec![record(0, 0, 1.0)]]);
        assert_eq!(scores[0].win_count, 0);
        assert_eq!(scores[0].win_rate, 0.0);
    }
}
