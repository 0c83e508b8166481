//! Personal trade ledger and trade-to-price matching.
//!
//! A `TransactionBook` holds the parsed ledger (read-only within the core);
//! a `TradeMatcher` borrows one price series plus the records for one stock
//! code and projects trade dates onto the series for chart annotation.

use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub stock_code: String,
    pub stock_name: String,
    pub account: String,
    pub trade_date: NaiveDate,
    pub side: Side,
    pub unit_price: f64,
    pub realized_pnl: f64,
}

/// All records from one ledger file, keyed by stock code.
#[derive(Debug, Clone, Default)]
pub struct TransactionBook {
    by_code: BTreeMap<String, Vec<TransactionRecord>>,
}

impl TransactionBook {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        let mut by_code: BTreeMap<String, Vec<TransactionRecord>> = BTreeMap::new();
        for record in records {
            by_code
                .entry(record.stock_code.clone())
                .or_default()
                .push(record);
        }
        for records in by_code.values_mut() {
            records.sort_by_key(|r| r.trade_date);
        }
        Self { by_code }
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Records for one stock code, ordered by trade date. Unknown codes
    /// yield an empty slice, not an error.
    pub fn records_for(&self, stock_code: &str) -> &[TransactionRecord] {
        self.by_code
            .get(stock_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sorted `CODE：NAME` labels for every traded stock, the selector
    /// contents of the shell.
    pub fn stock_labels(&self) -> Vec<String> {
        self.by_code
            .iter()
            .filter_map(|(code, records)| {
                records
                    .first()
                    .map(|r| format!("{}：{}", code, r.stock_name))
            })
            .collect()
    }
}

/// Joins a price series against the ledger records of one stock code.
/// Both inputs are borrowed; the matcher owns nothing.
pub struct TradeMatcher<'a> {
    bars: &'a [OhlcvBar],
    records: &'a [TransactionRecord],
}

impl<'a> TradeMatcher<'a> {
    pub fn new(bars: &'a [OhlcvBar], records: &'a [TransactionRecord]) -> Self {
        Self { bars, records }
    }

    /// Dates with a trade of the given side, whether or not the price
    /// series covers them.
    pub fn trade_dates(&self, side: Side) -> BTreeSet<NaiveDate> {
        self.records
            .iter()
            .filter(|r| r.side == side)
            .map(|r| r.trade_date)
            .collect()
    }

    /// (date, close) pairs where a trade date of the given side also
    /// appears on the series date axis. Both sides of the comparison are
    /// already calendar dates; time-of-day never enters the domain.
    pub fn matched_points(&self, side: Side) -> Vec<(NaiveDate, f64)> {
        let dates = self.trade_dates(side);
        self.bars
            .iter()
            .filter(|b| dates.contains(&b.date))
            .map(|b| (b.date, b.close))
            .collect()
    }

    /// Sum of realized P&L over every record, independent of how much of
    /// the price series the trades overlap.
    pub fn total_realized_pnl(&self) -> f64 {
        self.records.iter().map(|r| r.realized_pnl).sum()
    }

    pub fn trade_count(&self) -> usize {
        self.records.len()
    }

    pub fn count(&self, side: Side) -> usize {
        self.records.iter().filter(|r| r.side == side).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_bar(date_str: &str, close: f64) -> OhlcvBar {
        OhlcvBar {
            ticker: "7203.T".into(),
            date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    fn make_record(code: &str, date_str: &str, side: Side, pnl: f64) -> TransactionRecord {
        TransactionRecord {
            stock_code: code.into(),
            stock_name: "トヨタ自動車".into(),
            account: "standard".into(),
            trade_date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
            side,
            unit_price: 1500.0,
            realized_pnl: pnl,
        }
    }

    #[test]
    fn book_groups_and_sorts_by_date() {
        let book = TransactionBook::new(vec![
            make_record("7203", "2023-06-01", Side::Sell, 500.0),
            make_record("7203", "2023-05-10", Side::Buy, 0.0),
        ]);
        let records = book.records_for("7203");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].trade_date, date(2023, 5, 10));
    }

    #[test]
    fn book_unknown_code_is_empty() {
        let book = TransactionBook::new(vec![make_record("7203", "2023-05-10", Side::Buy, 0.0)]);
        assert!(book.records_for("9984").is_empty());
    }

    #[test]
    fn book_stock_labels() {
        let book = TransactionBook::new(vec![make_record("7203", "2023-05-10", Side::Buy, 0.0)]);
        assert_eq!(book.stock_labels(), vec!["7203：トヨタ自動車".to_string()]);
    }

    #[test]
    fn matched_points_exact_scenario() {
        let bars = vec![
            make_bar("2023-05-09", 1480.0),
            make_bar("2023-05-10", 1500.0),
            make_bar("2023-05-11", 1520.0),
        ];
        let records = vec![make_record("7203", "2023-05-10", Side::Buy, 0.0)];
        let matcher = TradeMatcher::new(&bars, &records);

        assert_eq!(
            matcher.matched_points(Side::Buy),
            vec![(date(2023, 5, 10), 1500.0)]
        );
        assert!(matcher.matched_points(Side::Sell).is_empty());
    }

    #[test]
    fn trade_dates_ignore_series_coverage() {
        let bars = vec![make_bar("2023-05-09", 1480.0)];
        let records = vec![
            make_record("7203", "2023-05-10", Side::Buy, 0.0),
            make_record("7203", "2024-01-15", Side::Sell, 300.0),
        ];
        let matcher = TradeMatcher::new(&bars, &records);

        assert_eq!(matcher.trade_dates(Side::Buy).len(), 1);
        assert_eq!(matcher.trade_dates(Side::Sell).len(), 1);
        assert!(matcher.matched_points(Side::Buy).is_empty());
    }

    #[test]
    fn matched_points_subset_of_trade_dates() {
        let bars: Vec<OhlcvBar> = (1..=10)
            .map(|d| make_bar(&format!("2023-05-{:02}", d), 1000.0 + d as f64))
            .collect();
        let records = vec![
            make_record("7203", "2023-05-03", Side::Buy, 0.0),
            make_record("7203", "2023-05-07", Side::Buy, 0.0),
            make_record("7203", "2023-05-20", Side::Buy, 0.0),
            make_record("7203", "2023-05-08", Side::Sell, 120.0),
        ];
        let matcher = TradeMatcher::new(&bars, &records);

        let buys = matcher.matched_points(Side::Buy);
        let sells = matcher.matched_points(Side::Sell);
        let buy_dates = matcher.trade_dates(Side::Buy);

        for (d, _) in &buys {
            assert!(buy_dates.contains(d));
        }
        assert!(buys.len() + sells.len() <= matcher.trade_count());
    }

    #[test]
    fn pnl_invariant_under_series_truncation() {
        let records = vec![
            make_record("7203", "2023-05-10", Side::Buy, 0.0),
            make_record("7203", "2023-06-10", Side::Sell, 450.0),
            make_record("7203", "2023-07-10", Side::Sell, -120.0),
        ];
        let full: Vec<OhlcvBar> = (1..=12)
            .map(|m| make_bar(&format!("2023-{:02}-15", m), 1000.0))
            .collect();
        let truncated = &full[..2];

        let pnl_full = TradeMatcher::new(&full, &records).total_realized_pnl();
        let pnl_truncated = TradeMatcher::new(truncated, &records).total_realized_pnl();

        assert!((pnl_full - 330.0).abs() < 1e-10);
        assert!((pnl_full - pnl_truncated).abs() < 1e-10);
    }

    #[test]
    fn empty_records_all_outputs_empty() {
        let bars = vec![make_bar("2023-05-09", 1480.0)];
        let matcher = TradeMatcher::new(&bars, &[]);

        assert!(matcher.trade_dates(Side::Buy).is_empty());
        assert!(matcher.matched_points(Side::Sell).is_empty());
        assert!(matcher.total_realized_pnl().abs() < f64::EPSILON);
        assert_eq!(matcher.trade_count(), 0);
    }

    #[test]
    fn side_counts() {
        let bars: Vec<OhlcvBar> = Vec::new();
        let records = vec![
            make_record("7203", "2023-05-10", Side::Buy, 0.0),
            make_record("7203", "2023-05-11", Side::Buy, 0.0),
            make_record("7203", "2023-05-12", Side::Sell, 80.0),
        ];
        let matcher = TradeMatcher::new(&bars, &records);
        assert_eq!(matcher.count(Side::Buy), 2);
        assert_eq!(matcher.count(Side::Sell), 1);
    }
}
