//! CSV file quote adapter.
//!
//! Offline stand-in for the network provider: one `date,open,high,low,
//! close,volume` file per ticker under a base directory. Used for fixtures
//! and tests, and as the `--data-dir` mode of the CLI.

use crate::domain::error::MarketscopeError;
use crate::domain::ohlcv::{normalize_series, OhlcvBar};
use crate::ports::quote_port::{FetchRange, Interval, QuotePort};
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        // Index and FX tickers carry characters that do not belong in
        // file names.
        let name = ticker.replace(['^', '=', '/'], "_");
        self.base_path.join(format!("{name}.csv"))
    }

    fn date_bounds(range: FetchRange) -> (NaiveDate, NaiveDate) {
        match range {
            FetchRange::Dates { start, end } => (start, end),
            FetchRange::Period(period) => {
                let end = chrono::Utc::now().date_naive();
                (end - chrono::Days::new(period.days()), end)
            }
        }
    }

    fn parse_field(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64, MarketscopeError> {
        record
            .get(idx)
            .ok_or_else(|| MarketscopeError::ProviderFormat {
                reason: format!("missing {name} column"),
            })?
            .parse()
            .map_err(|e| MarketscopeError::ProviderFormat {
                reason: format!("invalid {name} value: {e}"),
            })
    }
}

impl QuotePort for CsvQuoteAdapter {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        range: FetchRange,
        _interval: Interval,
    ) -> Result<Vec<OhlcvBar>, MarketscopeError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            // Unknown ticker: empty series, matching the network provider.
            return Ok(Vec::new());
        }

        let (start, end) = Self::date_bounds(range);
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| MarketscopeError::Provider {
            ticker: ticker.to_string(),
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| MarketscopeError::ProviderFormat {
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = record
                .get(0)
                .ok_or_else(|| MarketscopeError::ProviderFormat {
                    reason: "missing date column".into(),
                })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                MarketscopeError::ProviderFormat {
                    reason: format!("invalid date format: {e}"),
                }
            })?;

            if date < start || date > end {
                continue;
            }

            bars.push(OhlcvBar {
                ticker: ticker.to_string(),
                date,
                open: Self::parse_field(&record, 1, "open")?,
                high: Self::parse_field(&record, 2, "high")?,
                low: Self::parse_field(&record, 3, "low")?,
                close: Self::parse_field(&record, 4, "close")?,
                volume: Self::parse_field(&record, 5, "volume")?,
            });
        }

        Ok(normalize_series(bars))
    }
}
