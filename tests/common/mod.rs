#![allow(dead_code)]

use chrono::NaiveDate;
use marketscope::domain::error::MarketscopeError;
pub use marketscope::domain::ohlcv::OhlcvBar;
use marketscope::ports::quote_port::{FetchRange, Interval, QuotePort};
use std::collections::HashMap;

pub struct MockQuotePort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        _range: FetchRange,
        _interval: Interval,
    ) -> Result<Vec<OhlcvBar>, MarketscopeError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(MarketscopeError::Provider {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(ticker: &str, date: NaiveDate, close: f64) -> OhlcvBar {
    OhlcvBar {
        ticker: ticker.to_string(),
        date,
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume: 10_000.0,
    }
}

/// A daily series starting on `start` whose closes follow `f(i)`.
pub fn make_series<F: Fn(usize) -> f64>(
    ticker: &str,
    start: NaiveDate,
    n: usize,
    f: F,
) -> Vec<OhlcvBar> {
    (0..n)
        .map(|i| make_bar(ticker, start + chrono::Days::new(i as u64), f(i)))
        .collect()
}
