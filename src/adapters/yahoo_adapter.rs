//! Yahoo Finance quote adapter.
//!
//! Fetches daily bars from the v8 chart API. Yahoo has no official API and
//! the response shape changes without notice; parse failures surface as
//! `ProviderFormat` errors rather than panics. An unknown ticker or a range
//! with no bars is an empty series, not an error.

use crate::domain::error::MarketscopeError;
use crate::domain::ohlcv::{normalize_series, OhlcvBar};
use crate::ports::quote_port::{FetchRange, Interval, QuotePort};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooAdapter {
    pub fn new() -> Result<Self, MarketscopeError> {
        Self::with_base_url("https://query2.finance.yahoo.com")
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, MarketscopeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| MarketscopeError::Provider {
                ticker: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn date_bounds(range: FetchRange) -> (NaiveDate, NaiveDate) {
        match range {
            FetchRange::Dates { start, end } => (start, end),
            FetchRange::Period(period) => {
                let end = chrono::Utc::now().date_naive();
                let start = end - chrono::Days::new(period.days());
                (start, end)
            }
        }
    }

    fn chart_url(&self, ticker: &str, range: FetchRange, interval: Interval) -> String {
        let (start, end) = Self::date_bounds(range);
        let start_ts = start.and_hms_opt(0, 0, 0).map(|t| t.and_utc().timestamp());
        let end_ts = end.and_hms_opt(23, 59, 59).map(|t| t.and_utc().timestamp());
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval={}",
            self.base_url,
            ticker,
            start_ts.unwrap_or(0),
            end_ts.unwrap_or(0),
            interval.as_str(),
        )
    }

    fn parse_response(
        ticker: &str,
        resp: ChartResponse,
    ) -> Result<Vec<OhlcvBar>, MarketscopeError> {
        let result = match (resp.chart.result, resp.chart.error) {
            (Some(result), _) => result,
            // "Not Found" means the ticker has no data, not that the
            // provider is down.
            (None, Some(err)) if err.code == "Not Found" => {
                debug!("{ticker}: no data ({})", err.description);
                return Ok(Vec::new());
            }
            (None, Some(err)) => {
                return Err(MarketscopeError::ProviderFormat {
                    reason: format!("{}: {}", err.code, err.description),
                });
            }
            (None, None) => {
                return Err(MarketscopeError::ProviderFormat {
                    reason: "empty result with no error".into(),
                });
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };

        let Some(timestamps) = data.timestamp else {
            // A valid ticker with zero bars in range omits timestamps.
            return Ok(Vec::new());
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| MarketscopeError::ProviderFormat {
                reason: "no quote data".into(),
            })?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| MarketscopeError::ProviderFormat {
                    reason: format!("invalid timestamp: {ts}"),
                })?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Holidays come back as all-null rows.
            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
                continue;
            };

            bars.push(OhlcvBar {
                ticker: ticker.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume: volume.unwrap_or(0) as f64,
            });
        }

        Ok(normalize_series(bars))
    }

    fn get_with_retry(&self, ticker: &str, url: &str) -> Result<ChartResponse, MarketscopeError> {
        let mut last_err = None;
        // One bounded retry on transport errors; no backoff policy beyond
        // a short pause.
        for attempt in 0..2 {
            if attempt > 0 {
                warn!("{ticker}: retrying fetch after transport error");
                std::thread::sleep(Duration::from_millis(500));
            }
            match self.client.get(url).send() {
                Ok(resp) => {
                    let resp =
                        resp.error_for_status()
                            .map_err(|e| MarketscopeError::Provider {
                                ticker: ticker.to_string(),
                                reason: e.to_string(),
                            })?;
                    return resp
                        .json::<ChartResponse>()
                        .map_err(|e| MarketscopeError::ProviderFormat {
                            reason: e.to_string(),
                        });
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(MarketscopeError::Provider {
            ticker: ticker.to_string(),
            reason: last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown transport error".into()),
        })
    }
}

impl QuotePort for YahooAdapter {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        range: FetchRange,
        interval: Interval,
    ) -> Result<Vec<OhlcvBar>, MarketscopeError> {
        let url = self.chart_url(ticker, range, interval);
        debug!("fetching {ticker}: {url}");
        let resp = self.get_with_retry(ticker, &url)?;
        let bars = Self::parse_response(ticker, resp)?;
        debug!("{ticker}: {} bars", bars.len());
        Ok(bars)
    }
}
