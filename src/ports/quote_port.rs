//! Market-data access port trait.

use crate::domain::error::MarketscopeError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::fmt;

/// Lookback periods offered by the dashboard's period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    SixMonths,
    OneYear,
    TwoYears,
}

impl Period {
    pub fn parse(s: &str) -> Option<Period> {
        match s {
            "6mo" => Some(Period::SixMonths),
            "1y" => Some(Period::OneYear),
            "2y" => Some(Period::TwoYears),
            _ => None,
        }
    }

    /// Approximate calendar span, for providers that take explicit dates.
    pub fn days(&self) -> u64 {
        match self {
            Period::SixMonths => 183,
            Period::OneYear => 365,
            Period::TwoYears => 730,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::SixMonths => write!(f, "6mo"),
            Period::OneYear => write!(f, "1y"),
            Period::TwoYears => write!(f, "2y"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRange {
    Period(Period),
    Dates { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
        }
    }
}

pub trait QuotePort {
    /// Fetch an OHLCV series for one ticker. "No data for this ticker or
    /// range" is an empty Ok, not an error; Err is reserved for provider
    /// unavailability and malformed responses.
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        range: FetchRange,
        interval: Interval,
    ) -> Result<Vec<OhlcvBar>, MarketscopeError>;
}
