//! OHLCV bar representation and series normalization.

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct OhlcvBar {
    pub ticker: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// (open + high + low + close) / 4, the Heikin-Ashi close.
    pub fn mean_price(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    /// True when the bar closed at or above its open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Bring a freshly fetched series into canonical form: sorted by date,
/// one bar per calendar date (first wins), and only bars with a finite,
/// positive close. Every quote adapter runs its output through this
/// before the series crosses the port boundary.
pub fn normalize_series(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.retain(|b| b.close.is_finite() && b.close > 0.0);
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    bars
}

/// The series date axis, in order.
pub fn date_axis(bars: &[OhlcvBar]) -> Vec<NaiveDate> {
    bars.iter().map(|b| b.date).collect()
}
