//! Deviation of the latest close from its moving average, in percent.
//!
//! (close - SMA(window)) / SMA(window) * 100 at the last date only. The
//! dashboard reads this against rough ±15% buy/sell guides.

use crate::domain::indicator::calculate_sma;
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_WINDOW: usize = 25;

/// None when the series is shorter than the window or the moving average
/// is zero or non-finite (a division there would poison the readout).
pub fn latest_ma_deviation(bars: &[OhlcvBar], window: usize) -> Option<f64> {
    let sma = calculate_sma(bars, window).latest()?;
    if sma == 0.0 || !sma.is_finite() {
        return None;
    }
    let close = bars.last()?.close;
    Some((close - sma) / sma * 100.0)
}
