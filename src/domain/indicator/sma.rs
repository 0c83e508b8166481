//! Simple Moving Average.
//!
//! Value at index i = mean of the trailing `window` closes ending at i.
//! Warmup: first (window-1) points are invalid.

use crate::domain::indicator::{OverlayKind, OverlayPoint, OverlaySeries, OverlayValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], window: usize) -> OverlaySeries {
    if window == 0 {
        return OverlaySeries::empty(OverlayKind::Sma(window));
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= window {
            sum -= bars[i - window].close;
        }

        let valid = i >= window - 1;
        let value = if valid { sum / window as f64 } else { 0.0 };
        values.push(OverlayPoint {
            date: bar.date,
            valid,
            value: OverlayValue::Simple(value),
        });
    }

    OverlaySeries {
        kind: OverlayKind::Sma(window),
        values,
    }
}
