//! MACD (Moving Average Convergence Divergence).
//!
//! Line = EMA(fast) - EMA(slow), Signal = EMA(signal) of the line,
//! Histogram = Line - Signal. All EMAs use the adjust=false recurrence
//! seeded from the first observation, so every point is defined.
//!
//! Defaults: fast=12, slow=26, signal=9.

use crate::domain::indicator::ema::ema_over_values;
use crate::domain::indicator::{
    calculate_ema, OverlayKind, OverlayPoint, OverlaySeries, OverlayValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> OverlaySeries {
    let kind = OverlayKind::Macd {
        fast,
        slow,
        signal: signal_span,
    };
    if bars.is_empty() || fast == 0 || slow == 0 || signal_span == 0 {
        return OverlaySeries::empty(kind);
    }

    let ema_fast = calculate_ema(bars, fast);
    let ema_slow = calculate_ema(bars, slow);

    let macd_line: Vec<f64> = ema_fast
        .values
        .iter()
        .zip(ema_slow.values.iter())
        .map(|(f, s)| f.value.as_simple() - s.value.as_simple())
        .collect();

    let signal_line = ema_over_values(&macd_line, signal_span);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let line = macd_line[i];
            let signal = signal_line[i];
            OverlayPoint {
                date: bar.date,
                valid: true,
                value: OverlayValue::Macd {
                    line,
                    signal,
                    histogram: line - signal,
                },
            }
        })
        .collect();

    OverlaySeries { kind, values }
}

pub fn calculate_macd_default(bars: &[OhlcvBar]) -> OverlaySeries {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
