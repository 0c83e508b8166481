//! Bollinger Bands.
//!
//! Middle = SMA(period), bands at ±mult × population standard deviation
//! (divides by N, not N-1). Defaults: period=20, mult=2.0.
//! Warmup: first (period-1) points are invalid.

use crate::domain::indicator::{OverlayKind, OverlayPoint, OverlaySeries, OverlayValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> OverlaySeries {
    let kind = OverlayKind::Bollinger {
        period,
        stddev_mult_x100,
    };
    if period == 0 {
        return OverlaySeries::empty(kind);
    }

    let mult = stddev_mult_x100 as f64 / 100.0;
    let warmup = period - 1;
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let valid = i >= warmup;
        let (upper, middle, lower) = if valid {
            let window = &bars[i + 1 - period..=i];
            let middle: f64 = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
            let variance: f64 = window
                .iter()
                .map(|b| {
                    let diff = b.close - middle;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let stddev = variance.sqrt();
            (middle + mult * stddev, middle, middle - mult * stddev)
        } else {
            (0.0, 0.0, 0.0)
        };

        values.push(OverlayPoint {
            date: bars[i].date,
            valid,
            value: OverlayValue::Bollinger {
                upper,
                middle,
                lower,
            },
        });
    }

    OverlaySeries { kind, values }
}

pub fn calculate_bollinger_default(bars: &[OhlcvBar]) -> OverlaySeries {
    calculate_bollinger(bars, DEFAULT_PERIOD, DEFAULT_MULT_X100)
}
