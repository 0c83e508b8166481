//! Exponential Moving Average, pandas `adjust=false` form.
//!
//! k = 2/(span+1), ema[0] = close[0], ema[i] = close[i]*k + ema[i-1]*(1-k).
//! No warmup: every point is valid. This is the recurrence the MACD stack
//! needs; there is deliberately no SMA-seeded variant here.

use crate::domain::indicator::{OverlayKind, OverlayPoint, OverlaySeries, OverlayValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], span: usize) -> OverlaySeries {
    if span == 0 || bars.is_empty() {
        return OverlaySeries::empty(OverlayKind::Ema(span));
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut values = Vec::with_capacity(bars.len());
    let mut ema = bars[0].close;

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            ema = bar.close * k + ema * (1.0 - k);
        }
        values.push(OverlayPoint {
            date: bar.date,
            valid: true,
            value: OverlayValue::Simple(ema),
        });
    }

    OverlaySeries {
        kind: OverlayKind::Ema(span),
        values,
    }
}

/// Same recurrence over a raw value slice, for smoothing a derived line.
pub(crate) fn ema_over_values(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);
    for &v in &values[1..] {
        ema = v * k + ema * (1.0 - k);
        out.push(ema);
    }
    out
}
