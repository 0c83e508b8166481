//! RSI (Relative Strength Index).
//!
//! Wilder smoothing for average gain/loss:
//! - First average: simple mean over the first n price changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)).
//! Zero-division policy: avg_loss == 0 with any gain → 100; a fully flat
//! window (no gains, no losses) → 50, the neutral reading. Output is
//! within [0, 100] by construction.
//!
//! Warmup: first n points are invalid (n changes are needed for the seed).

use crate::domain::indicator::{OverlayKind, OverlayPoint, OverlaySeries, OverlayValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_WINDOW: usize = 14;

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 { 50.0 } else { 100.0 }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

pub fn calculate_rsi(bars: &[OhlcvBar], window: usize) -> OverlaySeries {
    if window == 0 || bars.len() < 2 {
        let values = bars
            .iter()
            .map(|b| OverlayPoint {
                date: b.date,
                valid: false,
                value: OverlayValue::Simple(0.0),
            })
            .collect();
        return OverlaySeries {
            kind: OverlayKind::Rsi(window),
            values,
        };
    }

    let mut gains = Vec::with_capacity(bars.len() - 1);
    let mut losses = Vec::with_capacity(bars.len() - 1);
    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut values = Vec::with_capacity(bars.len());
    values.push(OverlayPoint {
        date: bars[0].date,
        valid: false,
        value: OverlayValue::Simple(0.0),
    });

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, bar) in bars.iter().enumerate().skip(1) {
        let change_idx = i - 1;

        if change_idx < window - 1 {
            values.push(OverlayPoint {
                date: bar.date,
                valid: false,
                value: OverlayValue::Simple(0.0),
            });
            continue;
        }

        if change_idx == window - 1 {
            avg_gain = gains[..window].iter().sum::<f64>() / window as f64;
            avg_loss = losses[..window].iter().sum::<f64>() / window as f64;
        } else {
            avg_gain = (avg_gain * (window - 1) as f64 + gains[change_idx]) / window as f64;
            avg_loss = (avg_loss * (window - 1) as f64 + losses[change_idx]) / window as f64;
        }

        values.push(OverlayPoint {
            date: bar.date,
            valid: true,
            value: OverlayValue::Simple(rsi_from_averages(avg_gain, avg_loss)),
        });
    }

    OverlaySeries {
        kind: OverlayKind::Rsi(window),
        values,
    }
}

pub fn calculate_rsi_default(bars: &[OhlcvBar]) -> OverlaySeries {
    calculate_rsi(bars, DEFAULT_WINDOW)
}
