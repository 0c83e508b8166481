//! Heikin-Ashi candle transform.
//!
//! ha_close[i] = (open + high + low + close)[i] / 4
//! ha_open[0]  = (open[0] + close[0]) / 2
//! ha_open[i]  = (ha_open[i-1] + ha_close[i-1]) / 2
//! ha_high[i]  = max(high[i], ha_open[i], ha_close[i])
//! ha_low[i]   = min(low[i],  ha_open[i], ha_close[i])
//!
//! The open recurrence depends on the previous output, so this is an
//! explicit left-to-right scan, not per-window arithmetic.

use crate::domain::indicator::{OverlayKind, OverlayPoint, OverlaySeries, OverlayValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_heikin_ashi(bars: &[OhlcvBar]) -> OverlaySeries {
    if bars.is_empty() {
        return OverlaySeries::empty(OverlayKind::HeikinAshi);
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut prev_open = (bars[0].open + bars[0].close) / 2.0;
    let mut prev_close = bars[0].mean_price();

    for (i, bar) in bars.iter().enumerate() {
        let ha_close = bar.mean_price();
        let ha_open = if i == 0 {
            prev_open
        } else {
            (prev_open + prev_close) / 2.0
        };
        let ha_high = bar.high.max(ha_open).max(ha_close);
        let ha_low = bar.low.min(ha_open).min(ha_close);

        values.push(OverlayPoint {
            date: bar.date,
            valid: true,
            value: OverlayValue::Candle {
                open: ha_open,
                high: ha_high,
                low: ha_low,
                close: ha_close,
            },
        });

        prev_open = ha_open;
        prev_close = ha_close;
    }

    OverlaySeries {
        kind: OverlayKind::HeikinAshi,
        values,
    }
}
