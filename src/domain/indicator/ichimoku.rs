//! Ichimoku cloud components.
//!
//! Turn and basic lines are rolling (max(high) + min(low)) / 2 midpoints
//! over 9 and 26 bars. Span 1 is the midpoint of those two lines, span 2
//! the 52-bar midpoint; both spans are plotted `displacement` bars ahead,
//! realized as an index shift within the existing date axis (no dates past
//! the series end are invented). The lagging line is the close shifted
//! back 25 bars.

use crate::domain::indicator::{
    IchimokuLine, OverlayKind, OverlayPoint, OverlaySeries, OverlayValue,
};
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy)]
pub struct IchimokuParams {
    pub turn: usize,
    pub basic: usize,
    pub span_b: usize,
    pub displacement: usize,
    pub lagging: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            turn: 9,
            basic: 26,
            span_b: 52,
            displacement: 26,
            lagging: 25,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IchimokuSeries {
    pub turn: OverlaySeries,
    pub basic: OverlaySeries,
    pub span_a: OverlaySeries,
    pub span_b: OverlaySeries,
    pub lagging: OverlaySeries,
}

/// Rolling (max(high) + min(low)) / 2 over `window` bars; None in warmup.
fn rolling_midpoint(bars: &[OhlcvBar], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(bars.len());
    for i in 0..bars.len() {
        if window == 0 || i + 1 < window {
            out.push(None);
            continue;
        }
        let slice = &bars[i + 1 - window..=i];
        let high = slice.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let low = slice.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
        out.push(Some((high + low) / 2.0));
    }
    out
}

fn to_series(kind: OverlayKind, dates: &[NaiveDate], raw: Vec<Option<f64>>) -> OverlaySeries {
    let values = dates
        .iter()
        .zip(raw)
        .map(|(&date, v)| OverlayPoint {
            date,
            valid: v.is_some(),
            value: OverlayValue::Simple(v.unwrap_or(0.0)),
        })
        .collect();
    OverlaySeries { kind, values }
}

/// Shift values forward along the axis: out[i] = raw[i - offset].
fn shift_forward(raw: &[Option<f64>], offset: usize) -> Vec<Option<f64>> {
    (0..raw.len())
        .map(|i| {
            if i >= offset {
                raw[i - offset]
            } else {
                None
            }
        })
        .collect()
}

pub fn calculate_ichimoku(bars: &[OhlcvBar], params: IchimokuParams) -> IchimokuSeries {
    let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();

    let turn_raw = rolling_midpoint(bars, params.turn);
    let basic_raw = rolling_midpoint(bars, params.basic);

    let span_a_raw: Vec<Option<f64>> = turn_raw
        .iter()
        .zip(basic_raw.iter())
        .map(|(t, b)| match (t, b) {
            (Some(t), Some(b)) => Some((t + b) / 2.0),
            _ => None,
        })
        .collect();
    let span_b_raw = rolling_midpoint(bars, params.span_b);

    let lagging_raw: Vec<Option<f64>> = (0..bars.len())
        .map(|i| bars.get(i + params.lagging).map(|b| b.close))
        .collect();

    IchimokuSeries {
        turn: to_series(OverlayKind::Ichimoku(IchimokuLine::Turn), &dates, turn_raw),
        basic: to_series(OverlayKind::Ichimoku(IchimokuLine::Basic), &dates, basic_raw),
        span_a: to_series(
            OverlayKind::Ichimoku(IchimokuLine::SpanA),
            &dates,
            shift_forward(&span_a_raw, params.displacement),
        ),
        span_b: to_series(
            OverlayKind::Ichimoku(IchimokuLine::SpanB),
            &dates,
            shift_forward(&span_b_raw, params.displacement),
        ),
        lagging: to_series(
            OverlayKind::Ichimoku(IchimokuLine::Lagging),
            &dates,
            lagging_raw,
        ),
    }
}
