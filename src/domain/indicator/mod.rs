//! Technical indicator overlays.
//!
//! Every indicator consumes a borrowed OHLCV series and produces an owned
//! [`OverlaySeries`] aligned to the input date axis. Points inside a warmup
//! window carry `valid: false` so the chart layer can omit them. An empty
//! input series always yields an empty overlay, never an error.

pub mod bollinger;
pub mod deviation;
pub mod ema;
pub mod heikin_ashi;
pub mod ichimoku;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::calculate_bollinger;
pub use deviation::latest_ma_deviation;
pub use ema::calculate_ema;
pub use heikin_ashi::calculate_heikin_ashi;
pub use ichimoku::{calculate_ichimoku, IchimokuParams, IchimokuSeries};
pub use macd::{calculate_macd, calculate_macd_default};
pub use rsi::{calculate_rsi, calculate_rsi_default};
pub use sma::calculate_sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct OverlayPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: OverlayValue,
}

#[derive(Debug, Clone)]
pub enum OverlayValue {
    Simple(f64),
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Candle {
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    },
}

impl OverlayValue {
    /// The scalar payload of a `Simple` point, 0.0 otherwise.
    pub fn as_simple(&self) -> f64 {
        match self {
            OverlayValue::Simple(v) => *v,
            _ => 0.0,
        }
    }
}

/// Which Ichimoku line an overlay carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IchimokuLine {
    Turn,
    Basic,
    SpanA,
    SpanB,
    Lagging,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    HeikinAshi,
    Ichimoku(IchimokuLine),
}

#[derive(Debug, Clone)]
pub struct OverlaySeries {
    pub kind: OverlayKind,
    pub values: Vec<OverlayPoint>,
}

impl OverlaySeries {
    pub fn empty(kind: OverlayKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    /// (date, value) pairs for the valid `Simple` points only.
    pub fn valid_points(&self) -> Vec<(NaiveDate, f64)> {
        self.values
            .iter()
            .filter(|p| p.valid)
            .map(|p| (p.date, p.value.as_simple()))
            .collect()
    }

    /// Value of the last valid `Simple` point, if any.
    pub fn latest(&self) -> Option<f64> {
        self.values
            .iter()
            .rev()
            .find(|p| p.valid)
            .map(|p| p.value.as_simple())
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayKind::Sma(window) => write!(f, "MA{}", window),
            OverlayKind::Ema(span) => write!(f, "EMA({})", span),
            OverlayKind::Rsi(window) => write!(f, "RSI({})", window),
            OverlayKind::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            OverlayKind::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BB({},{})", period, mult)
            }
            OverlayKind::HeikinAshi => write!(f, "HEIKIN-ASHI"),
            OverlayKind::Ichimoku(line) => match line {
                IchimokuLine::Turn => write!(f, "TURN"),
                IchimokuLine::Basic => write!(f, "BASIC"),
                IchimokuLine::SpanA => write!(f, "SPAN1"),
                IchimokuLine::SpanB => write!(f, "SPAN2"),
                IchimokuLine::Lagging => write!(f, "LAGGING"),
            },
        }
    }
}
