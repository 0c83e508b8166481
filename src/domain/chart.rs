//! Chart specification assembly.
//!
//! A `ChartSpec` is the renderable description handed to the presentation
//! layer: named, styled, date-aligned series plus horizontal reference
//! lines. No numeric work happens here beyond dropping warmup points; the
//! builders just collapse the dashboard's page variants into parameterized
//! assembly, with styling as data.

use crate::domain::indicator::{
    calculate_bollinger, calculate_heikin_ashi, calculate_ichimoku, calculate_macd_default,
    calculate_rsi_default, calculate_sma, IchimokuParams, OverlaySeries, OverlayValue,
};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::trades::{Side, TradeMatcher};
use chrono::NaiveDate;
use serde::Serialize;

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULT_X100: u32 = 200;

#[derive(Debug, Clone, Serialize)]
pub struct CandlePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesData {
    /// A date-aligned line or marker series.
    Points { points: Vec<(NaiveDate, f64)> },
    /// OHLC candles.
    Candles { candles: Vec<CandlePoint> },
    /// Vertical bars with a per-bar up/down flag for coloring.
    Bars { bars: Vec<(NaiveDate, f64, bool)> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum SeriesStyle {
    Line {
        color: String,
        dash: bool,
        /// Fill against the previous series (the Ichimoku cloud pair).
        fill_to_previous: bool,
    },
    Candlestick {
        up_color: String,
        down_color: String,
    },
    Bars {
        up_color: String,
        down_color: String,
    },
    Markers {
        color: String,
        size: u32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub name: String,
    #[serde(flatten)]
    pub style: SeriesStyle,
    #[serde(flatten)]
    pub data: SeriesData,
}

/// A horizontal threshold line (RSI 30/70, VIX 20/30).
#[derive(Debug, Clone, Serialize)]
pub struct RefLine {
    pub y: f64,
    pub color: String,
    pub dash: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub height: u32,
    pub y_range: Option<(f64, f64)>,
    pub series: Vec<ChartSeries>,
    pub ref_lines: Vec<RefLine>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, height: u32) -> Self {
        Self {
            title: title.into(),
            height,
            y_range: None,
            series: Vec::new(),
            ref_lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| match &s.data {
            SeriesData::Points { points } => points.is_empty(),
            SeriesData::Candles { candles } => candles.is_empty(),
            SeriesData::Bars { bars } => bars.is_empty(),
        })
    }

    fn push_line(&mut self, name: impl Into<String>, color: &str, dash: bool, series: &OverlaySeries) {
        self.series.push(ChartSeries {
            name: name.into(),
            style: SeriesStyle::Line {
                color: color.into(),
                dash,
                fill_to_previous: false,
            },
            data: SeriesData::Points {
                points: series.valid_points(),
            },
        });
    }

    fn push_sma(&mut self, bars: &[OhlcvBar], window: usize, color: &str) {
        let sma = calculate_sma(bars, window);
        self.push_line(sma.kind.to_string(), color, false, &sma);
    }

    /// Upper and lower Bollinger band lines (the middle is not drawn on
    /// the dashboard).
    fn push_bollinger(&mut self, bars: &[OhlcvBar], color: &str) {
        let bb = calculate_bollinger(bars, BOLLINGER_PERIOD, BOLLINGER_MULT_X100);
        let band = |pick: fn(&OverlayValue) -> f64| -> Vec<(NaiveDate, f64)> {
            bb.values
                .iter()
                .filter(|p| p.valid)
                .map(|p| (p.date, pick(&p.value)))
                .collect()
        };
        let upper = band(|v| match v {
            OverlayValue::Bollinger { upper, .. } => *upper,
            _ => 0.0,
        });
        let lower = band(|v| match v {
            OverlayValue::Bollinger { lower, .. } => *lower,
            _ => 0.0,
        });

        for (name, points) in [("Upper BB", upper), ("Lower BB", lower)] {
            self.series.push(ChartSeries {
                name: name.into(),
                style: SeriesStyle::Line {
                    color: color.into(),
                    dash: true,
                    fill_to_previous: false,
                },
                data: SeriesData::Points { points },
            });
        }
    }

    fn push_candles(&mut self, name: &str, up: &str, down: &str, candles: Vec<CandlePoint>) {
        self.series.push(ChartSeries {
            name: name.into(),
            style: SeriesStyle::Candlestick {
                up_color: up.into(),
                down_color: down.into(),
            },
            data: SeriesData::Candles { candles },
        });
    }
}

fn raw_candles(bars: &[OhlcvBar]) -> Vec<CandlePoint> {
    bars.iter()
        .map(|b| CandlePoint {
            date: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
        })
        .collect()
}

/// Overview line chart: close plus MA25/50/75 and Bollinger bands. The
/// market page draws every catalog ticker this way.
pub fn overview_chart(title: &str, bars: &[OhlcvBar]) -> ChartSpec {
    let mut spec = ChartSpec::new(title, 450);
    spec.series.push(ChartSeries {
        name: "original".into(),
        style: SeriesStyle::Line {
            color: "royalblue".into(),
            dash: false,
            fill_to_previous: false,
        },
        data: SeriesData::Points {
            points: bars.iter().map(|b| (b.date, b.close)).collect(),
        },
    });
    spec.push_sma(bars, 25, "lightcoral");
    spec.push_sma(bars, 50, "lightblue");
    spec.push_sma(bars, 75, "lightsalmon");
    spec.push_bollinger(bars, "palevioletred");
    spec
}

/// Overview chart plus horizontal reference bands (the VIX 20/30 guides).
pub fn banded_overview_chart(title: &str, bars: &[OhlcvBar], bands: &[(f64, &str)]) -> ChartSpec {
    let mut spec = overview_chart(title, bars);
    for &(y, color) in bands {
        spec.ref_lines.push(RefLine {
            y,
            color: color.into(),
            dash: true,
        });
    }
    spec
}

/// Candlestick chart with MA5/25/50/75 and Bollinger bands, the main panel
/// of the per-ticker page.
pub fn candlestick_chart(title: &str, bars: &[OhlcvBar]) -> ChartSpec {
    let mut spec = ChartSpec::new(title, 600);
    spec.push_candles("original", "#00FF00", "#FF0000", raw_candles(bars));
    spec.push_sma(bars, 5, "#F99C30");
    spec.push_sma(bars, 25, "#52B8FF");
    spec.push_sma(bars, 50, "#E17EC0");
    spec.push_sma(bars, 75, "#3E77C4");
    spec.push_bollinger(bars, "#BDBDBD");
    spec
}

/// Heikin-Ashi candles with MA50 and Bollinger bands over the raw closes.
pub fn heikin_ashi_chart(bars: &[OhlcvBar]) -> ChartSpec {
    let ha = calculate_heikin_ashi(bars);
    let candles = ha
        .values
        .iter()
        .filter(|p| p.valid)
        .map(|p| match p.value {
            OverlayValue::Candle {
                open,
                high,
                low,
                close,
            } => CandlePoint {
                date: p.date,
                open,
                high,
                low,
                close,
            },
            _ => unreachable!("heikin-ashi emits candles"),
        })
        .collect();

    let mut spec = ChartSpec::new("Heikin-Ashi", 500);
    spec.push_candles("original", "#00FF00", "#FF0000", candles);
    spec.push_sma(bars, 50, "#E17EC0");
    spec.push_bollinger(bars, "palevioletred");
    spec
}

/// Ichimoku chart: candles, turn/basic/lagging lines and the cloud pair
/// (span 2 filled against span 1).
pub fn ichimoku_chart(bars: &[OhlcvBar]) -> ChartSpec {
    let ichimoku = calculate_ichimoku(bars, IchimokuParams::default());

    let mut spec = ChartSpec::new("Ichimoku", 500);
    spec.push_candles("price", "#00FF00", "#FF0000", raw_candles(bars));
    spec.push_line("turn", "lightsalmon", false, &ichimoku.turn);
    spec.push_line("basic", "lightblue", false, &ichimoku.basic);
    spec.push_line("lagging", "lightgreen", false, &ichimoku.lagging);
    spec.push_line("span1", "rgba(128, 128, 128, 0.5)", false, &ichimoku.span_a);
    spec.series.push(ChartSeries {
        name: "span2".into(),
        style: SeriesStyle::Line {
            color: "rgba(128, 128, 128, 0.5)".into(),
            dash: false,
            fill_to_previous: true,
        },
        data: SeriesData::Points {
            points: ichimoku.span_b.valid_points(),
        },
    });
    spec
}

/// RSI panel with the 30/70 guides, clamped to a [0, 100] axis.
pub fn rsi_panel(bars: &[OhlcvBar]) -> ChartSpec {
    let rsi = calculate_rsi_default(bars);
    let mut spec = ChartSpec::new("RSI", 300);
    spec.y_range = Some((0.0, 100.0));
    spec.push_line("RSI", "rosybrown", false, &rsi);
    spec.ref_lines.push(RefLine {
        y: 70.0,
        color: "red".into(),
        dash: true,
    });
    spec.ref_lines.push(RefLine {
        y: 30.0,
        color: "green".into(),
        dash: true,
    });
    spec
}

/// MACD panel: histogram bars plus the MACD and signal lines.
pub fn macd_panel(bars: &[OhlcvBar]) -> ChartSpec {
    let macd = calculate_macd_default(bars);

    let mut line = Vec::new();
    let mut signal = Vec::new();
    let mut histogram = Vec::new();
    for p in macd.values.iter().filter(|p| p.valid) {
        if let OverlayValue::Macd {
            line: l,
            signal: s,
            histogram: h,
        } = p.value
        {
            line.push((p.date, l));
            signal.push((p.date, s));
            histogram.push((p.date, h, h >= 0.0));
        }
    }

    let mut spec = ChartSpec::new("MACD", 300);
    spec.series.push(ChartSeries {
        name: "histogram".into(),
        style: SeriesStyle::Bars {
            up_color: "gray".into(),
            down_color: "gray".into(),
        },
        data: SeriesData::Bars { bars: histogram },
    });
    spec.series.push(ChartSeries {
        name: "MACD".into(),
        style: SeriesStyle::Line {
            color: "#00E5FF".into(),
            dash: false,
            fill_to_previous: false,
        },
        data: SeriesData::Points { points: line },
    });
    spec.series.push(ChartSeries {
        name: "Signal".into(),
        style: SeriesStyle::Line {
            color: "tomato".into(),
            dash: false,
            fill_to_previous: false,
        },
        data: SeriesData::Points { points: signal },
    });
    spec
}

/// Volume bars, green for up bars and red for down bars.
pub fn volume_panel(bars: &[OhlcvBar]) -> ChartSpec {
    let mut spec = ChartSpec::new("Volume", 250);
    spec.series.push(ChartSeries {
        name: "volume".into(),
        style: SeriesStyle::Bars {
            up_color: "#00FF00".into(),
            down_color: "#FF0000".into(),
        },
        data: SeriesData::Bars {
            bars: bars.iter().map(|b| (b.date, b.volume, b.is_up())).collect(),
        },
    });
    spec
}

/// Overlay matched buy/sell points as markers on an existing chart.
pub fn add_trade_markers(spec: &mut ChartSpec, matcher: &TradeMatcher<'_>) {
    for (name, side, color) in [
        ("Buy Dates", Side::Buy, "forestgreen"),
        ("Sell Dates", Side::Sell, "crimson"),
    ] {
        spec.series.push(ChartSeries {
            name: name.into(),
            style: SeriesStyle::Markers {
                color: color.into(),
                size: 10,
            },
            data: SeriesData::Points {
                points: matcher.matched_points(side),
            },
        });
    }
}
