//! Static SVG chart renderer.
//!
//! A deliberately small renderer: enough to eyeball any ChartSpec without
//! a browser stack. Lines become polylines, candles become wick+body,
//! bars and markers map directly; reference lines span the plot width.

use crate::domain::chart::{ChartSpec, SeriesData, SeriesStyle};
use crate::domain::error::MarketscopeError;
use crate::ports::chart_port::ChartPort;
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const WIDTH: f64 = 900.0;
const PADDING: f64 = 40.0;

pub struct SvgChartAdapter;

struct PlotFrame {
    min_date: NaiveDate,
    max_date: NaiveDate,
    min_y: f64,
    max_y: f64,
    height: f64,
}

impl PlotFrame {
    fn x(&self, date: NaiveDate) -> f64 {
        let span = (self.max_date - self.min_date).num_days().max(1) as f64;
        let offset = (date - self.min_date).num_days() as f64;
        PADDING + offset / span * (WIDTH - 2.0 * PADDING)
    }

    fn y(&self, value: f64) -> f64 {
        let range = self.max_y - self.min_y;
        let scale = if range > 0.0 {
            (self.height - 2.0 * PADDING) / range
        } else {
            1.0
        };
        self.height - PADDING - (value - self.min_y) * scale
    }
}

fn series_bounds(spec: &ChartSpec) -> Option<PlotFrame> {
    let mut min_date = NaiveDate::MAX;
    let mut max_date = NaiveDate::MIN;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let mut seen = false;
    for series in &spec.series {
        match &series.data {
            SeriesData::Points { points } => {
                for &(date, value) in points {
                    seen = true;
                    min_date = min_date.min(date);
                    max_date = max_date.max(date);
                    min_y = min_y.min(value);
                    max_y = max_y.max(value);
                }
            }
            SeriesData::Candles { candles } => {
                for c in candles {
                    seen = true;
                    min_date = min_date.min(c.date);
                    max_date = max_date.max(c.date);
                    min_y = min_y.min(c.low);
                    max_y = max_y.max(c.high);
                }
            }
            SeriesData::Bars { bars } => {
                for &(date, value, _) in bars {
                    seen = true;
                    min_date = min_date.min(date);
                    max_date = max_date.max(date);
                    min_y = min_y.min(value.min(0.0));
                    max_y = max_y.max(value.max(0.0));
                }
            }
        }
    }
    if !seen {
        return None;
    }

    if let Some((lo, hi)) = spec.y_range {
        min_y = lo;
        max_y = hi;
    }
    for line in &spec.ref_lines {
        min_y = min_y.min(line.y);
        max_y = max_y.max(line.y);
    }

    Some(PlotFrame {
        min_date,
        max_date,
        min_y,
        max_y,
        height: spec.height as f64,
    })
}

fn render(spec: &ChartSpec) -> String {
    let mut svg = String::new();
    let height = spec.height as f64;
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="20" text-anchor="middle" font-family="sans-serif">{}</text>"#,
        WIDTH / 2.0,
        spec.title
    );

    let Some(frame) = series_bounds(spec) else {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif">no data</text>"#,
            WIDTH / 2.0,
            height / 2.0
        );
        svg.push_str("</svg>\n");
        return svg;
    };

    for line in &spec.ref_lines {
        let y = frame.y(line.y);
        let dash = if line.dash { r#" stroke-dasharray="6 4""# } else { "" };
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}"{dash}/>"#,
            PADDING,
            WIDTH - PADDING,
            line.color,
        );
    }

    for series in &spec.series {
        match (&series.style, &series.data) {
            (SeriesStyle::Line { color, dash, .. }, SeriesData::Points { points }) => {
                if points.is_empty() {
                    continue;
                }
                let pts: Vec<String> = points
                    .iter()
                    .map(|&(d, v)| format!("{:.1},{:.1}", frame.x(d), frame.y(v)))
                    .collect();
                let dash = if *dash { r#" stroke-dasharray="6 4""# } else { "" };
                let _ = writeln!(
                    svg,
                    r#"<polyline fill="none" stroke="{}"{dash} points="{}"/>"#,
                    color,
                    pts.join(" ")
                );
            }
            (SeriesStyle::Markers { color, size }, SeriesData::Points { points }) => {
                for &(d, v) in points {
                    let _ = writeln!(
                        svg,
                        r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                        frame.x(d),
                        frame.y(v),
                        *size as f64 / 2.0,
                        color
                    );
                }
            }
            (
                SeriesStyle::Candlestick {
                    up_color,
                    down_color,
                },
                SeriesData::Candles { candles },
            ) => {
                for c in candles {
                    let color = if c.close >= c.open { up_color } else { down_color };
                    let x = frame.x(c.date);
                    let (top, bottom) = (frame.y(c.open.max(c.close)), frame.y(c.open.min(c.close)));
                    let _ = writeln!(
                        svg,
                        r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{color}"/>"#,
                        frame.y(c.high),
                        frame.y(c.low),
                    );
                    let _ = writeln!(
                        svg,
                        r#"<rect x="{:.1}" y="{top:.1}" width="3" height="{:.1}" fill="{color}"/>"#,
                        x - 1.5,
                        (bottom - top).max(0.5),
                    );
                }
            }
            (
                SeriesStyle::Bars {
                    up_color,
                    down_color,
                },
                SeriesData::Bars { bars },
            ) => {
                let base = frame.y(frame.min_y.max(0.0));
                for &(d, v, up) in bars {
                    let color = if up { up_color } else { down_color };
                    let y = frame.y(v);
                    let (top, h) = if y < base { (y, base - y) } else { (base, y - base) };
                    let _ = writeln!(
                        svg,
                        r#"<rect x="{:.1}" y="{top:.1}" width="2" height="{:.1}" fill="{color}"/>"#,
                        frame.x(d) - 1.0,
                        h.max(0.5),
                    );
                }
            }
            // Style/data combinations the composer never emits.
            _ => {}
        }
    }

    svg.push_str("</svg>\n");
    svg
}

impl ChartPort for SvgChartAdapter {
    fn write_chart(&self, spec: &ChartSpec, path: &Path) -> Result<(), MarketscopeError> {
        let svg = render(spec);
        fs::write(path, svg).map_err(|e| MarketscopeError::ChartOutput {
            reason: format!("failed to write {}: {}", path.display(), e),
        })
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}
