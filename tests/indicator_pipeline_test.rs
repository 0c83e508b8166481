mod common;

use approx::assert_relative_eq;
use common::*;
use marketscope::domain::chart::{macd_panel, overview_chart, rsi_panel};
use marketscope::domain::indicator::{
    calculate_bollinger, calculate_heikin_ashi, calculate_ichimoku, calculate_macd_default,
    calculate_rsi_default, calculate_sma, IchimokuParams, OverlayValue,
};
use marketscope::ports::quote_port::{FetchRange, Interval, Period, QuotePort};
use proptest::prelude::*;

#[test]
fn sma_last_point_is_mean_of_tail_window() {
    let closes = [
        10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0, 18.0, 17.0, 19.0, 20.0, 21.0, 19.0, 22.0, 24.0,
        23.0, 25.0, 27.0, 26.0, 28.0, 30.0, 29.0, 31.0, 33.0, 32.0, 34.0, 36.0, 35.0, 37.0, 39.0,
    ];
    let bars = make_series("^GSPC", date(2024, 1, 1), closes.len(), |i| closes[i]);

    let sma = calculate_sma(&bars, 25);
    let expected: f64 = closes[closes.len() - 25..].iter().sum::<f64>() / 25.0;

    let last = sma.values.last().unwrap();
    assert!(last.valid);
    assert_relative_eq!(last.value.as_simple(), expected, epsilon = 1e-10);
    assert_eq!(sma.valid_points().len(), closes.len() - 25 + 1);
}

#[test]
fn flat_series_collapses_bollinger_and_centers_rsi() {
    let bars = make_series("FLAT", date(2024, 1, 1), 40, |_| 100.0);

    let bb = calculate_bollinger(&bars, 20, 200);
    for point in bb.values.iter().filter(|p| p.valid) {
        match point.value {
            OverlayValue::Bollinger {
                upper,
                middle,
                lower,
            } => {
                assert_relative_eq!(upper, 100.0, epsilon = 1e-10);
                assert_relative_eq!(middle, 100.0, epsilon = 1e-10);
                assert_relative_eq!(lower, 100.0, epsilon = 1e-10);
            }
            _ => panic!("expected bollinger point"),
        }
    }

    let rsi = calculate_rsi_default(&bars);
    assert_eq!(rsi.latest(), Some(50.0));
}

#[test]
fn empty_input_yields_empty_overlays_everywhere() {
    let bars: Vec<OhlcvBar> = Vec::new();

    assert!(calculate_sma(&bars, 25).values.is_empty());
    assert!(calculate_bollinger(&bars, 20, 200).values.is_empty());
    assert!(calculate_rsi_default(&bars).values.is_empty());
    assert!(calculate_macd_default(&bars).values.is_empty());
    assert!(calculate_heikin_ashi(&bars).values.is_empty());

    let ichimoku = calculate_ichimoku(&bars, IchimokuParams::default());
    assert!(ichimoku.turn.values.is_empty());
    assert!(ichimoku.span_a.values.is_empty());
    assert!(ichimoku.lagging.values.is_empty());

    // Chart builders tolerate the same degenerate input.
    assert!(overview_chart("empty", &bars).is_empty());
    let _ = rsi_panel(&bars);
    let _ = macd_panel(&bars);
}

#[test]
fn macd_histogram_is_line_minus_signal() {
    let bars = make_series("^N225", date(2024, 1, 1), 60, |i| {
        100.0 + (i as f64 * 0.7).sin() * 10.0 + i as f64 * 0.3
    });

    let macd = calculate_macd_default(&bars);
    assert_eq!(macd.values.len(), bars.len());
    for point in &macd.values {
        match point.value {
            OverlayValue::Macd {
                line,
                signal,
                histogram,
            } => assert_relative_eq!(histogram, line - signal, epsilon = 1e-10),
            _ => panic!("expected macd point"),
        }
    }
}

#[test]
fn heikin_ashi_open_converges_on_flat_series() {
    let bars: Vec<OhlcvBar> = (0..30)
        .map(|i| OhlcvBar {
            ticker: "FLAT".into(),
            date: date(2024, 1, 1) + chrono::Days::new(i),
            open: 100.0,
            high: 100.0,
            low: 100.0,
            close: 100.0,
            volume: 0.0,
        })
        .collect();

    let ha = calculate_heikin_ashi(&bars);
    match ha.values.last().unwrap().value {
        OverlayValue::Candle { open, close, .. } => {
            assert_relative_eq!(open, 100.0, epsilon = 1e-6);
            assert_relative_eq!(close, 100.0, epsilon = 1e-10);
        }
        _ => panic!("expected candle point"),
    }
}

#[test]
fn pipeline_through_quote_port() {
    let bars = make_series("^GSPC", date(2024, 1, 2), 90, |i| 4700.0 + i as f64);
    let port = MockQuotePort::new().with_bars("^GSPC", bars);

    let fetched = port
        .fetch_ohlcv("^GSPC", FetchRange::Period(Period::SixMonths), Interval::Daily)
        .unwrap();
    assert_eq!(fetched.len(), 90);

    let spec = overview_chart("S&P 500", &fetched);
    // close line + MA25/50/75 + upper/lower bands
    assert!(spec.series.len() >= 6);
    assert!(spec.series.iter().any(|s| s.name == "MA75"));
}

#[test]
fn quote_port_unknown_ticker_is_empty_not_error() {
    let port = MockQuotePort::new();
    let fetched = port
        .fetch_ohlcv("NOPE", FetchRange::Period(Period::OneYear), Interval::Daily)
        .unwrap();
    assert!(fetched.is_empty());
}

proptest! {
    #[test]
    fn rsi_stays_within_bounds(closes in prop::collection::vec(1.0f64..1000.0, 20..60)) {
        let bars = make_series("PROP", date(2024, 1, 1), closes.len(), |i| closes[i]);
        let rsi = calculate_rsi_default(&bars);
        for (_, value) in rsi.valid_points() {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn sma_valid_count_matches_window(len in 1usize..80, window in 1usize..40) {
        let bars = make_series("PROP", date(2024, 1, 1), len, |i| 50.0 + i as f64);
        let sma = calculate_sma(&bars, window);
        let expected = if len >= window { len - window + 1 } else { 0 };
        prop_assert_eq!(sma.valid_points().len(), expected);
    }
}
