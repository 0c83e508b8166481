mod common;

use common::*;
use marketscope::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use marketscope::domain::chart::{add_trade_markers, overview_chart, SeriesData, SeriesStyle};
use marketscope::domain::trades::{Side, TradeMatcher};
use marketscope::ports::ledger_port::LedgerPort;
use marketscope::ports::quote_port::{FetchRange, Interval, Period, QuotePort};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "account,stock_code,stock_name,trade_date,side,unit_price,realized_pnl\n";

fn write_ledger(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn ledger_to_matched_buy_point() {
    let file = write_ledger(&format!(
        "{HEADER}standard,7203,トヨタ自動車,2023-05-10,買付,1500,0\n"
    ));
    let book = CsvLedgerAdapter::new(file.path().to_path_buf())
        .load()
        .unwrap();

    let bars = vec![
        make_bar("7203.T", date(2023, 5, 9), 1480.0),
        make_bar("7203.T", date(2023, 5, 10), 1500.0),
        make_bar("7203.T", date(2023, 5, 11), 1520.0),
    ];
    let matcher = TradeMatcher::new(&bars, book.records_for("7203"));

    assert_eq!(
        matcher.matched_points(Side::Buy),
        vec![(date(2023, 5, 10), 1500.0)]
    );
    assert!(matcher.matched_points(Side::Sell).is_empty());
}

#[test]
fn trade_markers_land_on_the_chart() {
    let file = write_ledger(&format!(
        "{HEADER}standard,7203,トヨタ自動車,2023-05-10,buy,1500,0\n\
         standard,7203,トヨタ自動車,2023-05-12,sell,1540,3200\n"
    ));
    let book = CsvLedgerAdapter::new(file.path().to_path_buf())
        .load()
        .unwrap();

    let bars: Vec<OhlcvBar> = (8..=15)
        .map(|d| make_bar("7203.T", date(2023, 5, d), 1480.0 + d as f64 * 4.0))
        .collect();
    let matcher = TradeMatcher::new(&bars, book.records_for("7203"));

    let mut spec = overview_chart("トヨタ自動車", &bars);
    let base_series = spec.series.len();
    add_trade_markers(&mut spec, &matcher);
    assert_eq!(spec.series.len(), base_series + 2);

    let buys = spec
        .series
        .iter()
        .find(|s| s.name == "Buy Dates")
        .expect("buy marker series");
    assert!(matches!(buys.style, SeriesStyle::Markers { .. }));
    match &buys.data {
        SeriesData::Points { points } => {
            assert_eq!(points, &vec![(date(2023, 5, 10), 1520.0)]);
        }
        _ => panic!("markers should carry points"),
    }
}

#[test]
fn ledger_from_mixed_export_tokens_and_labels() {
    let file = write_ledger(&format!(
        "{HEADER}standard,7203,トヨタ自動車,2023/05/10,買付,1500,0\n\
         nisa,9984,ソフトバンクグループ,2023-06-01,売付,6200,12000\n"
    ));
    let book = CsvLedgerAdapter::new(file.path().to_path_buf())
        .load()
        .unwrap();

    assert_eq!(
        book.stock_labels(),
        vec![
            "7203：トヨタ自動車".to_string(),
            "9984：ソフトバンクグループ".to_string()
        ]
    );
}

#[test]
fn pnl_total_ignores_price_series_window() {
    let file = write_ledger(&format!(
        "{HEADER}standard,7203,Toyota,2022-03-01,buy,1200,0\n\
         standard,7203,Toyota,2023-05-10,sell,1500,4500\n\
         standard,7203,Toyota,2023-08-20,sell,1450,-800\n"
    ));
    let book = CsvLedgerAdapter::new(file.path().to_path_buf())
        .load()
        .unwrap();
    let records = book.records_for("7203");

    // A six-month window misses the 2022 buy entirely.
    let recent: Vec<OhlcvBar> = (1..=20)
        .map(|d| make_bar("7203.T", date(2023, 8, d), 1400.0))
        .collect();
    let matcher = TradeMatcher::new(&recent, records);

    assert!((matcher.total_realized_pnl() - 3700.0).abs() < 1e-10);
    assert_eq!(matcher.trade_count(), 3);
    assert_eq!(matcher.count(Side::Buy), 1);
    assert_eq!(matcher.count(Side::Sell), 2);
    assert_eq!(matcher.matched_points(Side::Sell).len(), 1);
}

#[test]
fn trades_pipeline_with_mock_quotes() {
    let file = write_ledger(&format!(
        "{HEADER}standard,7203,Toyota,2023-05-10,buy,1500,0\n"
    ));
    let book = CsvLedgerAdapter::new(file.path().to_path_buf())
        .load()
        .unwrap();

    let bars: Vec<OhlcvBar> = (1..=31)
        .map(|d| make_bar("7203.T", date(2023, 5, d), 1500.0))
        .collect();
    let port = MockQuotePort::new().with_bars("7203.T", bars);

    let fetched = port
        .fetch_ohlcv("7203.T", FetchRange::Period(Period::TwoYears), Interval::Daily)
        .unwrap();
    let matcher = TradeMatcher::new(&fetched, book.records_for("7203"));
    let mut spec = overview_chart("Toyota", &fetched);
    add_trade_markers(&mut spec, &matcher);

    assert!(!spec.is_empty());
    assert!(spec.series.iter().any(|s| s.name == "Sell Dates"));
}
