//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_ledger_adapter::CsvLedgerAdapter;
use crate::adapters::csv_quote_adapter::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_chart_adapter::JsonChartAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::catalog::{default_catalog, CatalogGroup};
use crate::domain::chart::{
    add_trade_markers, banded_overview_chart, candlestick_chart, heikin_ashi_chart,
    ichimoku_chart, macd_panel, overview_chart, rsi_panel, volume_panel, ChartSpec,
};
use crate::domain::error::MarketscopeError;
use crate::domain::indicator::{calculate_rsi_default, latest_ma_deviation};
use crate::domain::trades::{Side, TradeMatcher};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::ledger_port::LedgerPort;
use crate::ports::quote_port::{FetchRange, Interval, Period, QuotePort};

#[derive(Parser, Debug)]
#[command(name = "marketscope", about = "Market dashboard chart builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build overview charts for the ticker catalog
    Market {
        #[arg(short, long)]
        period: Option<String>,
        /// Catalog group (us, jp, rates, fx, crypto, global-south); all when omitted
        #[arg(short, long)]
        group: Option<String>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Read quotes from per-ticker CSV files instead of the network
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Emit chart specs as JSON instead of SVG
        #[arg(long)]
        json: bool,
    },
    /// Full technical analysis for one ticker
    Ticker {
        symbol: String,
        #[arg(short, long)]
        period: Option<String>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Overlay ledger trades on price history
    Trades {
        /// Transaction ledger CSV
        #[arg(short, long)]
        ledger: Option<PathBuf>,
        /// Stock code to analyze; lists traded stocks when omitted
        #[arg(long)]
        code: Option<String>,
        #[arg(short, long)]
        period: Option<String>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Market {
            period,
            group,
            out,
            data_dir,
            config,
            json,
        } => run_market(
            period.as_deref(),
            group.as_deref(),
            out,
            data_dir,
            config.as_ref(),
            json,
        ),
        Command::Ticker {
            symbol,
            period,
            out,
            data_dir,
            config,
            json,
        } => run_ticker(
            &symbol,
            period.as_deref(),
            out,
            data_dir,
            config.as_ref(),
            json,
        ),
        Command::Trades {
            ledger,
            code,
            period,
            out,
            data_dir,
            config,
            json,
        } => run_trades(
            ledger,
            code.as_deref(),
            period.as_deref(),
            out,
            data_dir,
            config.as_ref(),
            json,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

/// Command-line flags win over the config file, which wins over built-in
/// defaults.
struct Settings {
    period: Period,
    out: PathBuf,
    data_dir: Option<PathBuf>,
    ledger: Option<PathBuf>,
}

fn load_settings(
    config: Option<&PathBuf>,
    period: Option<&str>,
    out: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    ledger: Option<PathBuf>,
    default_period: Period,
) -> Result<Settings, MarketscopeError> {
    let config = match config {
        Some(path) => Some(FileConfigAdapter::from_file(path).map_err(|e| {
            MarketscopeError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            }
        })?),
        None => None,
    };
    let cfg_str = |section: &str, key: &str| {
        config
            .as_ref()
            .and_then(|c| c.get_string(section, key))
    };

    let period_str = period
        .map(str::to_string)
        .or_else(|| cfg_str("dashboard", "period"));
    let period = match period_str {
        Some(s) => Period::parse(&s).ok_or_else(|| MarketscopeError::ConfigMissing {
            section: "dashboard".into(),
            key: format!("period (unrecognized value '{s}')"),
        })?,
        None => default_period,
    };

    Ok(Settings {
        period,
        out: out
            .or_else(|| cfg_str("dashboard", "out_dir").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("charts")),
        data_dir: data_dir.or_else(|| cfg_str("data", "dir").map(PathBuf::from)),
        ledger: ledger.or_else(|| cfg_str("ledger", "path").map(PathBuf::from)),
    })
}

fn make_quote_port(data_dir: Option<&PathBuf>) -> Result<Box<dyn QuotePort>, MarketscopeError> {
    match data_dir {
        Some(dir) => Ok(Box::new(CsvQuoteAdapter::new(dir.clone()))),
        None => Ok(Box::new(YahooAdapter::new()?)),
    }
}

fn make_chart_port(json: bool) -> Box<dyn ChartPort> {
    if json {
        Box::new(JsonChartAdapter)
    } else {
        Box::new(SvgChartAdapter)
    }
}

fn safe_file_stem(ticker: &str) -> String {
    ticker.replace(['^', '=', '/', '.'], "_")
}

fn write_chart(
    charts: &dyn ChartPort,
    out: &Path,
    stem: &str,
    spec: &ChartSpec,
) -> Result<(), MarketscopeError> {
    let path = out.join(format!("{}.{}", stem, charts.extension()));
    charts.write_chart(spec, &path)?;
    info!("wrote {}", path.display());
    Ok(())
}

fn run_market(
    period: Option<&str>,
    group: Option<&str>,
    out: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    config: Option<&PathBuf>,
    json: bool,
) -> Result<(), MarketscopeError> {
    let settings = load_settings(config, period, out, data_dir, None, Period::SixMonths)?;
    let group = match group {
        Some(name) => Some(CatalogGroup::parse(name).ok_or_else(|| {
            MarketscopeError::UnknownGroup {
                name: name.to_string(),
            }
        })?),
        None => None,
    };

    let quotes = make_quote_port(settings.data_dir.as_ref())?;
    let charts = make_chart_port(json);
    fs::create_dir_all(&settings.out)?;

    for entry in default_catalog() {
        if let Some(g) = group {
            if entry.group != g {
                continue;
            }
        }

        let bars = quotes.fetch_ohlcv(
            entry.ticker,
            FetchRange::Period(settings.period),
            Interval::Daily,
        )?;
        if bars.is_empty() {
            warn!("{}: no data for period {}", entry.ticker, settings.period);
        }

        let spec = banded_overview_chart(entry.title, &bars, entry.reference_bands);
        write_chart(charts.as_ref(), &settings.out, &safe_file_stem(entry.ticker), &spec)?;
    }

    Ok(())
}

fn run_ticker(
    symbol: &str,
    period: Option<&str>,
    out: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    config: Option<&PathBuf>,
    json: bool,
) -> Result<(), MarketscopeError> {
    let settings = load_settings(config, period, out, data_dir, None, Period::SixMonths)?;
    let quotes = make_quote_port(settings.data_dir.as_ref())?;
    let charts = make_chart_port(json);
    fs::create_dir_all(&settings.out)?;

    let bars = quotes.fetch_ohlcv(
        symbol,
        FetchRange::Period(settings.period),
        Interval::Daily,
    )?;
    if bars.is_empty() {
        println!("{symbol}: no price data for period {}", settings.period);
        return Ok(());
    }

    let stem = safe_file_stem(symbol);
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{stem}_price"),
        &candlestick_chart(symbol, &bars),
    )?;
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{stem}_heikin_ashi"),
        &heikin_ashi_chart(&bars),
    )?;
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{stem}_volume"),
        &volume_panel(&bars),
    )?;
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{stem}_ichimoku"),
        &ichimoku_chart(&bars),
    )?;
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{stem}_rsi"),
        &rsi_panel(&bars),
    )?;
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{stem}_macd"),
        &macd_panel(&bars),
    )?;

    match latest_ma_deviation(&bars, 25) {
        Some(dev) => {
            println!("MA25 deviation: {dev:.1}%  (buy guide: -15% / sell guide: +15%)")
        }
        None => println!("MA25 deviation: n/a (needs 25 bars)"),
    }
    match calculate_rsi_default(&bars).latest() {
        Some(rsi) => println!("RSI(14): {rsi:.1}"),
        None => println!("RSI(14): n/a (needs 15 bars)"),
    }

    Ok(())
}

fn run_trades(
    ledger: Option<PathBuf>,
    code: Option<&str>,
    period: Option<&str>,
    out: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    config: Option<&PathBuf>,
    json: bool,
) -> Result<(), MarketscopeError> {
    // The trade page defaults to a two-year window so older fills still
    // land on the chart.
    let settings = load_settings(config, period, out, data_dir, ledger, Period::TwoYears)?;
    let ledger_path = settings
        .ledger
        .clone()
        .ok_or_else(|| MarketscopeError::ConfigMissing {
            section: "ledger".into(),
            key: "path".into(),
        })?;
    let book = CsvLedgerAdapter::new(ledger_path).load()?;

    let Some(code) = code else {
        for label in book.stock_labels() {
            println!("{label}");
        }
        return Ok(());
    };

    let records = book.records_for(code);
    if records.is_empty() {
        println!("{code}: no transactions in ledger");
        return Ok(());
    }
    let stock_name = records[0].stock_name.clone();

    // Japanese stock codes trade on Yahoo under a .T suffix.
    let symbol = format!("{code}.T");
    let quotes = make_quote_port(settings.data_dir.as_ref())?;
    let bars = quotes.fetch_ohlcv(
        &symbol,
        FetchRange::Period(settings.period),
        Interval::Daily,
    )?;
    if bars.is_empty() {
        warn!("{symbol}: no price data for period {}", settings.period);
    }

    let matcher = TradeMatcher::new(&bars, records);
    let mut spec = overview_chart(&stock_name, &bars);
    add_trade_markers(&mut spec, &matcher);

    let charts = make_chart_port(json);
    fs::create_dir_all(&settings.out)?;
    write_chart(
        charts.as_ref(),
        &settings.out,
        &format!("{}_trades", safe_file_stem(code)),
        &spec,
    )?;

    println!("{code}：{stock_name}");
    println!("{:<12} {:<6} {:>12} {:>14}", "date", "side", "unit price", "realized pnl");
    for record in records {
        println!(
            "{:<12} {:<6} {:>12.1} {:>14.1}",
            record.trade_date.format("%Y-%m-%d"),
            record.side,
            record.unit_price,
            record.realized_pnl
        );
    }
    println!(
        "trades: {}  buys: {}  sells: {}  realized pnl: {:.0}",
        matcher.trade_count(),
        matcher.count(Side::Buy),
        matcher.count(Side::Sell),
        matcher.total_realized_pnl()
    );

    Ok(())
}
