//! Concrete implementations of the port traits.

pub mod csv_ledger_adapter;
pub mod csv_quote_adapter;
pub mod file_config_adapter;
pub mod json_chart_adapter;
pub mod svg_chart_adapter;
pub mod yahoo_adapter;
