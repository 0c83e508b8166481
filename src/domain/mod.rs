//! Core domain types and logic.

pub mod catalog;
pub mod chart;
pub mod error;
pub mod indicator;
pub mod ohlcv;
pub mod trades;
