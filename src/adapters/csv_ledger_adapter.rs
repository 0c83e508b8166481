//! CSV trade-ledger adapter.
//!
//! Reads a brokerage transaction export with columns
//! `account,stock_code,stock_name,trade_date,side,unit_price,realized_pnl`.
//! Side accepts `buy`/`sell` and the raw export tokens `買付`/`売付`;
//! dates accept `2023-05-10` and `2023/05/10`. Any malformed row is fatal:
//! trade-overlay charts are meaningless against a partially loaded ledger.

use crate::domain::error::MarketscopeError;
use crate::domain::trades::{Side, TransactionBook, TransactionRecord};
use crate::ports::ledger_port::LedgerPort;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

pub struct CsvLedgerAdapter {
    path: PathBuf,
}

impl CsvLedgerAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn ledger_err(&self, reason: String) -> MarketscopeError {
        MarketscopeError::Ledger {
            file: self.path.display().to_string(),
            reason,
        }
    }

    fn parse_side(token: &str) -> Option<Side> {
        match token.trim() {
            "buy" | "買付" => Some(Side::Buy),
            "sell" | "売付" => Some(Side::Sell),
            _ => None,
        }
    }

    fn parse_date(token: &str) -> Option<NaiveDate> {
        let token = token.trim();
        NaiveDate::parse_from_str(token, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(token, "%Y/%m/%d"))
            .ok()
    }
}

impl LedgerPort for CsvLedgerAdapter {
    fn load(&self) -> Result<TransactionBook, MarketscopeError> {
        let mut rdr = csv::Reader::from_path(&self.path)
            .map_err(|e| self.ledger_err(format!("failed to open: {e}")))?;

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let line = row + 2; // header is line 1
            let record = result.map_err(|e| self.ledger_err(format!("line {line}: {e}")))?;

            let field = |idx: usize, name: &str| -> Result<&str, MarketscopeError> {
                record
                    .get(idx)
                    .ok_or_else(|| self.ledger_err(format!("line {line}: missing {name} column")))
            };

            let trade_date = Self::parse_date(field(3, "trade_date")?)
                .ok_or_else(|| self.ledger_err(format!("line {line}: invalid trade date")))?;
            let side = Self::parse_side(field(4, "side")?)
                .ok_or_else(|| self.ledger_err(format!("line {line}: invalid side")))?;
            let unit_price: f64 = field(5, "unit_price")?
                .trim()
                .parse()
                .map_err(|e| self.ledger_err(format!("line {line}: invalid unit price: {e}")))?;
            let realized_pnl: f64 = field(6, "realized_pnl")?
                .trim()
                .parse()
                .map_err(|e| self.ledger_err(format!("line {line}: invalid realized pnl: {e}")))?;

            records.push(TransactionRecord {
                account: field(0, "account")?.trim().to_string(),
                stock_code: field(1, "stock_code")?.trim().to_string(),
                stock_name: field(2, "stock_name")?.trim().to_string(),
                trade_date,
                side,
                unit_price,
                realized_pnl,
            });
        }

        info!("loaded {} ledger records from {}", records.len(), self.path.display());
        Ok(TransactionBook::new(records))
    }
}
