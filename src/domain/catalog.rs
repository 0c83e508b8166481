//! Ticker catalog for the market overview.
//!
//! The groups mirror the dashboard sections; which sections are visible at
//! any moment is the shell's business, the catalog only names them.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogGroup {
    UsIndices,
    JpIndices,
    RatesAndCommodities,
    Fx,
    Crypto,
    GlobalSouth,
}

impl CatalogGroup {
    pub fn all() -> &'static [CatalogGroup] {
        &[
            CatalogGroup::UsIndices,
            CatalogGroup::JpIndices,
            CatalogGroup::RatesAndCommodities,
            CatalogGroup::Fx,
            CatalogGroup::Crypto,
            CatalogGroup::GlobalSouth,
        ]
    }

    pub fn parse(name: &str) -> Option<CatalogGroup> {
        match name {
            "us" => Some(CatalogGroup::UsIndices),
            "jp" => Some(CatalogGroup::JpIndices),
            "rates" => Some(CatalogGroup::RatesAndCommodities),
            "fx" => Some(CatalogGroup::Fx),
            "crypto" => Some(CatalogGroup::Crypto),
            "global-south" => Some(CatalogGroup::GlobalSouth),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub ticker: &'static str,
    pub title: &'static str,
    pub group: CatalogGroup,
    /// Horizontal guide levels drawn on the chart (the VIX 20/30 bands).
    pub reference_bands: &'static [(f64, &'static str)],
}

const NO_BANDS: &[(f64, &str)] = &[];
const VIX_BANDS: &[(f64, &str)] = &[(20.0, "palevioletred"), (30.0, "red")];

pub fn default_catalog() -> Vec<CatalogEntry> {
    use CatalogGroup::*;

    let plain = |ticker, title, group| CatalogEntry {
        ticker,
        title,
        group,
        reference_bands: NO_BANDS,
    };

    vec![
        plain("^DJI", "Dow Jones Industrial Average", UsIndices),
        plain("^GSPC", "S&P 500", UsIndices),
        plain("^IXIC", "NASDAQ Composite", UsIndices),
        plain("^N225", "Nikkei 225", JpIndices),
        CatalogEntry {
            ticker: "^VIX",
            title: "VIX",
            group: RatesAndCommodities,
            reference_bands: VIX_BANDS,
        },
        plain("^TNX", "US 10Y Treasury Yield (%)", RatesAndCommodities),
        plain("^SOX", "PHLX Semiconductor (SOX)", RatesAndCommodities),
        plain("CL=F", "WTI Crude Oil", RatesAndCommodities),
        plain("1328.T", "Gold Trust (1328)", RatesAndCommodities),
        plain("1693.T", "Copper Trust (1693)", RatesAndCommodities),
        plain("USDJPY=X", "USD/JPY", Fx),
        plain("EURJPY=X", "EUR/JPY", Fx),
        plain("GBPJPY=X", "GBP/JPY", Fx),
        plain("CNYJPY=X", "CNY/JPY", Fx),
        plain("BTC-USD", "Bitcoin (USD)", Crypto),
        plain("ETH-USD", "Ethereum (USD)", Crypto),
        plain("XRP-USD", "Ripple (USD)", Crypto),
        plain("SOL-USD", "Solana (USD)", Crypto),
        plain("EPI", "India (EPI)", GlobalSouth),
        plain("TUR", "Turkey (TUR)", GlobalSouth),
        plain("VNM", "Vietnam (VNM)", GlobalSouth),
        plain("EWW", "Mexico (EWW)", GlobalSouth),
    ]
}

pub fn entries_for(group: CatalogGroup) -> Vec<CatalogEntry> {
    default_catalog()
        .into_iter()
        .filter(|e| e.group == group)
        .collect()
}
