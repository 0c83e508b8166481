//! Port traits separating the domain from its collaborators.

pub mod chart_port;
pub mod config_port;
pub mod ledger_port;
pub mod quote_port;
