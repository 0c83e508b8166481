//! Chart output port trait.

use crate::domain::chart::ChartSpec;
use crate::domain::error::MarketscopeError;
use std::path::Path;

pub trait ChartPort {
    fn write_chart(&self, spec: &ChartSpec, path: &Path) -> Result<(), MarketscopeError>;

    /// File extension this renderer produces, for naming output files.
    fn extension(&self) -> &'static str;
}
