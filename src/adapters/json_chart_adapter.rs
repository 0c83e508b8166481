//! JSON chart-spec writer.
//!
//! Dumps the ChartSpec as pretty-printed JSON, the machine-readable seam
//! for whatever presentation shell sits in front of the core.

use crate::domain::chart::ChartSpec;
use crate::domain::error::MarketscopeError;
use crate::ports::chart_port::ChartPort;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct JsonChartAdapter;

impl ChartPort for JsonChartAdapter {
    fn write_chart(&self, spec: &ChartSpec, path: &Path) -> Result<(), MarketscopeError> {
        let file = File::create(path).map_err(|e| MarketscopeError::ChartOutput {
            reason: format!("failed to create {}: {}", path.display(), e),
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), spec).map_err(|e| {
            MarketscopeError::ChartOutput {
                reason: format!("failed to serialize chart: {e}"),
            }
        })
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
