//! Record shapes produced by the comparator pipeline
use serde::{Deserialize, Serialize};

/// One aggregated row of a per-corpus summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub taxonomy: String,
    pub marker_id: i64,
    pub sum_coverage: f64,
}

/// One row of the comparison table: a reads-summary row decorated with
/// cross-corpus presence flags. `assembly` is tracked only when an
/// assemblies corpus was attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRecord {
    pub taxonomy: String,
    pub marker_id: i64,
    pub sum_coverage: f64,
    pub bin: bool,
    pub assembly: Option<bool>,
}

/// One row of the final elusive table: a taxonomy well-supported by reads
/// yet missing from bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElusiveRecord {
    pub taxonomy: String,
    /// Number of distinct markers observed for this taxonomy in reads
    pub count_marker_id: i64,
    /// Maximum summed coverage across this taxonomy's marker rows
    pub max_sum_coverage: f64,
    /// Always false by construction of the elusive filter
    pub bin: bool,
    pub assembly: Option<bool>,
}
