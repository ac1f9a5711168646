use crate::{
    acquisition_generator::AcquisitionChannelRecord,
    cohort_generator::CohortRecord,
    customer_generator::CustomerRecord,
    revenue_generator::RevenueDataPoint,
    snapshot::DashboardSnapshot,
    sparkline_generator::SparklinePoint,
    types::Trend,
};
use serde::{Deserialize, Serialize};

fn default_periods() -> i64 {
    12
}

fn default_customer_count() -> i64 {
    50
}

/// All dataset requests a consumer can issue.
/// Counts are signed so callers can pass anything; negatives clamp to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetRequest {
    Revenue {
        #[serde(default = "default_periods")]
        periods: i64,
    },
    Customers {
        #[serde(default = "default_customer_count")]
        count: i64,
    },
    Cohorts,
    Channels,
    Sparkline {
        #[serde(default)]
        trend: Trend,
    },
    Snapshot,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DatasetResponse {
    Revenue(Vec<RevenueDataPoint>),
    Customers(Vec<CustomerRecord>),
    Cohorts(Vec<CohortRecord>),
    Channels(Vec<AcquisitionChannelRecord>),
    Sparkline(Vec<SparklinePoint>),
    Snapshot(Box<DashboardSnapshot>),
}

impl DatasetResponse {
    /// Number of top-level rows (1 for a snapshot).
    pub fn len(&self) -> usize {
        match self {
            Self::Revenue(v) => v.len(),
            Self::Customers(v) => v.len(),
            Self::Cohorts(v) => v.len(),
            Self::Channels(v) => v.len(),
            Self::Sparkline(v) => v.len(),
            Self::Snapshot(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Largest row count a single request may ask for.
pub const MAX_REQUEST_COUNT: usize = 10_000;

/// Clamp a caller-supplied count into `0..=MAX_REQUEST_COUNT`.
/// Generation itself never fails.
pub fn clamp_count(requested: i64, what: &str) -> usize {
    if requested < 0 {
        log::warn!("{what}: negative count {requested} clamped to 0");
        return 0;
    }
    match usize::try_from(requested) {
        Ok(n) if n <= MAX_REQUEST_COUNT => n,
        _ => {
            log::warn!("{what}: count {requested} clamped to {MAX_REQUEST_COUNT}");
            MAX_REQUEST_COUNT
        }
    }
}
