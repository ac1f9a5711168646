//! Dashboard snapshot: everything the overview page renders, in one value.
//!
//! A snapshot is built by MetricsEngine::snapshot(). Generated datasets
//! come from the engine's per-call streams; the fixed catalog figures are
//! copied in unchanged.

use crate::{
    acquisition_generator::AcquisitionChannelRecord,
    catalog::{Activity, BreakdownSlice, FunnelStage, Kpi, KpiFormat, PlanRevenue},
    cohort_generator::CohortRecord,
    customer_generator::CustomerRecord,
    format::{format_currency, format_delta, format_number, Delta},
    revenue_generator::RevenueDataPoint,
    sparkline_generator::SparklinePoint,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A headline metric ready for a card: formatted value, delta badge, sparkline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub kpi: Kpi,
    pub display_value: String,
    pub delta: Delta,
    pub sparkline: Vec<SparklinePoint>,
}

impl KpiCard {
    pub fn new(kpi: Kpi, sparkline: Vec<SparklinePoint>) -> Self {
        let value = kpi.metric.value;
        let display_value = match kpi.format {
            KpiFormat::Currency => format_currency(value, false),
            KpiFormat::Percentage => format!("{value:.1}%"),
            KpiFormat::Number => format_number(value, false),
        };
        let delta = format_delta(kpi.metric.change, kpi.invert_colors);
        Self { kpi, display_value, delta, sparkline }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub snapshot_id: Uuid,
    pub generated_on: NaiveDate,
    /// Master seed of the engine that produced this snapshot.
    pub seed: u64,
    pub kpis: Vec<KpiCard>,
    pub revenue: Vec<RevenueDataPoint>,
    pub customers: Vec<CustomerRecord>,
    pub cohorts: Vec<CohortRecord>,
    pub channels: Vec<AcquisitionChannelRecord>,
    pub revenue_breakdown: Vec<BreakdownSlice>,
    pub revenue_by_plan: Vec<PlanRevenue>,
    pub churn_reasons: Vec<BreakdownSlice>,
    pub recent_activity: Vec<Activity>,
    pub funnel: Vec<FunnelStage>,
}

impl DashboardSnapshot {
    /// Sum of the revenue breakdown slices (the donut chart's centre figure).
    pub fn total_revenue(&self) -> i64 {
        self.revenue_breakdown.iter().map(|s| s.value).sum()
    }

    pub fn kpi_card(&self, key: &str) -> Option<&KpiCard> {
        self.kpis.iter().find(|c| c.kpi.key == key)
    }
}
