//! Fixed dashboard fixtures.
//!
//! These figures are hand-authored headline numbers shown next to the
//! generated datasets. They never change between calls.

use crate::types::{Dollars, Trend};
use serde::{Deserialize, Serialize};

/// A headline metric with its month-over-month change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub value: f64,
    /// Percent change vs last month.
    pub change: f64,
    pub trend: Trend,
}

/// How a KPI value should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiFormat {
    Currency,
    Percentage,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub key: String,
    pub title: String,
    pub metric: KpiMetric,
    pub format: KpiFormat,
    /// A falling value is good news (churn, CAC).
    pub invert_colors: bool,
}

fn kpi(
    key: &str,
    title: &str,
    value: f64,
    change: f64,
    trend: Trend,
    format: KpiFormat,
    invert_colors: bool,
) -> Kpi {
    Kpi {
        key: key.into(),
        title: title.into(),
        metric: KpiMetric { value, change, trend },
        format,
        invert_colors,
    }
}

pub fn dashboard_kpis() -> Vec<Kpi> {
    use KpiFormat::*;
    vec![
        kpi("mrr", "Monthly Recurring Revenue", 127_450.0, 8.2, Trend::Up, Currency, false),
        kpi("arr", "Annual Run Rate", 1_529_400.0, 12.5, Trend::Up, Currency, false),
        kpi("customers", "Active Customers", 1_847.0, 5.3, Trend::Up, Number, false),
        kpi("churn", "Churn Rate", 2.4, -0.8, Trend::Down, Percentage, true),
        kpi("arpu", "Average Revenue per User", 69.0, 3.1, Trend::Up, Currency, false),
        kpi("ltv", "Customer Lifetime Value", 2_847.0, 7.2, Trend::Up, Currency, false),
        kpi("cac", "Customer Acquisition Cost", 156.0, -5.4, Trend::Down, Currency, true),
        kpi("nrr", "Net Revenue Retention", 108.0, 2.1, Trend::Up, Percentage, false),
    ]
}

pub fn find_kpi(key: &str) -> Option<Kpi> {
    dashboard_kpis().into_iter().find(|k| k.key == key)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub name: String,
    pub value: Dollars,
    pub percentage: u32,
    pub color: String,
}

fn slice(name: &str, value: Dollars, percentage: u32, color: &str) -> BreakdownSlice {
    BreakdownSlice {
        name: name.into(),
        value,
        percentage,
        color: color.into(),
    }
}

pub fn revenue_breakdown() -> Vec<BreakdownSlice> {
    vec![
        slice("Subscriptions", 91_764, 72, "#6366F1"),
        slice("Add-ons", 22_941, 18, "#22C55E"),
        slice("Services", 12_745, 10, "#F59E0B"),
    ]
}

/// Churn reasons as percentage shares (value is the share).
pub fn churn_reasons() -> Vec<BreakdownSlice> {
    vec![
        slice("Price", 35, 35, "#EF4444"),
        slice("Features", 28, 28, "#F59E0B"),
        slice("Competition", 22, 22, "#6366F1"),
        slice("Other", 15, 15, "#71717A"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRevenue {
    pub plan: String,
    pub customers: u64,
    pub mrr: Dollars,
    pub percentage: u32,
    pub arpu: Dollars,
    pub growth: f64,
}

pub fn revenue_by_plan() -> Vec<PlanRevenue> {
    let row = |plan: &str, customers, mrr, percentage, arpu, growth| PlanRevenue {
        plan: plan.into(),
        customers,
        mrr,
        percentage,
        arpu,
        growth,
    };
    vec![
        row("Enterprise", 45, 67_500, 53, 1_500, 15.2),
        row("Pro", 312, 46_488, 36, 149, 8.1),
        row("Basic", 1_490, 13_462, 11, 9, 2.3),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Subscription,
    Upgrade,
    Risk,
    Payment,
    Trial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub amount: Option<Dollars>,
    pub time: String,
}

pub fn recent_activity() -> Vec<Activity> {
    let item = |id, kind, title: &str, description: &str, amount, time: &str| Activity {
        id,
        kind,
        title: title.into(),
        description: description.into(),
        amount,
        time: time.into(),
    };
    vec![
        item(1, ActivityKind::Subscription, "New subscription", "Acme Corp signed up for Pro Plan", Some(149), "2h ago"),
        item(2, ActivityKind::Upgrade, "Plan upgrade", "TechStart upgraded Basic → Pro", Some(140), "5h ago"),
        item(3, ActivityKind::Risk, "Churn risk detected", "DataFlow Inc showing low engagement", None, "8h ago"),
        item(4, ActivityKind::Payment, "Payment received", "MegaCo paid invoice #1247", Some(2_400), "1d ago"),
        item(5, ActivityKind::Trial, "New trial started", "StartupXYZ started 14-day trial", None, "1d ago"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub count: u64,
    /// Share of top-of-funnel visitors reaching this stage.
    pub percentage: f64,
    /// Share of this stage reaching the next one; `None` for the last stage.
    pub conversion: Option<f64>,
}

pub fn conversion_funnel() -> Vec<FunnelStage> {
    let stage = |name: &str, count, percentage, conversion| FunnelStage {
        stage: name.into(),
        count,
        percentage,
        conversion,
    };
    vec![
        stage("Visitors", 45_230, 100.0, Some(4.2)),
        stage("Signups", 1_900, 4.2, Some(31.6)),
        stage("Activated", 601, 1.3, Some(52.4)),
        stage("Converted", 315, 0.7, Some(89.2)),
        stage("Retained", 281, 0.6, None),
    ]
}
