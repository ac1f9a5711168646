use crate::{
    command::MAX_REQUEST_COUNT,
    error::{MetricsError, MetricsResult},
    rng::MetricsRng,
    types::{Dollars, PlanTier},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Half-open float interval [min, max) sampled uniformly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

impl FloatRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut MetricsRng) -> f64 {
        rng.range_f64(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &str) -> MetricsResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(invalid(format!(
                "{field}: range [{}, {}) is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// ── Revenue series ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevenueConfig {
    /// MRR before the first period's growth is applied.
    pub base_mrr: f64,
    /// Per-period multiplicative growth.
    pub growth: FloatRange,
    pub new_share: FloatRange,
    pub expansion_share: FloatRange,
    pub contraction_share: FloatRange,
    pub churned_share: FloatRange,
    /// Revenue one customer brings in per month; drives customer count.
    pub revenue_per_customer: f64,
    pub period_spacing_days: u64,
}

impl Default for RevenueConfig {
    fn default() -> Self {
        Self {
            base_mrr: 45_000.0,
            growth: FloatRange::new(1.02, 1.10),
            new_share: FloatRange::new(0.12, 0.18),
            expansion_share: FloatRange::new(0.04, 0.08),
            contraction_share: FloatRange::new(0.01, 0.03),
            churned_share: FloatRange::new(0.02, 0.04),
            revenue_per_customer: 69.0,
            period_spacing_days: 30,
        }
    }
}

// ── Customer batch ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    pub tier: PlanTier,
    pub monthly_price: Dollars,
    /// Share of customers on this plan; plans are picked by cumulative weight.
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CustomerConfig {
    pub plans: Vec<PlanConfig>,
    pub companies: Vec<String>,
    pub health_min: u32,
    /// Health is drawn from [health_min, health_min + health_span).
    pub health_span: u32,
    pub join_window_days: u64,
    pub last_active_window_days: u64,
    pub email_local_part: String,
    pub email_tld: String,
    /// Generic fragments removed from the company name, in order.
    pub stripped_fragments: Vec<String>,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            plans: vec![
                PlanConfig { tier: PlanTier::Enterprise, monthly_price: 1500, weight: 0.03 },
                PlanConfig { tier: PlanTier::Pro, monthly_price: 149, weight: 0.17 },
                PlanConfig { tier: PlanTier::Basic, monthly_price: 9, weight: 0.80 },
            ],
            companies: crate::name_generator::DEFAULT_COMPANIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            health_min: 40,
            health_span: 60,
            join_window_days: 365,
            last_active_window_days: 30,
            email_local_part: "contact".into(),
            email_tld: "com".into(),
            stripped_fragments: ["inc", "labs", "tech", "co"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ── Cohort table ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CohortConfig {
    /// Number of monthly cohorts; the oldest is tracked for this many months.
    pub cohort_count: u32,
    pub retention_floor: f64,
    /// Raw monthly drop in percentage points, before damping.
    pub drop: FloatRange,
    /// Drop in month j is divided by (damping_slope * j + 1).
    pub damping_slope: f64,
    pub size_min: u32,
    pub size_span: u32,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            cohort_count: 12,
            retention_floor: 20.0,
            drop: FloatRange::new(5.0, 20.0),
            damping_slope: 0.5,
            size_min: 50,
            size_span: 150,
        }
    }
}

// ── Sparklines ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SparklineConfig {
    pub points: u32,
    pub start: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub up_step: FloatRange,
    pub down_step: FloatRange,
    pub stable_step: FloatRange,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            points: 30,
            start: 50.0,
            floor: 10.0,
            ceiling: 90.0,
            up_step: FloatRange::new(-0.5, 2.5),
            down_step: FloatRange::new(-2.5, 0.5),
            stable_step: FloatRange::new(-1.0, 1.0),
        }
    }
}

// ── Acquisition channels ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelConfig {
    pub channel: String,
    pub visitors: u64,
    pub signups: u64,
    pub trials: u64,
    pub converted: u64,
    pub cac: Dollars,
    pub ltv: Dollars,
}

impl ChannelConfig {
    fn new(
        channel: &str,
        funnel: [u64; 4],
        cac: Dollars,
        ltv: Dollars,
    ) -> Self {
        let [visitors, signups, trials, converted] = funnel;
        Self { channel: channel.into(), visitors, signups, trials, converted, cac, ltv }
    }
}

pub fn default_channels() -> Vec<ChannelConfig> {
    vec![
        ChannelConfig::new("Organic Search", [18_500, 890, 445, 148], 45, 2_100),
        ChannelConfig::new("Paid Ads", [12_300, 520, 260, 86], 120, 1_800),
        ChannelConfig::new("Referral", [8_200, 380, 228, 91], 25, 3_200),
        ChannelConfig::new("Social Media", [6_230, 110, 55, 16], 85, 1_200),
        ChannelConfig::new("Direct", [4_800, 340, 170, 54], 0, 2_400),
        ChannelConfig::new("Email", [2_200, 180, 108, 43], 15, 2_800),
    ]
}

// ── Dashboard overview ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub revenue_periods: usize,
    pub customer_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { revenue_periods: 12, customer_count: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub revenue: RevenueConfig,
    pub customers: CustomerConfig,
    pub cohorts: CohortConfig,
    pub sparkline: SparklineConfig,
    pub channels: Vec<ChannelConfig>,
    pub dashboard: DashboardConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            revenue: RevenueConfig::default(),
            customers: CustomerConfig::default(),
            cohorts: CohortConfig::default(),
            sparkline: SparklineConfig::default(),
            channels: default_channels(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Sections the file omits keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> MetricsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        log::info!("config: loaded generator config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> MetricsResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with hardcoded defaults for use in tests.
    pub fn default_test() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> MetricsResult<()> {
        let r = &self.revenue;
        if r.base_mrr.is_nan() || r.base_mrr <= 0.0 {
            return Err(invalid("revenue.base_mrr must be positive"));
        }
        if r.revenue_per_customer.is_nan() || r.revenue_per_customer <= 0.0 {
            return Err(invalid("revenue.revenue_per_customer must be positive"));
        }
        r.growth.check("revenue.growth")?;
        if r.growth.min <= 0.0 {
            return Err(invalid("revenue.growth must stay above zero"));
        }
        r.new_share.check("revenue.new_share")?;
        r.expansion_share.check("revenue.expansion_share")?;
        r.contraction_share.check("revenue.contraction_share")?;
        r.churned_share.check("revenue.churned_share")?;

        let c = &self.customers;
        if c.plans.is_empty() {
            return Err(invalid("customers.plans must not be empty"));
        }
        let total_weight: f64 = c.plans.iter().map(|p| p.weight).sum();
        if c.plans.iter().any(|p| p.weight < 0.0) || total_weight > 1.0 + 1e-9 {
            return Err(invalid(format!(
                "customers.plans weights must be non-negative and sum to at most 1 (got {total_weight})"
            )));
        }
        if c.companies.is_empty() {
            return Err(invalid("customers.companies must not be empty"));
        }
        let health_hi = c.health_min.checked_add(c.health_span);
        if c.health_span == 0 || health_hi.map_or(true, |hi| hi > 101) {
            return Err(invalid("customers health range must be non-empty and within 0..=100"));
        }

        let k = &self.cohorts;
        if k.cohort_count == 0 || k.cohort_count as usize > MAX_REQUEST_COUNT {
            return Err(invalid(format!(
                "cohorts.cohort_count must lie in 1..={MAX_REQUEST_COUNT}"
            )));
        }
        k.drop.check("cohorts.drop")?;
        if k.drop.min < 0.0 || k.damping_slope < 0.0 {
            return Err(invalid("cohorts.drop and damping_slope must be non-negative"));
        }
        if !(0.0..=100.0).contains(&k.retention_floor) {
            return Err(invalid("cohorts.retention_floor must lie in [0, 100]"));
        }
        if k.size_span == 0 {
            return Err(invalid("cohorts.size_span must be at least 1"));
        }

        let s = &self.sparkline;
        if s.points as usize > MAX_REQUEST_COUNT {
            return Err(invalid(format!("sparkline.points must not exceed {MAX_REQUEST_COUNT}")));
        }
        if s.floor > s.ceiling {
            return Err(invalid("sparkline.floor must not exceed sparkline.ceiling"));
        }
        s.up_step.check("sparkline.up_step")?;
        s.down_step.check("sparkline.down_step")?;
        s.stable_step.check("sparkline.stable_step")?;

        let d = &self.dashboard;
        if d.revenue_periods > MAX_REQUEST_COUNT || d.customer_count > MAX_REQUEST_COUNT {
            return Err(invalid(format!(
                "dashboard counts must not exceed {MAX_REQUEST_COUNT}"
            )));
        }

        for ch in &self.channels {
            let funnel_ok = ch.visitors >= ch.signups
                && ch.signups >= ch.trials
                && ch.trials >= ch.converted;
            if !funnel_ok {
                return Err(invalid(format!(
                    "channel '{}': funnel counts must not increase from visitors to converted",
                    ch.channel
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> MetricsError {
    MetricsError::InvalidConfig { reason: reason.into() }
}
