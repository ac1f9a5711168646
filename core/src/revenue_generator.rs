use crate::{
    clock::{days_after, days_before, month_label},
    config::RevenueConfig,
    generator::MetricsGenerator,
    rng::{GeneratorSlot, MetricsRng},
    types::Dollars,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueDataPoint {
    pub period: String,
    pub mrr: Dollars,
    pub new_mrr: Dollars,
    pub expansion_mrr: Dollars,
    pub contraction_mrr: Dollars,
    pub churned_mrr: Dollars,
    pub customers: i64,
    pub arpu: Dollars,
}

/// Compounding, growth-biased MRR walk.
///
/// The new/expansion/contraction/churned components are independent
/// fractions of the running base. They illustrate the movement and are
/// not reconciled against `mrr`.
pub struct RevenueGenerator {
    periods: usize,
    config: RevenueConfig,
}

impl RevenueGenerator {
    pub fn new(periods: usize) -> Self {
        Self::with_config(periods, RevenueConfig::default())
    }

    pub fn with_config(periods: usize, config: RevenueConfig) -> Self {
        Self { periods, config }
    }

    /// Date of the first period: `periods` spacings before today.
    fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let span = (self.periods as u64).saturating_mul(self.config.period_spacing_days);
        days_before(today, span)
    }
}

impl MetricsGenerator for RevenueGenerator {
    type Record = RevenueDataPoint;

    fn name(&self) -> &'static str {
        "revenue"
    }

    fn slot(&self) -> GeneratorSlot {
        GeneratorSlot::Revenue
    }

    fn generate(&self, today: NaiveDate, rng: &mut MetricsRng) -> Vec<RevenueDataPoint> {
        let cfg = &self.config;
        let start = self.start_date(today);
        let mut base = cfg.base_mrr;
        let mut series = Vec::with_capacity(self.periods);

        for i in 0..self.periods {
            base *= cfg.growth.sample(rng);

            let new_mrr = base * cfg.new_share.sample(rng);
            let expansion_mrr = base * cfg.expansion_share.sample(rng);
            let contraction_mrr = base * cfg.contraction_share.sample(rng);
            let churned_mrr = base * cfg.churned_share.sample(rng);

            let customers = (base / cfg.revenue_per_customer).round() as i64;
            let arpu = if customers > 0 {
                (base / customers as f64).round() as Dollars
            } else {
                base.round() as Dollars
            };

            let offset = (i as u64).saturating_mul(cfg.period_spacing_days);
            series.push(RevenueDataPoint {
                period: month_label(days_after(start, offset)),
                mrr: base.round() as Dollars,
                new_mrr: new_mrr.round() as Dollars,
                expansion_mrr: expansion_mrr.round() as Dollars,
                contraction_mrr: contraction_mrr.round() as Dollars,
                churned_mrr: churned_mrr.round() as Dollars,
                customers,
                arpu,
            });
        }

        log::debug!(
            "revenue: {} periods from {start}, final mrr={:.0}",
            self.periods,
            base
        );
        series
    }
}
