use crate::{
    clock::days_before,
    config::{CustomerConfig, PlanConfig},
    generator::MetricsGenerator,
    name_generator::NameGenerator,
    rng::{GeneratorSlot, MetricsRng},
    types::{CustomerStatus, Dollars, PlanTier},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: PlanTier,
    pub mrr: Dollars,
    pub health: u32,
    pub status: CustomerStatus,
    pub joined_at: NaiveDate,
    /// Drawn independently of `joined_at`; not guaranteed to be later.
    pub last_active: NaiveDate,
}

pub struct CustomerGenerator {
    count: usize,
    config: CustomerConfig,
}

impl CustomerGenerator {
    pub fn new(count: usize) -> Self {
        Self::with_config(count, CustomerConfig::default())
    }

    pub fn with_config(count: usize, config: CustomerConfig) -> Self {
        Self { count, config }
    }

    pub fn customer_id(index: usize) -> String {
        format!("cust_{:04}", index + 1)
    }

    fn pick_plan<'a>(&'a self, rng: &mut MetricsRng) -> Option<&'a PlanConfig> {
        let roll = rng.next_f64();
        let mut cumulative = 0.0;
        for plan in &self.config.plans {
            cumulative += plan.weight;
            if roll < cumulative {
                return Some(plan);
            }
        }
        self.config.plans.last()
    }

    fn build_record(&self, index: usize, today: NaiveDate, rng: &mut MetricsRng) -> CustomerRecord {
        let cfg = &self.config;
        let (plan, mrr) = self
            .pick_plan(rng)
            .map(|p| (p.tier, p.monthly_price))
            .unwrap_or((PlanTier::Basic, 0));

        let health = cfg.health_min + rng.next_u64_below(u64::from(cfg.health_span)) as u32;
        let status = CustomerStatus::from_health(health);

        let company = NameGenerator::base_company(&cfg.companies, index);
        let joined_at = days_before(today, rng.next_u64_below(cfg.join_window_days));
        let last_active = days_before(today, rng.next_u64_below(cfg.last_active_window_days));

        CustomerRecord {
            id: Self::customer_id(index),
            name: NameGenerator::company_name(&cfg.companies, index),
            email: NameGenerator::contact_email(company, cfg),
            plan,
            mrr,
            health,
            status,
            joined_at,
            last_active,
        }
    }
}

impl MetricsGenerator for CustomerGenerator {
    type Record = CustomerRecord;

    fn name(&self) -> &'static str {
        "customers"
    }

    fn slot(&self) -> GeneratorSlot {
        GeneratorSlot::Customers
    }

    fn generate(&self, today: NaiveDate, rng: &mut MetricsRng) -> Vec<CustomerRecord> {
        let batch: Vec<_> = (0..self.count)
            .map(|i| self.build_record(i, today, rng))
            .collect();

        let at_risk = batch.iter().filter(|c| c.status == CustomerStatus::AtRisk).count();
        log::debug!("customers: generated {} records, {at_risk} at risk", batch.len());
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn ids_are_padded_and_sequential() {
        assert_eq!(CustomerGenerator::customer_id(0), "cust_0001");
        assert_eq!(CustomerGenerator::customer_id(19), "cust_0020");
        assert_eq!(CustomerGenerator::customer_id(12_344), "cust_12345");
    }

    #[test]
    fn price_follows_plan() {
        let mut rng = MetricsRng::new(3);
        for c in CustomerGenerator::new(500).generate(today(), &mut rng) {
            let expected = match c.plan {
                PlanTier::Enterprise => 1500,
                PlanTier::Pro => 149,
                PlanTier::Basic => 9,
            };
            assert_eq!(c.mrr, expected, "{}", c.id);
        }
    }

    #[test]
    fn health_range_is_forty_to_ninety_nine() {
        let mut rng = MetricsRng::new(4);
        let batch = CustomerGenerator::new(2_000).generate(today(), &mut rng);
        assert!(batch.iter().all(|c| (40..100).contains(&c.health)));
        assert!(batch.iter().any(|c| c.health == 40));
        assert!(batch.iter().any(|c| c.health == 99));
    }

    #[test]
    fn empty_plan_table_falls_back_to_free_basic() {
        let config = CustomerConfig { plans: vec![], ..CustomerConfig::default() };
        let mut rng = MetricsRng::new(5);
        let batch = CustomerGenerator::with_config(3, config).generate(today(), &mut rng);
        assert!(batch.iter().all(|c| c.plan == PlanTier::Basic && c.mrr == 0));
    }
}
