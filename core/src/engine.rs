//! The metrics engine: one entry point for every dashboard dataset.
//!
//! RULES:
//!   - Generators never touch an ambient RNG; the engine hands each call
//!     its own stream from the RngBank.
//!   - A seeded engine replays the same sequence of datasets.
//!   - An unseeded engine draws its master seed from OS entropy once.
//!   - Nothing generated is cached; every call produces fresh data.

use crate::{
    acquisition_generator::{AcquisitionChannelRecord, AcquisitionGenerator},
    catalog,
    clock::ReferenceClock,
    cohort_generator::{CohortGenerator, CohortRecord},
    command::{clamp_count, DatasetRequest, DatasetResponse},
    config::GeneratorConfig,
    customer_generator::{CustomerGenerator, CustomerRecord},
    error::MetricsResult,
    generator::MetricsGenerator,
    revenue_generator::{RevenueDataPoint, RevenueGenerator},
    rng::{GeneratorSlot, RngBank},
    snapshot::{DashboardSnapshot, KpiCard},
    sparkline_generator::{SparklineGenerator, SparklinePoint},
    types::Trend,
};
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct MetricsEngine {
    pub clock: ReferenceClock,
    pub config: GeneratorConfig,
    rng_bank: RngBank,
    calls: HashMap<GeneratorSlot, u64>,
}

impl MetricsEngine {
    /// Seeded engine. Fails only if `config` does not validate.
    pub fn new(seed: u64, config: GeneratorConfig) -> MetricsResult<Self> {
        config.validate()?;
        log::info!("engine: seeded with {seed}");
        Ok(Self::from_parts(RngBank::new(seed), config))
    }

    /// Engine for interactive use: a fresh master seed every construction.
    pub fn unseeded(config: GeneratorConfig) -> MetricsResult<Self> {
        config.validate()?;
        let bank = RngBank::from_entropy();
        log::info!("engine: unseeded (master seed {})", bank.master_seed());
        Ok(Self::from_parts(bank, config))
    }

    /// Seeded engine with default config and a pinned date (2025-01-15).
    pub fn build_test(seed: u64) -> Self {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default();
        Self::from_parts(RngBank::new(seed), GeneratorConfig::default_test())
            .with_clock(ReferenceClock::fixed(today))
    }

    fn from_parts(rng_bank: RngBank, config: GeneratorConfig) -> Self {
        Self {
            clock: ReferenceClock::System,
            config,
            rng_bank,
            calls: HashMap::new(),
        }
    }

    pub fn with_clock(mut self, clock: ReferenceClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Index of the next call for `slot`, advancing the counter.
    fn next_call(&mut self, slot: GeneratorSlot) -> u64 {
        let counter = self.calls.entry(slot).or_insert(0);
        let call = *counter;
        *counter += 1;
        call
    }

    /// Run any generator on its own fresh stream.
    pub fn run<G: MetricsGenerator>(&mut self, generator: &G) -> Vec<G::Record> {
        let slot = generator.slot();
        let call = self.next_call(slot);
        let mut rng = self.rng_bank.for_generator_at_call(slot, call);
        let records = generator.generate(self.today(), &mut rng);
        log::debug!(
            "engine: {} call={call} produced {} records",
            generator.name(),
            records.len()
        );
        records
    }

    pub fn revenue_series(&mut self, periods: usize) -> Vec<RevenueDataPoint> {
        let generator = RevenueGenerator::with_config(periods, self.config.revenue.clone());
        self.run(&generator)
    }

    pub fn customer_batch(&mut self, count: usize) -> Vec<CustomerRecord> {
        let generator = CustomerGenerator::with_config(count, self.config.customers.clone());
        self.run(&generator)
    }

    pub fn cohort_table(&mut self) -> Vec<CohortRecord> {
        let generator = CohortGenerator::with_config(self.config.cohorts.clone());
        self.run(&generator)
    }

    pub fn acquisition_channels(&mut self) -> Vec<AcquisitionChannelRecord> {
        let generator = AcquisitionGenerator::with_channels(self.config.channels.clone());
        self.run(&generator)
    }

    pub fn sparkline(&mut self, trend: Trend) -> Vec<SparklinePoint> {
        let generator = SparklineGenerator::with_config(trend, self.config.sparkline.clone());
        self.run(&generator)
    }

    /// Everything the overview page shows, generated in one go.
    pub fn snapshot(&mut self) -> DashboardSnapshot {
        let call = self.next_call(GeneratorSlot::Snapshot);
        let mut id_rng = self.rng_bank.for_generator_at_call(GeneratorSlot::Snapshot, call);
        let mut bytes = [0u8; 16];
        id_rng.fill_bytes(&mut bytes);
        let snapshot_id = uuid::Builder::from_random_bytes(bytes).into_uuid();

        let kpis: Vec<KpiCard> = catalog::dashboard_kpis()
            .into_iter()
            .map(|kpi| {
                let sparkline = self.sparkline(kpi.metric.trend);
                KpiCard::new(kpi, sparkline)
            })
            .collect();

        let dashboard = self.config.dashboard.clone();
        let snapshot = DashboardSnapshot {
            snapshot_id,
            generated_on: self.today(),
            seed: self.seed(),
            kpis,
            revenue: self.revenue_series(dashboard.revenue_periods),
            customers: self.customer_batch(dashboard.customer_count),
            cohorts: self.cohort_table(),
            channels: self.acquisition_channels(),
            revenue_breakdown: catalog::revenue_breakdown(),
            revenue_by_plan: catalog::revenue_by_plan(),
            churn_reasons: catalog::churn_reasons(),
            recent_activity: catalog::recent_activity(),
            funnel: catalog::conversion_funnel(),
        };
        log::info!("engine: snapshot {} for {}", snapshot.snapshot_id, snapshot.generated_on);
        snapshot
    }

    /// Answer a dataset request. `Quit` has no response.
    pub fn handle(&mut self, request: &DatasetRequest) -> Option<DatasetResponse> {
        let response = match *request {
            DatasetRequest::Revenue { periods } => {
                DatasetResponse::Revenue(self.revenue_series(clamp_count(periods, "revenue")))
            }
            DatasetRequest::Customers { count } => {
                DatasetResponse::Customers(self.customer_batch(clamp_count(count, "customers")))
            }
            DatasetRequest::Cohorts => DatasetResponse::Cohorts(self.cohort_table()),
            DatasetRequest::Channels => DatasetResponse::Channels(self.acquisition_channels()),
            DatasetRequest::Sparkline { trend } => DatasetResponse::Sparkline(self.sparkline(trend)),
            DatasetRequest::Snapshot => DatasetResponse::Snapshot(Box::new(self.snapshot())),
            DatasetRequest::Quit => return None,
        };
        Some(response)
    }
}
