use crate::{
    config::{default_channels, ChannelConfig},
    generator::MetricsGenerator,
    rng::{GeneratorSlot, MetricsRng},
    types::Dollars,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionChannelRecord {
    pub channel: String,
    pub visitors: u64,
    pub signups: u64,
    pub trials: u64,
    pub converted: u64,
    pub cac: Dollars,
    pub ltv: Dollars,
    /// converted / visitors, as a percentage with one decimal.
    pub conversion_rate: f64,
    /// signups / visitors, as a percentage with one decimal.
    pub signup_rate: f64,
}

impl AcquisitionChannelRecord {
    pub fn from_config(ch: &ChannelConfig) -> Self {
        Self {
            channel: ch.channel.clone(),
            visitors: ch.visitors,
            signups: ch.signups,
            trials: ch.trials,
            converted: ch.converted,
            cac: ch.cac,
            ltv: ch.ltv,
            conversion_rate: percent_of(ch.converted, ch.visitors),
            signup_rate: percent_of(ch.signups, ch.visitors),
        }
    }

    /// LTV / CAC. `None` when acquisition is free (unbounded return).
    pub fn roi(&self) -> Option<f64> {
        if self.cac > 0 {
            Some(self.ltv as f64 / self.cac as f64)
        } else {
            None
        }
    }

    pub fn funnel(&self) -> [u64; 4] {
        [self.visitors, self.signups, self.trials, self.converted]
    }
}

/// `part / whole * 100`, rounded to one decimal. Zero when `whole` is zero.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

/// Fixed, hand-authored channel table. Never randomized; the random
/// source passed to generate() is ignored.
pub struct AcquisitionGenerator {
    channels: Vec<ChannelConfig>,
}

impl AcquisitionGenerator {
    pub fn new() -> Self {
        Self::with_channels(default_channels())
    }

    pub fn with_channels(channels: Vec<ChannelConfig>) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> Vec<AcquisitionChannelRecord> {
        self.channels.iter().map(AcquisitionChannelRecord::from_config).collect()
    }
}

impl Default for AcquisitionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsGenerator for AcquisitionGenerator {
    type Record = AcquisitionChannelRecord;

    fn name(&self) -> &'static str {
        "acquisition"
    }

    fn slot(&self) -> GeneratorSlot {
        GeneratorSlot::Acquisition
    }

    fn generate(&self, _today: NaiveDate, _rng: &mut MetricsRng) -> Vec<AcquisitionChannelRecord> {
        let records = self.channels();
        log::debug!("acquisition: {} channels", records.len());
        records
    }
}
