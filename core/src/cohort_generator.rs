use crate::{
    clock::{month_label, month_start_before},
    config::CohortConfig,
    generator::MetricsGenerator,
    rng::{GeneratorSlot, MetricsRng},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Retention of a cohort in its join month.
pub const INITIAL_RETENTION: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRecord {
    pub cohort: String,
    pub size: u32,
    /// Percent of the cohort retained at month 0, 1, 2, ...
    pub retention: Vec<u32>,
}

impl CohortRecord {
    /// Retention at `month`, if the cohort is old enough to have it.
    pub fn retention_at(&self, month: usize) -> Option<u32> {
        self.retention.get(month).copied()
    }
}

/// Heat-map band for a retention percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionBand {
    Excellent,
    Good,
    Fair,
    Weak,
    Critical,
}

impl RetentionBand {
    pub fn for_value(percent: u32) -> Self {
        match percent {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            20..=39 => Self::Weak,
            _ => Self::Critical,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#22C55E",
            Self::Good => "#84CC16",
            Self::Fair => "#F59E0B",
            Self::Weak => "#F97316",
            Self::Critical => "#EF4444",
        }
    }
}

/// Monthly cohorts with decelerating churn.
///
/// Cohort i (0 = oldest) has `cohort_count + 1 - i` retention points:
/// newer cohorts have had fewer months to churn.
pub struct CohortGenerator {
    config: CohortConfig,
}

impl CohortGenerator {
    pub fn new() -> Self {
        Self::with_config(CohortConfig::default())
    }

    pub fn with_config(config: CohortConfig) -> Self {
        Self { config }
    }

    fn retention_curve(&self, months: u32, rng: &mut MetricsRng) -> Vec<u32> {
        let cfg = &self.config;
        let mut retention = Vec::with_capacity(months as usize + 1);
        retention.push(INITIAL_RETENTION);

        let mut current = f64::from(INITIAL_RETENTION);
        for j in 1..=months {
            let drop = cfg.drop.sample(rng);
            let damping = cfg.damping_slope * f64::from(j) + 1.0;
            current = (current - drop / damping).max(cfg.retention_floor);
            retention.push(current.round() as u32);
        }
        retention
    }
}

impl Default for CohortGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsGenerator for CohortGenerator {
    type Record = CohortRecord;

    fn name(&self) -> &'static str {
        "cohorts"
    }

    fn slot(&self) -> GeneratorSlot {
        GeneratorSlot::Cohorts
    }

    fn generate(&self, today: NaiveDate, rng: &mut MetricsRng) -> Vec<CohortRecord> {
        let n = self.config.cohort_count;
        let mut cohorts = Vec::with_capacity(n as usize);

        for i in 0..n {
            let months_elapsed = n - i;
            let retention = self.retention_curve(months_elapsed, rng);
            let size = self.config.size_min
                + rng.next_u64_below(u64::from(self.config.size_span)) as u32;
            cohorts.push(CohortRecord {
                cohort: month_label(month_start_before(today, months_elapsed - 1)),
                size,
                retention,
            });
        }

        log::debug!("cohorts: generated {} cohorts ending {}", cohorts.len(), month_label(today));
        cohorts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    #[test]
    fn labels_cover_twelve_months_ending_this_month() {
        let mut rng = MetricsRng::new(1);
        let cohorts = CohortGenerator::new().generate(today(), &mut rng);
        assert_eq!(cohorts[0].cohort, "Apr 2024");
        assert_eq!(cohorts[11].cohort, "Mar 2025");
    }

    #[test]
    fn sizes_fall_in_range() {
        let mut rng = MetricsRng::new(2);
        for _ in 0..50 {
            for c in CohortGenerator::new().generate(today(), &mut rng) {
                assert!((50..200).contains(&c.size), "size={}", c.size);
            }
        }
    }

    #[test]
    fn huge_drops_stop_at_the_floor() {
        let config = CohortConfig {
            drop: crate::config::FloatRange::new(500.0, 600.0),
            ..CohortConfig::default()
        };
        let mut rng = MetricsRng::new(3);
        let cohorts = CohortGenerator::with_config(config).generate(today(), &mut rng);
        assert_eq!(cohorts[0].retention[0], 100);
        assert!(cohorts[0].retention[1..].iter().all(|&r| r == 20));
    }

    #[test]
    fn bands_match_heatmap_thresholds() {
        assert_eq!(RetentionBand::for_value(100), RetentionBand::Excellent);
        assert_eq!(RetentionBand::for_value(80), RetentionBand::Excellent);
        assert_eq!(RetentionBand::for_value(79), RetentionBand::Good);
        assert_eq!(RetentionBand::for_value(40), RetentionBand::Fair);
        assert_eq!(RetentionBand::for_value(20), RetentionBand::Weak);
        assert_eq!(RetentionBand::for_value(19), RetentionBand::Critical);
        assert_eq!(RetentionBand::Critical.color(), "#EF4444");
    }

    #[test]
    fn retention_at_past_the_end_is_none() {
        let record = CohortRecord { cohort: "Jan 2025".into(), size: 10, retention: vec![100, 90] };
        assert_eq!(record.retention_at(1), Some(90));
        assert_eq!(record.retention_at(2), None);
    }
}
