use crate::{
    config::{FloatRange, SparklineConfig},
    generator::MetricsGenerator,
    rng::{GeneratorSlot, MetricsRng},
    types::Trend,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparklinePoint {
    pub day: u32,
    pub value: i64,
}

/// Bounded random walk for the small trend charts on metric cards.
pub struct SparklineGenerator {
    trend: Trend,
    config: SparklineConfig,
}

impl SparklineGenerator {
    pub fn new(trend: Trend) -> Self {
        Self::with_config(trend, SparklineConfig::default())
    }

    pub fn with_config(trend: Trend, config: SparklineConfig) -> Self {
        Self { trend, config }
    }

    fn step(&self) -> FloatRange {
        match self.trend {
            Trend::Up => self.config.up_step,
            Trend::Down => self.config.down_step,
            Trend::Stable => self.config.stable_step,
        }
    }
}

impl MetricsGenerator for SparklineGenerator {
    type Record = SparklinePoint;

    fn name(&self) -> &'static str {
        "sparkline"
    }

    fn slot(&self) -> GeneratorSlot {
        GeneratorSlot::Sparkline
    }

    fn generate(&self, _today: NaiveDate, rng: &mut MetricsRng) -> Vec<SparklinePoint> {
        let cfg = &self.config;
        let step = self.step();
        let bound = |v: f64| v.max(cfg.floor).min(cfg.ceiling);
        let mut value = bound(cfg.start);

        let points: Vec<_> = (0..cfg.points)
            .map(|day| {
                value = bound(value + step.sample(rng));
                SparklinePoint { day, value: value.round() as i64 }
            })
            .collect();

        log::debug!(
            "sparkline: trend={} last={}",
            self.trend,
            points.last().map(|p| p.value).unwrap_or_default()
        );
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn days_are_sequential_from_zero() {
        let mut rng = MetricsRng::new(11);
        let points = SparklineGenerator::new(Trend::Stable).generate(today(), &mut rng);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.day as usize, i);
        }
    }

    #[test]
    fn first_step_moves_from_fifty() {
        let mut rng = MetricsRng::new(12);
        let points = SparklineGenerator::new(Trend::Up).generate(today(), &mut rng);
        assert!((49..=53).contains(&points[0].value), "value={}", points[0].value);
    }

    #[test]
    fn up_trend_drifts_higher_than_down_trend() {
        let mut up_total = 0;
        let mut down_total = 0;
        for seed in 0..50 {
            let mut rng = MetricsRng::new(seed);
            up_total += SparklineGenerator::new(Trend::Up).generate(today(), &mut rng)[29].value;
            let mut rng = MetricsRng::new(seed);
            down_total += SparklineGenerator::new(Trend::Down).generate(today(), &mut rng)[29].value;
        }
        assert!(up_total > down_total, "up={up_total} down={down_total}");
    }
}
