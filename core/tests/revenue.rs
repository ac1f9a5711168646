//! Revenue series generation tests.

use chrono::NaiveDate;
use metricshub_core::{
    engine::MetricsEngine, generator::MetricsGenerator, revenue_generator::RevenueGenerator,
    rng::MetricsRng,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn series_has_requested_length() {
    let mut engine = MetricsEngine::build_test(42);
    for n in [0, 1, 6, 12, 36] {
        assert_eq!(engine.revenue_series(n).len(), n, "periods={n}");
    }
}

/// Each period compounds the previous one by a factor in [1.02, 1.10).
/// Rounding to whole dollars costs at most ~2e-5 relative error.
#[test]
fn consecutive_growth_stays_within_bounds() {
    for seed in 0..25 {
        let mut rng = MetricsRng::new(seed);
        let series = RevenueGenerator::new(24).generate(today(), &mut rng);

        let first = series[0].mrr as f64 / 45_000.0;
        assert!((1.02 - 1e-4..1.10 + 1e-4).contains(&first), "seed={seed} first={first}");

        for pair in series.windows(2) {
            let growth = pair[1].mrr as f64 / pair[0].mrr as f64;
            assert!(
                (1.02 - 1e-4..1.10 + 1e-4).contains(&growth),
                "seed={seed} {} -> {}: growth={growth}",
                pair[0].period,
                pair[1].period
            );
        }
    }
}

#[test]
fn revenue_is_positive_and_components_are_fractions() {
    let mut rng = MetricsRng::new(7);
    for p in RevenueGenerator::new(12).generate(today(), &mut rng) {
        assert!(p.mrr > 0);
        let mrr = p.mrr as f64;
        // Independent shares of the base, allow one dollar of rounding.
        assert!(p.new_mrr as f64 >= mrr * 0.12 - 1.0 && p.new_mrr as f64 <= mrr * 0.18 + 1.0);
        assert!(p.expansion_mrr as f64 >= mrr * 0.04 - 1.0 && p.expansion_mrr as f64 <= mrr * 0.08 + 1.0);
        assert!(p.contraction_mrr as f64 >= mrr * 0.01 - 1.0 && p.contraction_mrr as f64 <= mrr * 0.03 + 1.0);
        assert!(p.churned_mrr as f64 >= mrr * 0.02 - 1.0 && p.churned_mrr as f64 <= mrr * 0.04 + 1.0);
        assert!(p.customers > 0);
    }
}

#[test]
fn customer_count_follows_revenue_per_customer() {
    let mut rng = MetricsRng::new(8);
    for p in RevenueGenerator::new(12).generate(today(), &mut rng) {
        let expected = (p.mrr as f64 / 69.0).round() as i64;
        assert!((p.customers - expected).abs() <= 1, "{} vs {expected}", p.customers);
    }
}

/// Walk is upward-biased: over twelve periods total growth is at least 1.02^12.
#[test]
fn series_trends_upward() {
    let mut rng = MetricsRng::new(9);
    let series = RevenueGenerator::new(12).generate(today(), &mut rng);
    let total = series[11].mrr as f64 / series[0].mrr as f64;
    assert!(total >= 1.02f64.powi(11) - 1e-3, "total growth {total}");
}

#[test]
fn labels_are_month_year_strings() {
    let mut engine = MetricsEngine::build_test(1);
    for p in engine.revenue_series(12) {
        let parts: Vec<&str> = p.period.split(' ').collect();
        assert_eq!(parts.len(), 2, "label {}", p.period);
        assert_eq!(parts[0].len(), 3);
        assert!(parts[1].parse::<i32>().is_ok());
    }
}
