//! Acquisition channel tests.

use metricshub_core::{acquisition_generator::AcquisitionGenerator, engine::MetricsEngine};

#[test]
fn six_fixed_channels() {
    let mut engine = MetricsEngine::build_test(1);
    let channels = engine.acquisition_channels();
    let names: Vec<&str> = channels.iter().map(|c| c.channel.as_str()).collect();
    assert_eq!(
        names,
        ["Organic Search", "Paid Ads", "Referral", "Social Media", "Direct", "Email"]
    );
}

#[test]
fn funnels_never_widen() {
    for c in AcquisitionGenerator::new().channels() {
        assert!(c.visitors >= c.signups, "{}", c.channel);
        assert!(c.signups >= c.trials, "{}", c.channel);
        assert!(c.trials >= c.converted, "{}", c.channel);
    }
}

#[test]
fn conversion_rate_is_converted_over_visitors() {
    for c in AcquisitionGenerator::new().channels() {
        let exact = c.converted as f64 / c.visitors as f64 * 100.0;
        assert!((c.conversion_rate - exact).abs() <= 0.05, "{}: {}", c.channel, c.conversion_rate);
    }
}

/// Not randomized: every call and every seed gives the same table.
#[test]
fn channels_ignore_the_seed() {
    let a = MetricsEngine::build_test(1).acquisition_channels();
    let b = MetricsEngine::build_test(2).acquisition_channels();
    assert_eq!(a, b);
}
