//! Sparkline series tests.

use metricshub_core::{engine::MetricsEngine, types::Trend};

#[test]
fn thirty_bounded_points_for_every_trend() {
    let mut engine = MetricsEngine::build_test(99);
    for trend in [Trend::Up, Trend::Down, Trend::Stable] {
        for _ in 0..200 {
            let points = engine.sparkline(trend);
            assert_eq!(points.len(), 30);
            assert!(
                points.iter().all(|p| (10..=90).contains(&p.value)),
                "{trend}: {points:?}"
            );
        }
    }
}

/// A long up walk should hit the ceiling and stay clamped there.
#[test]
fn long_walk_is_clamped() {
    let mut engine = MetricsEngine::build_test(3);
    engine.config.sparkline.points = 400;
    let points = engine.sparkline(Trend::Up);
    assert_eq!(points.len(), 400);
    assert_eq!(points.iter().map(|p| p.value).max(), Some(90));
    assert!(points.iter().all(|p| p.value <= 90));

    let points = engine.sparkline(Trend::Down);
    assert_eq!(points.iter().map(|p| p.value).min(), Some(10));
}
