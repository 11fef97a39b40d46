//! Unit tests for the series preparator

use backtrix::engine::prepare_series;
use backtrix::models::PricePoint;
use chrono::{Duration, TimeZone, Utc};

fn create_series(closes: &[f64]) -> Vec<PricePoint> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            timestamp: base + Duration::days(i as i64),
            close,
        })
        .collect()
}

#[test]
fn output_is_aligned_to_input() {
    let series = create_series(&[100.0, 101.0, 102.0, 103.0]);
    let averaged = prepare_series(&series, 2, 3);
    assert_eq!(averaged.len(), series.len());
    for (point, avg) in series.iter().zip(&averaged) {
        assert_eq!(avg.timestamp, point.timestamp);
        assert_eq!(avg.close, point.close);
    }
}

#[test]
fn first_point_averages_equal_its_close() {
    let series = create_series(&[42.5, 50.0, 60.0]);
    let averaged = prepare_series(&series, 10, 50);
    assert_eq!(averaged[0].short_avg, 42.5);
    assert_eq!(averaged[0].long_avg, 42.5);
}

#[test]
fn window_shrinks_at_the_start() {
    // Before the window fills, the mean is taken over what is available
    let series = create_series(&[100.0, 110.0, 120.0, 130.0]);
    let averaged = prepare_series(&series, 3, 50);
    assert_eq!(averaged[0].short_avg, 100.0);
    assert_eq!(averaged[1].short_avg, 105.0);
    assert_eq!(averaged[2].short_avg, 110.0);
    // Window full: mean of the last 3 closes only
    assert_eq!(averaged[3].short_avg, 120.0);
}

#[test]
fn full_window_slides_over_the_series() {
    let closes: Vec<f64> = (1..=10).map(f64::from).collect();
    let series = create_series(&closes);
    let averaged = prepare_series(&series, 2, 4);
    // short: mean of the last 2; long: mean of the last 4
    assert_eq!(averaged[9].short_avg, 9.5);
    assert_eq!(averaged[9].long_avg, 8.5);
}

#[test]
fn window_of_one_tracks_the_close() {
    let series = create_series(&[5.0, 7.0, 3.0]);
    let averaged = prepare_series(&series, 1, 2);
    for avg in &averaged {
        assert_eq!(avg.short_avg, avg.close);
    }
}

#[test]
fn averages_are_always_finite() {
    let closes: Vec<f64> = (0..100).map(|i| 100.0 + (i % 7) as f64).collect();
    let series = create_series(&closes);
    let averaged = prepare_series(&series, 10, 50);
    for avg in &averaged {
        assert!(avg.short_avg.is_finite());
        assert!(avg.long_avg.is_finite());
    }
}
