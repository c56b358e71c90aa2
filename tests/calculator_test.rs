//! Pace calculator behaviour through the public API.

use united_runners::calculator::{
    compute, format_pace, format_speed, format_time, CalculatorInput, DistanceUnit,
    REFERENCE_DISTANCES,
};

fn input(distance: &str, unit: DistanceUnit, h: &str, m: &str, s: &str) -> CalculatorInput {
    CalculatorInput {
        distance: distance.to_string(),
        unit,
        hours: h.to_string(),
        minutes: m.to_string(),
        seconds: s.to_string(),
    }
}

#[test]
fn test_pace_and_speed_are_reciprocal() {
    let cases = [
        ("10", "0", "50", "0"),
        ("5", "0", "22", "15"),
        ("21,0975", "1", "45", "10"),
        ("42.195", "3", "55", "0"),
        ("0.4", "0", "1", "20"),
    ];
    for (distance, h, m, s) in cases {
        let result = compute(&input(distance, DistanceUnit::Kilometers, h, m, s));
        assert!(result.distance_km > 0.0 && result.total_minutes > 0.0);
        assert!((result.pace - result.total_minutes / result.distance_km).abs() < 1e-9);
        assert!(
            (result.speed - result.distance_km / (result.total_minutes / 60.0)).abs() < 1e-9
        );
        assert!((result.speed * result.pace - 60.0).abs() < 1e-9);
    }
}

#[test]
fn test_placeholders() {
    assert_eq!(format_pace(0.0), "0:00");
    assert_eq!(format_pace(f64::NAN), "0:00");
    assert_eq!(format_pace(f64::INFINITY), "0:00");
    assert_eq!(format_time(0.0), "-");
    assert_eq!(format_time(3661.0), "1:01:01");
    assert_eq!(format_time(125.0), "2:05");
}

#[test]
fn test_ten_km_in_fifty_minutes() {
    let result = compute(&input("10", DistanceUnit::Kilometers, "0", "50", "0"));

    assert_eq!(result.total_minutes, 50.0);
    assert_eq!(result.pace, 5.0);
    assert_eq!(format_pace(result.pace), "5:00");
    assert_eq!(format_speed(result.speed), "12.00");

    let marathon = result
        .predictions
        .iter()
        .find(|p| p.distance.label == "Марафон")
        .unwrap();
    assert!((marathon.seconds - 12658.5).abs() < 1e-6);
    assert_eq!(format_time(marathon.seconds), "3:30:59");

    let rendered: Vec<String> = result
        .predictions
        .iter()
        .map(|p| format_time(p.seconds))
        .collect();
    assert_eq!(
        rendered,
        vec!["2:00", "5:00", "15:00", "25:00", "50:00", "1:45:29", "3:30:59", "8:20:00"]
    );
}

#[test]
fn test_zero_distance_predicts_nothing() {
    let result = compute(&input("0", DistanceUnit::Kilometers, "1", "10", "5"));
    assert_eq!(result.pace, 0.0);
    assert_eq!(result.speed, 0.0);
    assert_eq!(result.predictions.len(), REFERENCE_DISTANCES.len());
    for prediction in &result.predictions {
        assert_eq!(format_time(prediction.seconds), "-");
    }
}

#[test]
fn test_meters_match_kilometers() {
    let km = compute(&input("10", DistanceUnit::Kilometers, "0", "47", "33"));
    let m = compute(&input("10000", DistanceUnit::Meters, "0", "47", "33"));
    assert_eq!(km.pace, m.pace);
    assert_eq!(km.speed, m.speed);
    assert_eq!(km.predictions, m.predictions);
}

#[test]
fn test_garbage_input_renders_placeholders() {
    let result = compute(&input("abc", DistanceUnit::Kilometers, "x", "", "?"));
    assert_eq!(result.pace_display(), "0:00");
    assert_eq!(result.speed_display(), "0.00");
    assert!(result.predictions.iter().all(|p| format_time(p.seconds) == "-"));
}

#[test]
fn test_reference_distances_in_order() {
    let km: Vec<f64> = REFERENCE_DISTANCES.iter().map(|d| d.km).collect();
    assert_eq!(km, vec![0.4, 1.0, 3.0, 5.0, 10.0, 21.0975, 42.195, 100.0]);
}

#[test]
fn test_negative_minutes_give_negative_pace() {
    let result = compute(&input("10", DistanceUnit::Kilometers, "0", "-50", "0"));
    assert_eq!(result.pace_display(), "-5:00");
    assert_eq!(result.speed_display(), "0.00");

    let five_km = result
        .predictions
        .iter()
        .find(|p| p.distance.km == 5.0)
        .unwrap();
    assert_eq!(format_time(five_km.seconds), "-25:00");
}
