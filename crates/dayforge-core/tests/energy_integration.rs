//! Integration tests for energy analytics.

use chrono_tz::Tz;
use dayforge_core::{
    find_optimal_task_time, render_energy_chart, EnergyAnalyzer, EnergyLevel, EnergyLogEntry,
    EnergyTrend, TimeOfDay, Timestamp,
};

fn entry(ts: &str, level: u8) -> EnergyLogEntry {
    EnergyLogEntry::new(ts, Timestamp::parse(ts).unwrap(), level)
}

fn load(json: &str) -> Vec<EnergyLogEntry> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_full_energy_workflow_from_json_rows() {
    let entries = load(
        r#"[
            {"id":"1","user_id":"u","timestamp":"2024-01-01T09:15:00","energy_level":8,
             "time_of_day":"morning","context":"after coffee","task_id":null,"task_was_energizing":true},
            {"id":"2","user_id":"u","timestamp":"2024-01-02T09:45:00","energy_level":6},
            {"id":"3","user_id":"u","timestamp":"2024-01-01T14:00:00","energy_level":5},
            {"id":"4","user_id":"u","timestamp":"2024-01-02T14:30:00","energy_level":3},
            {"id":"5","user_id":"u","timestamp":"2024-01-02T22:10:00","energy_level":2}
        ]"#,
    );
    let analyzer = EnergyAnalyzer::new();

    let curve = analyzer.build_energy_curve(&entries);
    assert_eq!(curve.len(), 24);
    assert_eq!(curve[9].average_energy, 7.0);
    assert_eq!(curve[9].sample_count, 2);
    assert_eq!(curve[14].average_energy, 4.0);
    assert_eq!(curve[22].sample_count, 1);

    let segments = analyzer.build_time_of_day_energy(&entries);
    assert_eq!(segments[&TimeOfDay::Morning], 7.0);
    assert_eq!(segments[&TimeOfDay::Midday], 4.0);
    assert_eq!(segments[&TimeOfDay::Night], 2.0);

    assert_eq!(analyzer.find_peak_energy_time(&entries), Some("morning"));

    let high = find_optimal_task_time(EnergyLevel::High, &curve).unwrap();
    assert_eq!(high.hour, 9);
    let low = find_optimal_task_time(EnergyLevel::Low, &curve).unwrap();
    assert_eq!(low.hour, 14);

    let heatmap = analyzer.build_energy_heatmap(&entries);
    assert_eq!(heatmap.len(), 5);
}

#[test]
fn test_heatmap_averaging_example() {
    let entries = vec![entry("2024-01-01T09:00:00", 10), entry("2024-01-01T09:30:00", 6)];
    let cells = EnergyAnalyzer::new().build_energy_heatmap(&entries);
    assert_eq!(cells.len(), 1);
    let json = serde_json::to_value(&cells[0]).unwrap();
    assert_eq!(json, serde_json::json!({"date": "2024-01-01", "hour": 9, "energy_level": 8.0}));
}

#[test]
fn test_empty_data_defaults() {
    let analyzer = EnergyAnalyzer::new();
    let curve = analyzer.build_energy_curve(&[]);
    for (h, point) in curve.iter().enumerate() {
        assert_eq!(point.hour as usize, h);
        assert_eq!(point.average_energy, 0.0);
        assert_eq!(point.sample_count, 0);
    }
    assert_eq!(analyzer.find_peak_energy_time(&[]), None);
    assert_eq!(find_optimal_task_time(EnergyLevel::High, &[]), None);
    assert_eq!(find_optimal_task_time(EnergyLevel::High, &curve), None);
}

#[test]
fn test_trend_over_two_weeks() {
    let mut entries = Vec::new();
    for day in 1..=7 {
        entries.push(entry(&format!("2024-02-{day:02}T10:00:00"), 5));
    }
    for day in 8..=14 {
        entries.push(entry(&format!("2024-02-{day:02}T10:00:00"), 8));
    }
    let analyzer = EnergyAnalyzer::new();

    let result = analyzer.classify_energy_trend(&entries);
    assert_eq!(result.trend, EnergyTrend::Improving);
    assert!(result.change > 0.0);

    // Same readings, later days lower.
    let reversed: Vec<_> = entries
        .iter()
        .zip(entries.iter().rev())
        .map(|(slot, reading)| {
            EnergyLogEntry::new(slot.id.clone(), slot.timestamp, reading.energy_level)
        })
        .collect();
    let result = analyzer.classify_energy_trend(&reversed);
    assert_eq!(result.trend, EnergyTrend::Declining);
    assert!(result.change < 0.0);

    assert_eq!(analyzer.classify_energy_trend(&entries[..13]).trend, EnergyTrend::Stable);
    assert_eq!(analyzer.classify_energy_trend(&entries[..13]).change, 0.0);
}

#[test]
fn test_peak_examples() {
    let analyzer = EnergyAnalyzer::new();
    let entries = vec![entry("2024-01-01T09:00:00", 8), entry("2024-01-01T14:00:00", 5)];
    assert_eq!(analyzer.find_peak_energy_time(&entries), Some("morning"));

    let entries = vec![entry("2024-01-01T05:00:00", 10)];
    assert_eq!(analyzer.find_peak_energy_time(&entries), Some("early morning"));
    assert_eq!(analyzer.peak_time_of_day(&entries), Some(TimeOfDay::EarlyMorning));
}

#[test]
fn test_zone_changes_bucketing() {
    let entries = vec![entry("2024-07-01T04:30:00Z", 9), entry("2024-07-01T05:10:00Z", 7)];

    let utc = EnergyAnalyzer::new();
    assert_eq!(utc.find_peak_energy_time(&entries), Some("early morning"));

    // 00:30 / 01:10 in New York.
    let ny = EnergyAnalyzer::with_timezone(Tz::America__New_York);
    assert_eq!(ny.find_peak_energy_time(&entries), Some("night"));

    let late = vec![entry("2024-07-01T02:00:00Z", 4)];
    let cells = ny.build_energy_heatmap(&late);
    assert_eq!(cells[0].date.to_string(), "2024-06-30");
    assert_eq!(cells[0].hour, 22);
}

#[test]
fn test_chart_covers_every_hour() {
    let chart = render_energy_chart(&EnergyAnalyzer::new().build_energy_curve(&[]));
    for hour in 0..24 {
        assert!(chart.contains(&format!("{hour:02}:00")));
    }
}
