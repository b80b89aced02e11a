//! Energy curve types and analyzer.
//!
//! An energy curve is the per-hour average of self-reported energy levels,
//! showing where in the day a user tends to feel strongest.

use std::collections::BTreeMap;

use chrono::Timelike;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TimeOfDay;
use crate::error::Result;
use crate::model::{EnergyLogEntry, Timestamp};

/// Entries required before the trend classifier leaves its stable default.
pub const DEFAULT_TREND_MIN_SAMPLES: usize = 14;

/// Samples an hour needs before it can be recommended.
pub const MIN_RELIABLE_SAMPLES: u32 = 2;

/// Smallest log that can be split into two non-empty halves.
pub const MIN_TREND_SAMPLES: usize = 2;

/// Average energy for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyCurvePoint {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Mean energy level, 0.0 when the hour has no samples
    pub average_energy: f64,
    /// Number of entries logged in this hour
    pub sample_count: u32,
}

impl EnergyCurvePoint {
    /// Create an empty point for `hour`.
    pub fn new(hour: u8) -> Self {
        Self {
            hour,
            average_energy: 0.0,
            sample_count: 0,
        }
    }
}

/// Analyzer for deriving energy statistics from log entries.
///
/// Hours and dates are read in `timezone`. Offset-less timestamps are taken
/// to already be wall-clock time in that zone.
#[derive(Debug, Clone)]
pub struct EnergyAnalyzer {
    /// Zone used to read hour-of-day and calendar date
    pub timezone: Tz,
    /// Minimum entries for a non-default trend
    pub trend_min_samples: usize,
    /// Minimum samples for an hour to be recommended
    pub optimal_min_samples: u32,
}

impl Default for EnergyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EnergyAnalyzer {
    /// Create a new analyzer reading times in UTC.
    pub fn new() -> Self {
        Self::with_timezone(Tz::UTC)
    }

    /// Create an analyzer reading times in `timezone`.
    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            timezone,
            trend_min_samples: DEFAULT_TREND_MIN_SAMPLES,
            optimal_min_samples: MIN_RELIABLE_SAMPLES,
        }
    }

    /// Create analyzer with custom settings.
    ///
    /// Minimums below [`MIN_TREND_SAMPLES`] and [`MIN_RELIABLE_SAMPLES`] are
    /// raised to those floors.
    pub fn with_settings(timezone: Tz, trend_min_samples: usize, optimal_min_samples: u32) -> Self {
        Self {
            timezone,
            trend_min_samples: trend_min_samples.max(MIN_TREND_SAMPLES),
            optimal_min_samples: optimal_min_samples.max(MIN_RELIABLE_SAMPLES),
        }
    }

    /// Local hour of day (0-23) of a timestamp.
    pub fn hour_of(&self, timestamp: &Timestamp) -> u8 {
        timestamp.local(&self.timezone).hour() as u8
    }

    /// Day segment of a timestamp.
    pub fn classify_time_of_day(&self, timestamp: &Timestamp) -> TimeOfDay {
        TimeOfDay::from_hour(self.hour_of(timestamp) as u32)
    }

    /// Day segment of an ISO-8601 string.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the string is not a recognised timestamp.
    pub fn classify_time_of_day_str(&self, timestamp: &str) -> Result<TimeOfDay> {
        let parsed = Timestamp::parse(timestamp)?;
        Ok(self.classify_time_of_day(&parsed))
    }

    /// Build the 24-point hourly curve.
    ///
    /// Always returns hours 0-23 in order; hours without entries report zero.
    pub fn build_energy_curve(&self, entries: &[EnergyLogEntry]) -> Vec<EnergyCurvePoint> {
        let mut sums = [0u64; 24];
        let mut counts = [0u32; 24];

        for entry in entries {
            let hour = self.hour_of(&entry.timestamp) as usize;
            sums[hour] += entry.energy_level as u64;
            counts[hour] += 1;
        }

        let curve: Vec<_> = (0..24u8)
            .map(|hour| {
                let count = counts[hour as usize];
                let mut point = EnergyCurvePoint::new(hour);
                if count > 0 {
                    point.average_energy = sums[hour as usize] as f64 / count as f64;
                    point.sample_count = count;
                }
                point
            })
            .collect();

        debug!(
            entries = entries.len(),
            hours_with_data = counts.iter().filter(|c| **c > 0).count(),
            "built energy curve"
        );
        curve
    }

    /// Average energy per day segment, with all six segments present.
    ///
    /// Segments are recomputed from each timestamp; a stored `time_of_day`
    /// label on the entry is ignored.
    pub fn build_time_of_day_energy(&self, entries: &[EnergyLogEntry]) -> BTreeMap<TimeOfDay, f64> {
        let mut totals: BTreeMap<TimeOfDay, (u64, u32)> =
            TimeOfDay::ALL.iter().map(|segment| (*segment, (0, 0))).collect();

        for entry in entries {
            let segment = self.classify_time_of_day(&entry.timestamp);
            if let Some((sum, count)) = totals.get_mut(&segment) {
                *sum += entry.energy_level as u64;
                *count += 1;
            }
        }

        totals
            .into_iter()
            .map(|(segment, (sum, count))| {
                let average = if count > 0 { sum as f64 / count as f64 } else { 0.0 };
                (segment, average)
            })
            .collect()
    }

    /// Segment with the highest average energy, `None` without entries.
    ///
    /// Ties go to the segment declared first.
    pub fn peak_time_of_day(&self, entries: &[EnergyLogEntry]) -> Option<TimeOfDay> {
        if entries.is_empty() {
            return None;
        }

        let averages = self.build_time_of_day_energy(entries);
        let mut peak: Option<(TimeOfDay, f64)> = None;
        for segment in TimeOfDay::ALL {
            let average = averages.get(&segment).copied().unwrap_or(0.0);
            match peak {
                Some((_, best)) if average <= best => {}
                _ => peak = Some((segment, average)),
            }
        }

        debug!(?peak, "selected peak energy segment");
        peak.map(|(segment, _)| segment)
    }

    /// Display label of the peak segment, e.g. `"early morning"`.
    pub fn find_peak_energy_time(&self, entries: &[EnergyLogEntry]) -> Option<&'static str> {
        self.peak_time_of_day(entries)
            .map(|segment| segment.display_label())
    }
}

/// Render a 24-hour curve as an ASCII bar chart (energy on a 1-10 scale).
pub fn render_energy_chart(curve: &[EnergyCurvePoint]) -> String {
    let mut output = String::from("\nEnergy Curve:\n");
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for point in curve {
        let bar_length = ((point.average_energy / 10.0).clamp(0.0, 1.0) * 30.0) as usize;
        let bar = "█".repeat(bar_length);
        let empty = " ".repeat(30 - bar_length);

        let sample_indicator = if point.sample_count >= 6 {
            "●"
        } else if point.sample_count >= MIN_RELIABLE_SAMPLES {
            "○"
        } else {
            "·"
        };

        output.push_str(&format!(
            "{:02}:00 {}{}{} {:.1}\n",
            point.hour, bar, empty, sample_indicator, point.average_energy
        ));
    }

    output.push_str(&"─".repeat(50));
    output.push_str("\n● 6+ samples  ○ 2-5  · too few\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: &str, level: u8) -> EnergyLogEntry {
        EnergyLogEntry::new(ts, Timestamp::parse(ts).unwrap(), level)
    }

    #[test]
    fn test_empty_curve_is_zero_filled() {
        let curve = EnergyAnalyzer::new().build_energy_curve(&[]);
        assert_eq!(curve.len(), 24);
        for (hour, point) in curve.iter().enumerate() {
            assert_eq!(*point, EnergyCurvePoint::new(hour as u8));
        }
    }

    #[test]
    fn test_curve_averages_per_hour() {
        let entries = vec![
            entry("2024-01-01T09:05:00", 8),
            entry("2024-01-02T09:40:00", 6),
            entry("2024-01-01T14:00:00", 3),
        ];
        let curve = EnergyAnalyzer::new().build_energy_curve(&entries);

        assert_eq!(curve[9].average_energy, 7.0);
        assert_eq!(curve[9].sample_count, 2);
        assert_eq!(curve[14].average_energy, 3.0);
        assert_eq!(curve[14].sample_count, 1);
        assert_eq!(curve[10].sample_count, 0);
    }

    #[test]
    fn test_curve_buckets_in_configured_zone() {
        let entries = vec![entry("2024-06-01T12:00:00Z", 9)];

        let utc = EnergyAnalyzer::new().build_energy_curve(&entries);
        assert_eq!(utc[12].sample_count, 1);

        let tokyo = EnergyAnalyzer::with_timezone(Tz::Asia__Tokyo).build_energy_curve(&entries);
        assert_eq!(tokyo[21].sample_count, 1);
        assert_eq!(tokyo[12].sample_count, 0);
    }

    #[test]
    fn test_classify_time_of_day_str() {
        let analyzer = EnergyAnalyzer::new();
        assert_eq!(
            analyzer.classify_time_of_day_str("2024-01-01T05:30:00").unwrap(),
            TimeOfDay::EarlyMorning
        );
        assert_eq!(
            analyzer.classify_time_of_day_str("2024-01-01T23:59:00").unwrap(),
            TimeOfDay::Night
        );
        assert!(analyzer.classify_time_of_day_str("teatime").is_err());
    }

    #[test]
    fn test_time_of_day_energy_has_all_segments() {
        let analyzer = EnergyAnalyzer::new();
        let empty = analyzer.build_time_of_day_energy(&[]);
        assert_eq!(empty.len(), 6);
        assert!(empty.values().all(|v| *v == 0.0));

        let entries = vec![
            entry("2024-01-01T08:00:00", 9),
            entry("2024-01-01T10:00:00", 7),
            entry("2024-01-01T23:00:00", 2),
            entry("2024-01-02T01:00:00", 4),
        ];
        let averages = analyzer.build_time_of_day_energy(&entries);
        assert_eq!(averages.len(), 6);
        assert_eq!(averages[&TimeOfDay::Morning], 8.0);
        assert_eq!(averages[&TimeOfDay::Night], 3.0);
        assert_eq!(averages[&TimeOfDay::Midday], 0.0);
    }

    #[test]
    fn test_stored_label_is_ignored() {
        let mut logged = entry("2024-01-01T08:00:00", 9);
        logged.time_of_day = Some(TimeOfDay::Night);
        let averages = EnergyAnalyzer::new().build_time_of_day_energy(&[logged]);
        assert_eq!(averages[&TimeOfDay::Morning], 9.0);
        assert_eq!(averages[&TimeOfDay::Night], 0.0);
    }

    #[test]
    fn test_peak_energy_time() {
        let analyzer = EnergyAnalyzer::new();
        assert_eq!(analyzer.find_peak_energy_time(&[]), None);

        let entries = vec![
            entry("2024-01-01T09:00:00", 8),
            entry("2024-01-01T14:00:00", 5),
        ];
        assert_eq!(analyzer.find_peak_energy_time(&entries), Some("morning"));

        let entries = vec![entry("2024-01-01T05:00:00", 10)];
        assert_eq!(analyzer.find_peak_energy_time(&entries), Some("early morning"));
    }

    #[test]
    fn test_peak_tie_goes_to_earlier_segment() {
        let entries = vec![
            entry("2024-01-01T19:00:00", 6),
            entry("2024-01-01T09:00:00", 6),
        ];
        assert_eq!(
            EnergyAnalyzer::new().peak_time_of_day(&entries),
            Some(TimeOfDay::Morning)
        );
    }

    #[test]
    fn test_ascii_chart_output() {
        let entries = vec![
            entry("2024-01-01T09:00:00", 8),
            entry("2024-01-02T09:00:00", 8),
        ];
        let chart = render_energy_chart(&EnergyAnalyzer::new().build_energy_curve(&entries));

        assert!(chart.contains("09:00"));
        assert!(chart.contains("8.0"));
        assert!(chart.contains("█"));
        assert!(chart.contains("○"));
    }
}
