//! Energy trend classification.
//!
//! Compares the later half of a user's log with the earlier half.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EnergyAnalyzer, MIN_TREND_SAMPLES};
use crate::model::EnergyLogEntry;

/// Direction of the energy trend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTrend {
    Improving,
    Declining,
    Stable,
}

/// Trend label with the difference of half means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: EnergyTrend,
    /// mean(later half) - mean(earlier half)
    pub change: f64,
}

impl TrendResult {
    /// Result reported when there is not enough data.
    pub fn stable() -> Self {
        Self {
            trend: EnergyTrend::Stable,
            change: 0.0,
        }
    }

    /// Classify a change by its sign. There is no dead band.
    pub fn from_change(change: f64) -> Self {
        let trend = if change > 0.0 {
            EnergyTrend::Improving
        } else if change < 0.0 {
            EnergyTrend::Declining
        } else {
            EnergyTrend::Stable
        };
        Self { trend, change }
    }
}

impl EnergyAnalyzer {
    /// Classify whether energy is rising or falling over the log.
    ///
    /// Below `trend_min_samples` entries the result is always stable with zero
    /// change. Otherwise entries are ordered chronologically and split at
    /// `len / 2`; with an odd count the later half holds the extra entry.
    pub fn classify_energy_trend(&self, entries: &[EnergyLogEntry]) -> TrendResult {
        if entries.len() < self.trend_min_samples.max(MIN_TREND_SAMPLES) {
            return TrendResult::stable();
        }

        let mut ordered: Vec<_> = entries
            .iter()
            .map(|e| (e.timestamp.instant(&self.timezone), e.energy_level))
            .collect();
        ordered.sort_by_key(|(instant, _)| *instant);
        let levels: Vec<u8> = ordered.into_iter().map(|(_, level)| level).collect();

        let mid = levels.len() / 2;
        let (earlier, later) = levels.split_at(mid);
        let change = mean(later) - mean(earlier);

        let result = TrendResult::from_change(change);
        debug!(entries = entries.len(), ?result, "classified energy trend");
        result
    }
}

fn mean(samples: &[u8]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let total: u64 = samples.iter().map(|level| *level as u64).sum();
    total as f64 / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timestamp;
    use chrono::{Duration, NaiveDate};

    fn daily_entries(levels: &[u8]) -> Vec<EnergyLogEntry> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let ts = Timestamp::Floating(start + Duration::days(i as i64));
                EnergyLogEntry::new(format!("e{i}"), ts, *level)
            })
            .collect()
    }

    #[test]
    fn test_too_few_entries_is_stable() {
        let analyzer = EnergyAnalyzer::new();
        assert_eq!(analyzer.classify_energy_trend(&[]), TrendResult::stable());

        let entries = daily_entries(&[1, 1, 1, 1, 1, 1, 10, 10, 10, 10, 10, 10, 10]);
        assert_eq!(entries.len(), 13);
        assert_eq!(analyzer.classify_energy_trend(&entries), TrendResult::stable());
    }

    #[test]
    fn test_improving() {
        let entries = daily_entries(&[5, 5, 5, 5, 5, 5, 5, 8, 8, 8, 8, 8, 8, 8]);
        let result = EnergyAnalyzer::new().classify_energy_trend(&entries);
        assert_eq!(result.trend, EnergyTrend::Improving);
        assert_eq!(result.change, 3.0);
    }

    #[test]
    fn test_declining() {
        let entries = daily_entries(&[8, 8, 8, 8, 8, 8, 8, 5, 5, 5, 5, 5, 5, 5]);
        let result = EnergyAnalyzer::new().classify_energy_trend(&entries);
        assert_eq!(result.trend, EnergyTrend::Declining);
        assert!(result.change < 0.0);
    }

    #[test]
    fn test_uniform_is_stable() {
        let entries = daily_entries(&[6; 14]);
        let result = EnergyAnalyzer::new().classify_energy_trend(&entries);
        assert_eq!(result.trend, EnergyTrend::Stable);
        assert_eq!(result.change, 0.0);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut entries = daily_entries(&[5, 5, 5, 5, 5, 5, 5, 8, 8, 8, 8, 8, 8, 8]);
        entries.reverse();
        let result = EnergyAnalyzer::new().classify_energy_trend(&entries);
        assert_eq!(result.trend, EnergyTrend::Improving);
    }

    #[test]
    fn test_odd_count_gives_extra_entry_to_later_half() {
        // 15 entries: earlier = first 7 (all 4), later = last 8 (seven 4s and one 12).
        let mut levels = vec![4u8; 14];
        levels.push(12);
        let entries = daily_entries(&levels);
        let result = EnergyAnalyzer::new().classify_energy_trend(&entries);
        assert_eq!(result.change, 1.0);
    }

    #[test]
    fn test_tiny_change_is_not_smoothed() {
        assert_eq!(TrendResult::from_change(0.01).trend, EnergyTrend::Improving);
        assert_eq!(TrendResult::from_change(-0.01).trend, EnergyTrend::Declining);
    }

    #[test]
    fn test_custom_minimum() {
        let analyzer = EnergyAnalyzer::with_settings(chrono_tz::Tz::UTC, 4, 2);
        let entries = daily_entries(&[2, 2, 6, 6]);
        assert_eq!(analyzer.classify_energy_trend(&entries).change, 4.0);
    }

    #[test]
    fn test_single_reading_is_stable_at_any_minimum() {
        let entries = daily_entries(&[5]);
        let analyzer = EnergyAnalyzer::with_settings(chrono_tz::Tz::UTC, 1, 2);
        assert_eq!(analyzer.trend_min_samples, MIN_TREND_SAMPLES);
        assert_eq!(analyzer.classify_energy_trend(&entries), TrendResult::stable());

        let mut relaxed = EnergyAnalyzer::new();
        relaxed.trend_min_samples = 0;
        assert_eq!(relaxed.classify_energy_trend(&entries), TrendResult::stable());
        assert_eq!(relaxed.classify_energy_trend(&[]), TrendResult::stable());
        assert_eq!(relaxed.classify_energy_trend(&daily_entries(&[3, 5])).change, 2.0);
    }
}
