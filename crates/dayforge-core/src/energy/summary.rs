//! One-shot energy dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EnergyAnalyzer, EnergyCurvePoint, HeatmapCell, TimeOfDay, TrendResult};
use crate::model::{EnergyLevel, EnergyLogEntry};

/// Best hours for tasks of each energy demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalHours {
    pub high: Option<EnergyCurvePoint>,
    pub medium: Option<EnergyCurvePoint>,
    pub low: Option<EnergyCurvePoint>,
}

/// Every energy statistic for one log, computed together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergySummary {
    pub total_entries: usize,
    /// Mean energy over all entries, `None` without entries
    pub average_energy: Option<f64>,
    pub curve: Vec<EnergyCurvePoint>,
    pub time_of_day: BTreeMap<TimeOfDay, f64>,
    pub heatmap: Vec<HeatmapCell>,
    /// Display label of the strongest segment
    pub peak_time: Option<String>,
    pub trend: TrendResult,
    pub optimal_hours: OptimalHours,
}

impl EnergyAnalyzer {
    /// Compute all energy statistics for `entries`.
    pub fn summarize(&self, entries: &[EnergyLogEntry]) -> EnergySummary {
        let curve = self.build_energy_curve(entries);
        let average_energy = if entries.is_empty() {
            None
        } else {
            let total: u64 = entries.iter().map(|e| e.energy_level as u64).sum();
            Some(total as f64 / entries.len() as f64)
        };

        let optimal_hours = OptimalHours {
            high: self.find_optimal_task_time(EnergyLevel::High, &curve),
            medium: self.find_optimal_task_time(EnergyLevel::Medium, &curve),
            low: self.find_optimal_task_time(EnergyLevel::Low, &curve),
        };

        EnergySummary {
            total_entries: entries.len(),
            average_energy,
            time_of_day: self.build_time_of_day_energy(entries),
            heatmap: self.build_energy_heatmap(entries),
            peak_time: self.find_peak_energy_time(entries).map(str::to_string),
            trend: self.classify_energy_trend(entries),
            optimal_hours,
            curve,
        }
    }
}
