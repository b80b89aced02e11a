//! Calendar heatmap of energy by date and hour.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EnergyAnalyzer;
use crate::model::EnergyLogEntry;

/// Averaged energy for one (date, hour) bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// Local calendar date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Hour of day (0-23)
    pub hour: u8,
    /// Mean energy level of the entries in this bucket
    pub energy_level: f64,
}

impl EnergyAnalyzer {
    /// Build heatmap cells for every (date, hour) present in `entries`.
    ///
    /// Empty buckets are omitted. Cells are ordered by date, then hour.
    pub fn build_energy_heatmap(&self, entries: &[EnergyLogEntry]) -> Vec<HeatmapCell> {
        let mut buckets: BTreeMap<(NaiveDate, u8), (u64, u32)> = BTreeMap::new();

        for entry in entries {
            let local = entry.timestamp.local(&self.timezone);
            let key = (local.date(), local.hour() as u8);
            let (sum, count) = buckets.entry(key).or_insert((0, 0));
            *sum += entry.energy_level as u64;
            *count += 1;
        }

        debug!(entries = entries.len(), cells = buckets.len(), "built energy heatmap");

        buckets
            .into_iter()
            .map(|((date, hour), (sum, count))| HeatmapCell {
                date,
                hour,
                energy_level: sum as f64 / count as f64,
            })
            .collect()
    }
}
