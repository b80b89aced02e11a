//! Picking the best hour of the day for a task's energy demand.

use tracing::debug;

use super::{EnergyAnalyzer, EnergyCurvePoint, MIN_RELIABLE_SAMPLES};
use crate::model::EnergyLevel;

/// Best curve hour for a task needing `energy_level`.
///
/// Hours with fewer than two samples are never chosen. High picks the
/// strongest hour, low the weakest, medium the hour closest to the middle
/// of the observed range. Ties go to the earliest hour.
pub fn find_optimal_task_time(
    energy_level: EnergyLevel,
    curve: &[EnergyCurvePoint],
) -> Option<EnergyCurvePoint> {
    select_hour(energy_level, curve, MIN_RELIABLE_SAMPLES)
}

impl EnergyAnalyzer {
    /// Same as [`find_optimal_task_time`] with this analyzer's sample minimum.
    pub fn find_optimal_task_time(
        &self,
        energy_level: EnergyLevel,
        curve: &[EnergyCurvePoint],
    ) -> Option<EnergyCurvePoint> {
        select_hour(energy_level, curve, self.optimal_min_samples)
    }
}

fn select_hour(
    energy_level: EnergyLevel,
    curve: &[EnergyCurvePoint],
    min_samples: u32,
) -> Option<EnergyCurvePoint> {
    let reliable: Vec<&EnergyCurvePoint> = curve
        .iter()
        .filter(|p| p.sample_count >= min_samples.max(MIN_RELIABLE_SAMPLES))
        .collect();
    if reliable.is_empty() {
        return None;
    }

    let min = reliable
        .iter()
        .map(|p| p.average_energy)
        .fold(f64::INFINITY, f64::min);
    let max = reliable
        .iter()
        .map(|p| p.average_energy)
        .fold(f64::NEG_INFINITY, f64::max);
    let midpoint = (min + max) / 2.0;

    // Lower score wins; hour breaks ties.
    let score = |p: &EnergyCurvePoint| match energy_level {
        EnergyLevel::High => -p.average_energy,
        EnergyLevel::Low => p.average_energy,
        EnergyLevel::Medium => (p.average_energy - midpoint).abs(),
    };

    let chosen = reliable
        .into_iter()
        .min_by(|a, b| {
            score(a)
                .total_cmp(&score(b))
                .then_with(|| a.hour.cmp(&b.hour))
        })
        .copied();

    debug!(%energy_level, hour = ?chosen.map(|p| p.hour), "selected optimal task hour");
    chosen
}
