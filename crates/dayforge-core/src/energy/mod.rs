//! Energy analytics.
//!
//! This module turns self-reported energy logs into hourly curves, day
//! segment averages, calendar heatmaps, trends and task-timing suggestions.

mod curve;
mod heatmap;
mod optimal;
mod summary;
mod time_of_day;
mod trend;

pub use curve::{
    render_energy_chart, EnergyAnalyzer, EnergyCurvePoint, DEFAULT_TREND_MIN_SAMPLES,
    MIN_RELIABLE_SAMPLES, MIN_TREND_SAMPLES,
};
pub use heatmap::HeatmapCell;
pub use optimal::find_optimal_task_time;
pub use summary::{EnergySummary, OptimalHours};
pub use time_of_day::TimeOfDay;
pub use trend::{EnergyTrend, TrendResult};
