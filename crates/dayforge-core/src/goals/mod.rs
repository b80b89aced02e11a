//! Goal progress analytics.
//!
//! Derives velocity, momentum and projected completion for goals from the
//! completion history of their tasks.

mod progress;

pub use progress::{
    GoalProgressAnalyzer, GoalProgressMetrics, GoalTrend, DEFAULT_ACCELERATING_RATIO,
    DEFAULT_VELOCITY_WINDOW_DAYS,
};
