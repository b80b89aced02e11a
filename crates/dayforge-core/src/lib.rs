//! # Dayforge Core Library
//!
//! This library provides the analytics behind the Dayforge productivity
//! app. It follows a CLI-first philosophy: every computation is a plain
//! function over in-memory records, exposed through the standalone
//! `dayforge` binary as well as to any host that links the crate.
//!
//! ## Architecture
//!
//! - **Model**: Energy log, task and goal records as read from storage
//! - **Energy**: Hourly curves, day segments, heatmaps, trends and
//!   task-timing suggestions
//! - **Goals**: Velocity, momentum and projected completion per goal
//! - **Config**: TOML-based analytics preferences, including the time zone
//!   used to read timestamps
//!
//! ## Key Components
//!
//! - [`EnergyAnalyzer`]: Energy statistics from log entries
//! - [`GoalProgressAnalyzer`]: Goal progress from task snapshots
//! - [`Config`]: Application configuration management

pub mod config;
pub mod energy;
pub mod error;
pub mod goals;
pub mod model;

pub use config::Config;
pub use energy::{
    find_optimal_task_time, render_energy_chart, EnergyAnalyzer, EnergyCurvePoint, EnergySummary,
    EnergyTrend, HeatmapCell, TimeOfDay, TrendResult,
};
pub use error::{ConfigError, CoreError, ParseError};
pub use goals::{GoalProgressAnalyzer, GoalProgressMetrics, GoalTrend};
pub use model::{
    EnergyLevel, EnergyLogEntry, GoalSnapshot, GoalStatus, Milestone, TaskSnapshot, TaskStatus,
    Timestamp,
};
