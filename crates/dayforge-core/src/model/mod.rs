//! Record types consumed by the analytics.
//!
//! These mirror the rows the application stores for energy logs, tasks and
//! goals. The analytics only read them.

mod timestamp;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::energy::TimeOfDay;

pub use timestamp::Timestamp;

/// A single self-reported energy reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyLogEntry {
    pub id: String,
    pub user_id: String,
    pub timestamp: Timestamp,
    /// Energy level, 1-10. Not validated here.
    pub energy_level: u8,
    /// Label stored with the row. Analytics recompute it from the timestamp.
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task_was_energizing: Option<bool>,
}

impl EnergyLogEntry {
    /// Create an entry with only the fields the analytics read.
    pub fn new(id: impl Into<String>, timestamp: impl Into<Timestamp>, energy_level: u8) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            timestamp: timestamp.into(),
            energy_level,
            time_of_day: None,
            context: None,
            task_id: None,
            task_was_energizing: None,
        }
    }
}

/// Energy a task demands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

impl EnergyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::High => "high",
            EnergyLevel::Medium => "medium",
            EnergyLevel::Low => "low",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(EnergyLevel::High),
            "medium" => Ok(EnergyLevel::Medium),
            "low" => Ok(EnergyLevel::Low),
            _ => Err(ParseError::UnknownEnergyLevel(s.to_string())),
        }
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[serde(alias = "todo")]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// The slice of a task row needed for goal progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub actual_duration_minutes: Option<u32>,
}

impl TaskSnapshot {
    /// Completed with a known completion time.
    pub fn completion_time(&self) -> Option<&Timestamp> {
        match self.status {
            TaskStatus::Completed => self.completed_at.as_ref(),
            _ => None,
        }
    }
}

/// Lifecycle state of a goal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

/// A checkpoint on the way to a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// The slice of a goal row needed for goal progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// 0-100
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}
