//! Goal progress metrics: velocity, trend and projected completion.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{GoalSnapshot, GoalStatus, TaskSnapshot, TaskStatus};

/// Days in the trailing window used for velocity.
pub const DEFAULT_VELOCITY_WINDOW_DAYS: u32 = 7;

/// This-window completions must reach last-window times this to accelerate.
pub const DEFAULT_ACCELERATING_RATIO: f64 = 1.2;

/// Furthest projection reported, about a thousand years.
const MAX_PROJECTION_DAYS: i64 = 365_250;

/// Momentum of task completion on a goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalTrend {
    Accelerating,
    Steady,
    Slowing,
    Stalled,
}

impl GoalTrend {
    /// Band this window's completions against the previous window's.
    ///
    /// - `Stalled`: nothing completed this window
    /// - `Accelerating`: `this >= last * accelerating_ratio`
    /// - `Steady`: `this >= last`
    /// - `Slowing`: any decrease
    pub fn classify(this_window: u32, last_window: u32, accelerating_ratio: f64) -> Self {
        if this_window == 0 {
            GoalTrend::Stalled
        } else if this_window as f64 >= last_window as f64 * accelerating_ratio {
            GoalTrend::Accelerating
        } else if this_window >= last_window {
            GoalTrend::Steady
        } else {
            GoalTrend::Slowing
        }
    }

    /// Glyph shown next to the trend.
    pub fn indicator(&self) -> &'static str {
        match self {
            GoalTrend::Accelerating => "↗",
            GoalTrend::Steady => "→",
            GoalTrend::Slowing => "↘",
            GoalTrend::Stalled => "⏸",
        }
    }
}

/// Progress metrics for one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressMetrics {
    pub goal_id: String,
    pub goal_title: String,
    pub completion_percentage: f64,
    pub time_invested_hours: f64,
    pub tasks_completed_this_week: u32,
    pub tasks_completed_last_week: u32,
    /// Tasks per week
    pub velocity: f64,
    pub trend: GoalTrend,
    pub trend_indicator: String,
    pub projected_completion_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    /// Negative when overdue
    pub days_remaining: Option<i64>,
    pub milestones_completed: u32,
    pub milestones_total: u32,
}

/// Analyzer computing goal progress from task snapshots.
#[derive(Debug, Clone)]
pub struct GoalProgressAnalyzer {
    /// Zone used to decide what "today" is
    pub timezone: Tz,
    /// Length of the velocity window in days
    pub velocity_window_days: u32,
    /// Ratio over the previous window that counts as accelerating
    pub accelerating_ratio: f64,
}

impl Default for GoalProgressAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalProgressAnalyzer {
    /// Create an analyzer with a 7-day window in UTC.
    pub fn new() -> Self {
        Self::with_settings(Tz::UTC, DEFAULT_VELOCITY_WINDOW_DAYS, DEFAULT_ACCELERATING_RATIO)
    }

    /// Create analyzer with custom settings.
    pub fn with_settings(timezone: Tz, velocity_window_days: u32, accelerating_ratio: f64) -> Self {
        Self {
            timezone,
            velocity_window_days,
            accelerating_ratio,
        }
    }

    /// Metrics for `goal` as of `now`.
    ///
    /// Only tasks linked to this goal are read; unlinked tasks and tasks of
    /// other goals are ignored.
    pub fn calculate_goal_progress_metrics(
        &self,
        goal: &GoalSnapshot,
        tasks: &[TaskSnapshot],
        now: DateTime<Utc>,
    ) -> GoalProgressMetrics {
        let goal_tasks: Vec<&TaskSnapshot> = tasks
            .iter()
            .filter(|t| t.goal_id.as_deref() == Some(goal.id.as_str()))
            .collect();
        self.metrics_for(goal, &goal_tasks, now)
    }

    /// [`Self::calculate_goal_progress_metrics`] for every active goal.
    pub fn all_goals_progress_metrics(
        &self,
        goals: &[GoalSnapshot],
        tasks: &[TaskSnapshot],
        now: DateTime<Utc>,
    ) -> Vec<GoalProgressMetrics> {
        goals
            .iter()
            .filter(|g| g.status == GoalStatus::Active)
            .map(|goal| self.calculate_goal_progress_metrics(goal, tasks, now))
            .collect()
    }

    fn metrics_for(
        &self,
        goal: &GoalSnapshot,
        tasks: &[&TaskSnapshot],
        now: DateTime<Utc>,
    ) -> GoalProgressMetrics {
        let window_days = self.velocity_window_days.max(1);
        let window = Duration::days(window_days as i64);
        let this_window_start = now - window;
        let last_window_start = this_window_start - window;

        let mut this_week = 0u32;
        let mut last_week = 0u32;
        for task in tasks {
            let Some(completed_at) = task.completion_time() else {
                continue;
            };
            let instant = completed_at.instant(&self.timezone);
            if instant > this_window_start && instant <= now {
                this_week += 1;
            } else if instant > last_window_start && instant <= this_window_start {
                last_week += 1;
            }
        }

        let velocity = this_week as f64 * 7.0 / window_days as f64;
        let trend = GoalTrend::classify(this_week, last_week, self.accelerating_ratio);

        let invested_minutes: u64 = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .filter_map(|t| t.actual_duration_minutes)
            .map(u64::from)
            .sum();

        let today = now.with_timezone(&self.timezone).date_naive();
        let days_remaining = goal.target_date.map(|target| (target - today).num_days());
        let projected_completion_date = project_completion(goal, tasks, velocity, today);

        let milestones_completed = goal.milestones.iter().filter(|m| m.completed).count() as u32;

        debug!(
            goal = %goal.id,
            this_week,
            last_week,
            ?trend,
            ?projected_completion_date,
            "calculated goal progress"
        );

        GoalProgressMetrics {
            goal_id: goal.id.clone(),
            goal_title: goal.title.clone(),
            completion_percentage: goal.completion_percentage,
            time_invested_hours: invested_minutes as f64 / 60.0,
            tasks_completed_this_week: this_week,
            tasks_completed_last_week: last_week,
            velocity,
            trend,
            trend_indicator: trend.indicator().to_string(),
            projected_completion_date,
            target_date: goal.target_date,
            days_remaining,
            milestones_completed,
            milestones_total: goal.milestones.len() as u32,
        }
    }
}

/// Linear projection of the completion date.
///
/// Each completed task is assumed to be worth `completion / completed_tasks`
/// percent. A goal at 0% falls back to splitting 100% over its
/// non-cancelled tasks.
fn project_completion(
    goal: &GoalSnapshot,
    tasks: &[&TaskSnapshot],
    velocity: f64,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if goal.completion_percentage >= 100.0 || velocity <= 0.0 {
        return None;
    }

    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let live = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Cancelled)
        .count();

    let percent_per_task = if goal.completion_percentage > 0.0 && completed > 0 {
        goal.completion_percentage / completed as f64
    } else if live > 0 {
        100.0 / live as f64
    } else {
        return None;
    };

    let weekly_progress = velocity * percent_per_task;
    let remaining = (100.0 - goal.completion_percentage).max(0.0);
    let days = (remaining / weekly_progress * 7.0).ceil();
    // Beyond the cap the projection is meaningless, report it as unknown.
    if !days.is_finite() || days > MAX_PROJECTION_DAYS as f64 {
        return None;
    }
    today.checked_add_signed(Duration::try_days(days as i64)?)
}
