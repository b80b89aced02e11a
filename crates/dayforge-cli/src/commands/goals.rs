use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use dayforge_core::{GoalSnapshot, TaskSnapshot, Timestamp};

use super::{print_json, read_records, settings, CommandResult};

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Progress metrics for every active goal
    Progress {
        /// Goal snapshots JSON file, or - for stdin
        #[arg(long)]
        goals: PathBuf,
        /// Task snapshots JSON file, or - for stdin
        #[arg(long)]
        tasks: PathBuf,
        /// Reference time (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
    },
}

pub fn run(action: GoalsAction, tz: Option<&str>) -> CommandResult {
    match action {
        GoalsAction::Progress { goals, tasks, now } => {
            let stdin = Path::new("-");
            if goals == stdin && tasks == stdin {
                return Err("only one of --goals and --tasks can read stdin".into());
            }

            let config = settings(tz)?;
            let analyzer = config.goal_analyzer()?;
            let now: DateTime<Utc> = match now {
                Some(raw) => Timestamp::parse(&raw)?.instant(&config.timezone()?),
                None => Utc::now(),
            };

            let goals: Vec<GoalSnapshot> = read_records(&goals)?;
            let tasks: Vec<TaskSnapshot> = read_records(&tasks)?;
            print_json(&analyzer.all_goals_progress_metrics(&goals, &tasks, now))
        }
    }
}
