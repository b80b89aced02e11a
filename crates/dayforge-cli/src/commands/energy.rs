//! Energy analytics commands over a JSON array of energy log entries.

use std::path::PathBuf;

use clap::Subcommand;
use dayforge_core::{render_energy_chart, EnergyLevel, EnergyLogEntry};
use serde_json::json;

use super::{print_json, read_records, settings, CommandResult};

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Classify a timestamp into a time-of-day segment
    Classify {
        /// ISO-8601 timestamp (with or without offset)
        timestamp: String,
    },
    /// Average energy for each hour of the day
    Curve {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
        /// Render a bar chart instead of JSON
        #[arg(long)]
        chart: bool,
    },
    /// Average energy per time-of-day segment
    Segments {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
    },
    /// Average energy per calendar day and hour
    Heatmap {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
    },
    /// Segment with the highest average energy
    Peak {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
    },
    /// Compare the earlier and later halves of the log
    Trend {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
    },
    /// Best hour for a task of the given energy demand
    Optimal {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
        /// Task energy demand (high, medium, low)
        #[arg(long)]
        level: EnergyLevel,
    },
    /// Every energy statistic in one report
    Summary {
        /// Energy log JSON file, or - for stdin
        file: PathBuf,
    },
}

pub fn run(action: EnergyAction, tz: Option<&str>) -> CommandResult {
    let analyzer = settings(tz)?.energy_analyzer()?;

    match action {
        EnergyAction::Classify { timestamp } => {
            let segment = analyzer.classify_time_of_day_str(&timestamp)?;
            print_json(&json!({
                "timestamp": timestamp,
                "time_of_day": segment,
                "label": segment.display_label(),
            }))
        }
        EnergyAction::Curve { file, chart } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            let curve = analyzer.build_energy_curve(&entries);
            if chart {
                println!("{}", render_energy_chart(&curve));
                Ok(())
            } else {
                print_json(&curve)
            }
        }
        EnergyAction::Segments { file } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            print_json(&analyzer.build_time_of_day_energy(&entries))
        }
        EnergyAction::Heatmap { file } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            print_json(&analyzer.build_energy_heatmap(&entries))
        }
        EnergyAction::Peak { file } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            print_json(&json!({ "peak_time": analyzer.find_peak_energy_time(&entries) }))
        }
        EnergyAction::Trend { file } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            print_json(&analyzer.classify_energy_trend(&entries))
        }
        EnergyAction::Optimal { file, level } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            let curve = analyzer.build_energy_curve(&entries);
            let best = analyzer.find_optimal_task_time(level, &curve);
            print_json(&json!({ "energy_level": level, "optimal": best }))
        }
        EnergyAction::Summary { file } => {
            let entries: Vec<EnergyLogEntry> = read_records(&file)?;
            print_json(&analyzer.summarize(&entries))
        }
    }
}
