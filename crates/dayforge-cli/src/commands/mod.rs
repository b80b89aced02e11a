//! Subcommand handlers and the input/output plumbing they share.

pub mod config;
pub mod energy;
pub mod goals;

use std::io::Read;
use std::path::Path;

use dayforge_core::Config;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Stored configuration with an optional `--tz` override applied.
pub fn settings(tz: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if let Some(zone) = tz {
        config.set("analytics.timezone", zone)?;
    }
    Ok(config)
}

/// Read a whole file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()).into())
}

/// Parse a JSON array of records from `path`.
pub fn read_records<T: DeserializeOwned>(
    path: &Path,
) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let content = read_input(path)?;
    let records: Vec<T> = serde_json::from_str(&content)
        .map_err(|e| format!("invalid records in {}: {e}", path.display()))?;
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
