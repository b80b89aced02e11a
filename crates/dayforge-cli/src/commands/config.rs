use clap::Subcommand;
use dayforge_core::{Config, ConfigError};

use super::{print_json, CommandResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the whole configuration
    Show,
    /// Get a config value
    Get {
        /// Config key (e.g. "analytics.timezone", "goals.velocity_window_days")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print_json(&config)?;
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key).ok_or(ConfigError::MissingKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
