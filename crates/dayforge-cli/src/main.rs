use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayforge", version, about = "Dayforge energy and goal analytics")]
struct Cli {
    /// IANA time zone used to read timestamps (overrides the configured zone)
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Log analytics decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Energy log analytics
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Goal progress analytics
    Goals {
        #[command(subcommand)]
        action: commands::goals::GoalsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tz = cli.tz.as_deref();
    let result = match cli.command {
        Commands::Energy { action } => commands::energy::run(action, tz),
        Commands::Goals { action } => commands::goals::run(action, tz),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
