use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// trailhead - Mt. Baker training plan tracker
#[derive(Parser)]
#[command(name = "trailhead")]
#[command(about = "Daily workouts and completion tracking on a Google Sheet", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Read both worksheets and report what they contain
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = trailhead::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    trailhead::observability::init_observability(
        "trailhead",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Check => cli::check(config).await,
    }
}
