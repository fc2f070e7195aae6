use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// homeplate - family meal planning
#[derive(Parser)]
#[command(name = "homeplate")]
#[command(about = "Weekly meal plan generation service", long_about = None)]
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
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = homeplate::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    homeplate::observability::init_observability("homeplate", &config.observability)?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Migrate => homeplate::migrate::migrate(&config).await,
        Commands::Reset => homeplate::migrate::reset(&config).await,
    }
}
