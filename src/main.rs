use anyhow::Result;
use clap::{Parser, Subcommand};

/// mclears - McLear's Cottage Colony inquiry service
#[derive(Parser)]
#[command(name = "mclears")]
#[command(about = "Contact inquiry form and delivery for McLear's Cottage Colony", long_about = None)]
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
    /// Send one inquiry through the configured delivery
    Inquire(mclears::cli::inquire::InquireArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mclears::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mclears::observability::init_observability(
        "mclears",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => mclears::cli::server::serve(config, host, port).await,
        Commands::Inquire(args) => mclears::cli::inquire::inquire(config, args).await,
    }
}
