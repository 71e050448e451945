use clap::{Parser, Subcommand};

mod nearby;
mod split;

#[derive(Debug, Parser)]
#[command(name = "encore-cli")]
#[command(about = "Encore command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find shows near a position.
    Nearby(nearby::NearbyArgs),
    /// Split a donation into platform, referral, and artist shares.
    Split(split::SplitArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = encore_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Nearby(args) => nearby::run(&config, &args).await,
        Commands::Split(args) => split::run(&config, &args),
    }
}
