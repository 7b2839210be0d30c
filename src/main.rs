use clap::{Parser, Subcommand};

pub mod app;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod views;

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
    /// Reset the database and populate it with sample data
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve => app::serve::main().await,
        Commands::Seed => app::seed::main().await,
    }
}
