use anyhow::Result;
use clap::{Parser, Subcommand};
use todo_core::{config::Config, migration, server, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations, seed the default user, then serve HTTP (default)
    Serve,
    /// Run database migrations and exit
    Migrate,
    /// Create the default user if it does not exist and exit
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    telemetry::init(&config.telemetry);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting Todo Core Service");
            server::run(config).await
        }
        Commands::Migrate => {
            let pool = migration::connect(&config.database).await?;
            migration::run_migrations(&pool).await?;
            pool.close().await;
            Ok(())
        }
        Commands::Seed => {
            let pool = migration::connect(&config.database).await?;
            let user_id = migration::seed_default_user(&pool, &config.seed).await?;
            info!(user_id = %user_id, "Seed complete");
            pool.close().await;
            Ok(())
        }
    }
}
