// src/main.rs
mod cli;
mod logging;

use clap::{CommandFactory, Parser};
use cli::{Args, Command};
use playground_datasets::commands::{run_listings, run_player_stats};
use playground_datasets::config::Config;
use playground_datasets::data_fetcher::create_http_client_with_timeout;
use playground_datasets::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::get_config_path);
    let mut config = Config::load_or_default(&config_path).await?;
    args.apply_global(&mut config);

    if args.list_config {
        config.display(&config_path);
        return Ok(());
    }

    if args.save_config {
        config.save_to_path(&config_path).await?;
        println!("Config saved to {config_path}");
        return Ok(());
    }

    let Some(command) = &args.command else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    let (log_file_path, _guard) = logging::setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;

    match command {
        Command::Listings(listings_args) => {
            listings_args.apply(&mut config);
            let outcome = run_listings(&client, &config).await?;
            println!(
                "Saved {} listings:\n  {}\n  {}\n  {}",
                outcome.listing_count,
                outcome.csv_path.display(),
                outcome.json_path.display(),
                outcome.raw_path.display()
            );
        }
        Command::PlayerStats(stats_args) => {
            stats_args.apply(&mut config);
            let outcome = run_player_stats(&client, &config).await?;
            println!(
                "Player {}: kept {} of {} events ({} charted):\n  {}\n  {}",
                outcome.player_id,
                outcome.kept_events,
                outcome.fetched_events,
                outcome.charted_events,
                outcome.csv_path.display(),
                outcome.chart_path.display()
            );
        }
    }

    Ok(())
}
