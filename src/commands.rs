//! The two data pulls, from request to files on disk.

use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::chart::render_spray_chart;
use crate::config::Config;
use crate::constants::listings::RAW_RESPONSE_FILE;
use crate::constants::player_stats::HOME_TEAM_COLUMN;
use crate::data_fetcher::{fetch_batter_events, get_oauth_token, lookup_player_id, search_listings};
use crate::error::AppError;
use crate::export::{ensure_directory, write_csv, write_json, write_pretty_json};
use crate::table::Table;

/// Column the spray chart is coloured by.
const COLOR_BY_COLUMN: &str = "bb_type";

/// Files written by a listings pull.
#[derive(Debug, Clone)]
pub struct ListingsOutcome {
    pub listing_count: usize,
    pub raw_path: PathBuf,
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

/// Files written by a player stats pull.
#[derive(Debug, Clone)]
pub struct PlayerStatsOutcome {
    pub player_id: u32,
    pub fetched_events: usize,
    pub kept_events: usize,
    pub charted_events: usize,
    pub csv_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Authenticates, runs one listings search and writes the raw response,
/// the CSV table and the JSON table.
pub async fn run_listings(client: &Client, config: &Config) -> Result<ListingsOutcome, AppError> {
    config.validate_for_listings()?;
    let listings = &config.listings;

    let token = get_oauth_token(client, listings).await?;
    let result = search_listings(client, listings, &token).await?;

    let output_dir = Path::new(&config.output_dir);
    ensure_directory(output_dir).await?;

    let raw_path = write_pretty_json(&result.raw, &output_dir.join(RAW_RESPONSE_FILE)).await?;

    let table = Table::from_records(result.elements);
    let stem = listings.output_stem(&config.output_dir);
    let csv_path = write_csv(&table, Path::new(&format!("{stem}.csv"))).await?;
    let json_path = write_json(&table, Path::new(&format!("{stem}.json"))).await?;

    info!(
        "Saved {} listings to {} and {}",
        table.len(),
        csv_path.display(),
        json_path.display()
    );

    Ok(ListingsOutcome {
        listing_count: table.len(),
        raw_path,
        csv_path,
        json_path,
    })
}

/// Resolves the player, downloads their events, keeps home games of the
/// configured team and writes the CSV and the spray chart.
///
/// Nothing is written when the player lookup fails.
pub async fn run_player_stats(
    client: &Client,
    config: &Config,
) -> Result<PlayerStatsOutcome, AppError> {
    config.validate_for_player_stats()?;
    let stats = &config.player_stats;

    let player_id = lookup_player_id(client, stats).await?;
    let events = fetch_batter_events(
        client,
        &stats.savant_base_url,
        player_id,
        &stats.start_date,
        &stats.end_date,
    )
    .await?;

    let home_events = events.filter_eq(HOME_TEAM_COLUMN, &stats.home_team);
    info!(
        "Kept {} of {} events with {} = {}",
        home_events.len(),
        events.len(),
        HOME_TEAM_COLUMN,
        stats.home_team
    );

    let output_dir = Path::new(&config.output_dir);
    ensure_directory(output_dir).await?;

    let csv_path = write_csv(&home_events, &output_dir.join(&stats.csv_file)).await?;

    let chart_path = output_dir.join(&stats.chart_file);
    let charted_events =
        render_spray_chart(&home_events, &stats.chart_title, COLOR_BY_COLUMN, &chart_path)?;

    Ok(PlayerStatsOutcome {
        player_id,
        fetched_events: events.len(),
        kept_events: home_events.len(),
        charted_events,
        csv_path,
        chart_path,
    })
}
