//! Pitch-level Statcast events from Baseball Savant's CSV search.

use reqwest::Client;
use tracing::{info, instrument};

use crate::config::validation::validate_date_range;
use crate::data_fetcher::fetch_utils::send_request;
use crate::data_fetcher::urls::build_statcast_batter_url;
use crate::error::AppError;
use crate::table::Table;

/// Fetches every pitch seen by `player_id` between `start_date` and
/// `end_date` (inclusive, YYYY-MM-DD) as a table.
///
/// A date range without games gives an empty table, not an error.
///
/// # Errors
/// * `AppError::DateTimeParse` / `AppError::Config` - Invalid date range, checked before any request
/// * `AppError::ApiUnexpectedStructure` - The site answered with an HTML page instead of CSV
#[instrument(skip(client))]
pub async fn fetch_batter_events(
    client: &Client,
    savant_base_url: &str,
    player_id: u32,
    start_date: &str,
    end_date: &str,
) -> Result<Table, AppError> {
    validate_date_range(start_date, end_date)?;

    let url = build_statcast_batter_url(savant_base_url, player_id, start_date, end_date)?;
    let body = send_request(client.get(url.clone()), url.as_str()).await?;

    if body.trim_start().starts_with('<') {
        return Err(AppError::api_unexpected_structure(
            "Expected CSV but received an HTML page",
            url.as_str(),
        ));
    }

    let table = Table::from_csv_str(&body)?;
    info!(
        "Fetched {} events with {} columns for player {}",
        table.len(),
        table.columns().len(),
        player_id
    );
    Ok(table)
}
