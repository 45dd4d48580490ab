use crate::config::{ListingsConfig, PlayerStatsConfig};
use crate::error::AppError;
use chrono::NaiveDate;
use std::path::Path;

/// Date format accepted for the Statcast date range
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates the top-level settings shared by both flows.
///
/// # Validation Rules
/// - Output directory cannot be empty
/// - HTTP timeout must be positive
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_common(
    output_dir: &str,
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    if output_dir.trim().is_empty() {
        return Err(AppError::config_error("Output directory cannot be empty"));
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

/// Validates the listings search settings.
pub fn validate_listings(listings: &ListingsConfig) -> Result<(), AppError> {
    validate_url("listings.token_url", &listings.token_url)?;
    validate_url("listings.api_base_url", &listings.api_base_url)?;

    if listings.auth_string.trim().is_empty() {
        return Err(AppError::config_error("listings.auth_string cannot be empty"));
    }
    if listings.max_items == 0 {
        return Err(AppError::config_error("listings.max_items must be positive"));
    }
    if listings.num_page == 0 {
        return Err(AppError::config_error("listings.num_page starts at 1"));
    }

    for (name, value) in [
        ("listings.country", &listings.country),
        ("listings.operation", &listings.operation),
        ("listings.property_type", &listings.property_type),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::config_error(format!("{name} cannot be empty")));
        }
    }

    validate_center(&listings.center)
}

/// Validates the player stats settings, including the date range.
pub fn validate_player_stats(stats: &PlayerStatsConfig) -> Result<(), AppError> {
    validate_url("player_stats.register_base_url", &stats.register_base_url)?;
    validate_url("player_stats.savant_base_url", &stats.savant_base_url)?;

    if stats.register_files.is_empty() {
        return Err(AppError::config_error(
            "player_stats.register_files must list at least one file",
        ));
    }
    if stats.last_name.trim().is_empty() || stats.first_name.trim().is_empty() {
        return Err(AppError::config_error("Player first and last name are required"));
    }
    if stats.home_team.trim().is_empty() {
        return Err(AppError::config_error("player_stats.home_team cannot be empty"));
    }
    if stats.csv_file.trim().is_empty() || stats.chart_file.trim().is_empty() {
        return Err(AppError::config_error("Output file names cannot be empty"));
    }

    validate_date_range(&stats.start_date, &stats.end_date)?;
    Ok(())
}

/// Parses both dates and checks that `start` is not after `end`.
pub fn validate_date_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;

    if start_date > end_date {
        return Err(AppError::config_error(format!(
            "Start date {start} is after end date {end}"
        )));
    }

    Ok((start_date, end_date))
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        AppError::datetime_parse_error(format!("'{value}' is not a YYYY-MM-DD date: {e}"))
    })
}

fn validate_url(name: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::config_error(format!("{name} cannot be empty")));
    }

    let parsed = url::Url::parse(value)
        .map_err(|e| AppError::config_error(format!("{name} is not a valid URL: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::config_error(format!(
            "{name} must use http or https"
        )));
    }

    Ok(())
}

/// Search center is `lat,lon` in decimal degrees.
fn validate_center(center: &str) -> Result<(), AppError> {
    let mut parts = center.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AppError::config_error(format!(
            "listings.center '{center}' must be 'lat,lon'"
        )));
    };

    let lat: f64 = lat.trim().parse().map_err(|_| {
        AppError::config_error(format!("Invalid latitude in listings.center '{center}'"))
    })?;
    let lon: f64 = lon.trim().parse().map_err(|_| {
        AppError::config_error(format!("Invalid longitude in listings.center '{center}'"))
    })?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::config_error(format!(
            "listings.center '{center}' is out of range"
        )));
    }

    Ok(())
}
