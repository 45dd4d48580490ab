//! URL building utilities for API endpoints

use crate::config::ListingsConfig;
use crate::constants::listings::API_VERSION;
use crate::error::AppError;
use url::Url;

fn parse_base(base: &str) -> Result<Url, AppError> {
    Url::parse(base).map_err(|e| AppError::config_error(format!("Invalid URL '{base}': {e}")))
}

/// Joins `segments` onto `base`, keeping any path `base` already has.
fn join_path(base: &str, segments: &[&str]) -> Result<Url, AppError> {
    let mut url = parse_base(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AppError::config_error(format!("URL '{base}' cannot take a path")))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Builds the OAuth token URL with the client-credentials grant.
///
/// # Example
/// ```
/// use playground_datasets::data_fetcher::urls::build_token_url;
///
/// let url = build_token_url("https://api.example.com/oauth/token").unwrap();
/// assert_eq!(url.as_str(), "https://api.example.com/oauth/token?grant_type=client_credentials");
/// ```
pub fn build_token_url(token_url: &str) -> Result<Url, AppError> {
    let mut url = parse_base(token_url)?;
    url.query_pairs_mut()
        .append_pair("grant_type", "client_credentials");
    Ok(url)
}

/// Builds the listings search URL for one page.
///
/// # Example
/// ```
/// use playground_datasets::config::ListingsConfig;
/// use playground_datasets::data_fetcher::urls::build_search_url;
///
/// let url = build_search_url(&ListingsConfig::default()).unwrap();
/// assert!(url.as_str().starts_with("https://api.idealista.com/3.5/es/search?operation=rent"));
/// ```
pub fn build_search_url(listings: &ListingsConfig) -> Result<Url, AppError> {
    let mut url = join_path(
        &listings.api_base_url,
        &[API_VERSION, listings.country.as_str(), "search"],
    )?;

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("operation", &listings.operation)
            .append_pair("maxItems", &listings.max_items.to_string())
            .append_pair("order", &listings.order)
            .append_pair("center", &listings.center)
            .append_pair("distance", &listings.distance.to_string())
            .append_pair("propertyType", &listings.property_type)
            .append_pair("sort", &listings.sort)
            .append_pair("numPage", &listings.num_page.to_string())
            .append_pair("language", &listings.language);

        if let Some(bank_offer) = listings.bank_offer {
            query.append_pair("bankOffer", &bank_offer.to_string());
        }
    }

    Ok(url)
}

/// Builds the URL of one person register file.
///
/// # Example
/// ```
/// use playground_datasets::data_fetcher::urls::build_register_url;
///
/// let url = build_register_url("https://example.com/register/data", "people-a.csv").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/register/data/people-a.csv");
/// ```
pub fn build_register_url(register_base_url: &str, file: &str) -> Result<Url, AppError> {
    join_path(register_base_url, &[file])
}

/// Builds the Statcast search URL for one batter's pitch-level events.
///
/// Regular season, postseason and spring games are included, matching the
/// site's default game types.
pub fn build_statcast_batter_url(
    savant_base_url: &str,
    player_id: u32,
    start_date: &str,
    end_date: &str,
) -> Result<Url, AppError> {
    let mut url = join_path(savant_base_url, &["statcast_search", "csv"])?;

    url.query_pairs_mut()
        .append_pair("all", "true")
        .append_pair("hfGT", "R|PO|S|")
        .append_pair("player_type", "batter")
        .append_pair("game_date_gt", start_date)
        .append_pair("game_date_lt", end_date)
        .append_pair("batters_lookup[]", &player_id.to_string())
        .append_pair("min_pitches", "0")
        .append_pair("min_results", "0")
        .append_pair("group_by", "name")
        .append_pair("sort_col", "pitches")
        .append_pair("player_event_sort", "h_launch_speed")
        .append_pair("sort_order", "desc")
        .append_pair("min_abs", "0")
        .append_pair("type", "details");

    Ok(url)
}
