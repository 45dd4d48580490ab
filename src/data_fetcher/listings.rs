//! Listings API access: client-credentials authentication and search.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::ListingsConfig;
use crate::constants::listings::ELEMENT_LIST_FIELD;
use crate::data_fetcher::fetch_utils::{parse_json, send_request};
use crate::data_fetcher::models::{SearchResponse, SearchResult, TokenResponse};
use crate::data_fetcher::urls::{build_search_url, build_token_url};
use crate::error::AppError;

const TOKEN_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Exchanges the configured Basic credentials for a bearer token.
///
/// # Errors
/// * `AppError::ApiUnauthorized` - The token endpoint rejected the credentials
/// * `AppError::ApiUnexpectedStructure` - The response has no `access_token`
#[instrument(skip(client, listings))]
pub async fn get_oauth_token(client: &Client, listings: &ListingsConfig) -> Result<String, AppError> {
    let url = build_token_url(&listings.token_url)?;

    let request = client
        .post(url.clone())
        .header(CONTENT_TYPE, TOKEN_CONTENT_TYPE)
        .header(AUTHORIZATION, format!("Basic {}", listings.auth_string));

    let body = send_request(request, url.as_str()).await?;
    let token: TokenResponse = parse_json(&body, url.as_str())?;

    info!(
        "Obtained {} token (expires in {:?}s)",
        token.token_type.as_deref().unwrap_or("bearer"),
        token.expires_in
    );
    Ok(token.access_token)
}

/// Runs one listings search with `token` and returns the raw response and
/// its `elementList` records.
///
/// Only the configured `num_page` is requested; further pages are not
/// followed even when the response reports them.
#[instrument(skip(client, listings, token))]
pub async fn search_listings(
    client: &Client,
    listings: &ListingsConfig,
    token: &str,
) -> Result<SearchResult, AppError> {
    let url = build_search_url(listings)?;

    let request = client.post(url.clone()).bearer_auth(token);

    let body = send_request(request, url.as_str()).await?;
    let raw: Value = parse_json(&body, url.as_str())?;

    let elements = match raw.get(ELEMENT_LIST_FIELD) {
        Some(Value::Array(elements)) => elements.clone(),
        Some(_) => {
            return Err(AppError::api_unexpected_structure(
                format!("'{ELEMENT_LIST_FIELD}' is not an array"),
                url.as_str(),
            ));
        }
        None => {
            return Err(AppError::api_unexpected_structure(
                format!("Response has no '{ELEMENT_LIST_FIELD}' field"),
                url.as_str(),
            ));
        }
    };

    if let Ok(paging) = serde_json::from_value::<SearchResponse>(raw.clone())
        && let Some(total_pages) = paging.total_pages
        && total_pages > 1
    {
        warn!(
            "Search reports {} pages ({} results); only page {} was fetched",
            total_pages,
            paging.total.unwrap_or_default(),
            paging.actual_page.unwrap_or(u64::from(listings.num_page))
        );
    }

    info!("Search returned {} listings", elements.len());
    Ok(SearchResult { raw, elements })
}
