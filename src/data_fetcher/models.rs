use serde::Deserialize;
use serde_json::Value;

/// OAuth client-credentials token response.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Listings search response. Only `elementList` is read; the rest is kept
/// verbatim in the raw body.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchResponse {
    #[serde(rename = "elementList")]
    pub element_list: Vec<Value>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u64>,
    #[serde(rename = "actualPage", default)]
    pub actual_page: Option<u64>,
}

/// Result of one listings search: the raw body and its records.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub raw: Value,
    pub elements: Vec<Value>,
}

/// One row of the person register. Unused columns are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlayerIdRecord {
    #[serde(default)]
    pub name_last: String,
    #[serde(default)]
    pub name_first: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub key_mlbam: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub mlb_played_first: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub mlb_played_last: Option<u32>,
}

impl PlayerIdRecord {
    /// Case-insensitive match on trimmed last and first name.
    pub fn matches_name(&self, last: &str, first: &str) -> bool {
        self.name_last.trim().to_lowercase() == last.trim().to_lowercase()
            && self.name_first.trim().to_lowercase() == first.trim().to_lowercase()
    }
}
