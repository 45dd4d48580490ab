pub mod fetch_utils;
pub mod http_client;
pub mod listings;
pub mod models;
pub mod players;
pub mod statcast;
pub mod urls;

pub use http_client::create_http_client_with_timeout;
pub use listings::{get_oauth_token, search_listings};
pub use models::{PlayerIdRecord, SearchResult, TokenResponse};
pub use players::lookup_player_id;
pub use statcast::fetch_batter_events;
