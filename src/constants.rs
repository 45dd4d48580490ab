//! Application-wide constants and default configuration values
//!
//! Defaults mirror the values the datasets were originally pulled with, so
//! running without a config file reproduces the same request.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Name used for the config directory and the default log file
pub const APP_NAME: &str = "playground_datasets";

/// Default log file name
pub const LOG_FILE_NAME: &str = "playground_datasets.log";

/// Listings search defaults
pub mod listings {
    pub const TOKEN_URL: &str = "https://api.idealista.com/oauth/token";
    pub const API_BASE_URL: &str = "https://api.idealista.com";
    pub const API_VERSION: &str = "3.5";

    /// Placeholder; the real value is the base64 of `apikey:secret`.
    pub const AUTH_STRING: &str = "generate_your_string";

    pub const COUNTRY: &str = "es";
    pub const LANGUAGE: &str = "es";
    pub const MAX_ITEMS: u32 = 100;
    pub const OPERATION: &str = "rent";
    pub const PROPERTY_TYPE: &str = "homes";
    pub const ORDER: &str = "priceDown";
    /// Puerta del Sol, Madrid
    pub const CENTER: &str = "40.4169019,-3.7056721";
    pub const DISTANCE_METERS: u32 = 60000;
    pub const SORT: &str = "desc";
    pub const NUM_PAGE: u32 = 1;

    /// Field of the search response holding the result records
    pub const ELEMENT_LIST_FIELD: &str = "elementList";

    /// File the raw search response is dumped to
    pub const RAW_RESPONSE_FILE: &str = "data.json";
}

/// Player stats defaults
pub mod player_stats {
    pub const REGISTER_BASE_URL: &str =
        "https://raw.githubusercontent.com/chadwickbureau/register/master/data";
    pub const SAVANT_BASE_URL: &str = "https://baseballsavant.mlb.com";

    /// Hex suffixes of the sharded `people-*.csv` register files
    pub const REGISTER_SHARDS: &str = "0123456789abcdef";

    pub const LAST_NAME: &str = "perez";
    pub const FIRST_NAME: &str = "salvador";
    pub const START_DATE: &str = "2021-03-31";
    pub const END_DATE: &str = "2021-09-30";
    pub const HOME_TEAM: &str = "KC";
    pub const CHART_TITLE: &str = "Salvador Perez MAR-SEP";
    pub const CSV_FILE: &str = "salvador_perez.csv";
    pub const CHART_FILE: &str = "salvador_perez_spray.svg";

    /// Column the home-team filter is applied to
    pub const HOME_TEAM_COLUMN: &str = "home_team";
}

/// Spray chart geometry
pub mod chart {
    /// Home plate position in Statcast hit-coordinate space
    pub const HOME_PLATE_X: f64 = 125.42;
    pub const HOME_PLATE_Y: f64 = 198.27;

    /// Hit coordinates to feet
    pub const FEET_PER_UNIT: f64 = 2.5;

    /// Generic outfield fence distance used for the field outline
    pub const FENCE_DISTANCE_FEET: f64 = 400.0;

    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 800;
    pub const POINT_SIZE: u32 = 4;
}
