use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args as ClapArgs, Parser, Subcommand};
use playground_datasets::Config;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Playground dataset pulls
///
/// Fetches rental/sale listings from the listings API, or a batter's
/// Statcast events, and writes them to the datasets folder.
///
/// Settings come from the config file (see --list-config), then
/// PLAYGROUND_* environment variables, then the flags below.
#[derive(Parser, Debug)]
#[command(author = "Leonel Abreu", version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Write the effective settings (file, env and global flags) to the config file and exit.
    #[arg(long = "save-config", help_heading = "Configuration")]
    pub save_config: bool,

    /// Read configuration from this file instead of the default location.
    #[arg(long = "config", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Write datasets to this directory.
    #[arg(long = "output-dir", short = 'o', global = true, help_heading = "Configuration")]
    pub output_dir: Option<String>,

    /// Also log to stdout. Logs always go to the log file.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search listings once and save them as CSV and JSON
    Listings(ListingsArgs),
    /// Download a batter's Statcast events, save home games and a spray chart
    PlayerStats(PlayerStatsArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct ListingsArgs {
    /// Country of the search (es, it, pt)
    #[arg(long)]
    pub country: Option<String>,

    /// rent or sale
    #[arg(long)]
    pub operation: Option<String>,

    /// homes, offices, premises, garages, bedrooms
    #[arg(long = "property-type")]
    pub property_type: Option<String>,

    /// Maximum number of listings returned
    #[arg(long = "max-items")]
    pub max_items: Option<u32>,

    /// Search center as lat,lon
    #[arg(long, allow_hyphen_values = true)]
    pub center: Option<String>,

    /// Search radius in meters
    #[arg(long)]
    pub distance: Option<u32>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct PlayerStatsArgs {
    /// Player last name
    #[arg(long)]
    pub last: Option<String>,

    /// Player first name
    #[arg(long)]
    pub first: Option<String>,

    /// First game date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// Last game date, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,

    /// Keep only events played at this team's home park (e.g. KC)
    #[arg(long)]
    pub team: Option<String>,

    /// Spray chart title
    #[arg(long)]
    pub title: Option<String>,
}

fn set_if_some<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl Args {
    /// Applies the global flags on top of the loaded configuration.
    pub fn apply_global(&self, config: &mut Config) {
        set_if_some(&mut config.output_dir, &self.output_dir);
        if let Some(log_file) = &self.log_file {
            config.log_file_path = Some(log_file.clone());
        }
    }
}

impl ListingsArgs {
    pub fn apply(&self, config: &mut Config) {
        let listings = &mut config.listings;
        set_if_some(&mut listings.country, &self.country);
        set_if_some(&mut listings.operation, &self.operation);
        set_if_some(&mut listings.property_type, &self.property_type);
        set_if_some(&mut listings.max_items, &self.max_items);
        set_if_some(&mut listings.center, &self.center);
        set_if_some(&mut listings.distance, &self.distance);
    }
}

impl PlayerStatsArgs {
    pub fn apply(&self, config: &mut Config) {
        let stats = &mut config.player_stats;
        set_if_some(&mut stats.last_name, &self.last);
        set_if_some(&mut stats.first_name, &self.first);
        set_if_some(&mut stats.start_date, &self.start);
        set_if_some(&mut stats.end_date, &self.end);
        set_if_some(&mut stats.home_team, &self.team);
        set_if_some(&mut stats.chart_title, &self.title);
    }
}
