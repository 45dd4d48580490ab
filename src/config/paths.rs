use crate::constants::APP_NAME;
use std::path::Path;

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_NAME)
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_NAME)
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the default directory datasets are written to:
/// `Documents/Playground/Datasets`, or `./Datasets` without a documents dir.
pub fn get_default_output_dir() -> String {
    match dirs::document_dir() {
        Some(documents) => documents.join("Playground").join("Datasets"),
        None => Path::new(".").join("Datasets"),
    }
    .to_string_lossy()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_layout() {
        let path = get_config_path();
        assert!(path.contains(APP_NAME));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_log_dir_layout() {
        let path = get_log_dir_path();
        assert!(path.contains(APP_NAME));
        assert!(path.ends_with("logs"));
    }

    #[test]
    fn test_default_output_dir_ends_with_datasets() {
        assert!(get_default_output_dir().ends_with("Datasets"));
    }
}
