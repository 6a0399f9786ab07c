use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "VerboCare Triage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "info,verbocare_triage=debug".to_string()
}

/// Get the application data directory (~/.verbocare/)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".verbocare")
}

/// Default location of the case database.
pub fn database_path() -> PathBuf {
    app_data_dir().join("triage.db")
}
