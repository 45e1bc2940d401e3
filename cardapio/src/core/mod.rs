//! Core module - configuration and process setup

pub mod config;

pub use config::Config;

/// Load `.env` from the current directory, if present
pub fn setup_environment() {
    if let Ok(path) = dotenv::dotenv() {
        // Logger is not up yet
        eprintln!("Loaded environment from {}", path.display());
    }
}
