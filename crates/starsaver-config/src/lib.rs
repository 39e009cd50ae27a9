//! Configuration for the starsaver star field.
//!
//! The configuration is a TOML file in the platform config directory. It is
//! read once per run, sanitized into valid ranges, and may be replaced at
//! runtime by edits from the settings dialog or an explicit reload.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, ClockConfig, Configuration, SettingsEdit, default_config_dir};
pub use error::ConfigError;
