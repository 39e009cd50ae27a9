//! Tracing setup.
//!
//! The terminal belongs to the animation, so log output goes to a file in
//! the platform data directory instead of stderr.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::warn;
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Handle for swapping the level filter once the config is known.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "starsaver.log";

/// Platform data directory used for logs.
pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "starsaver", "starsaver")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
}

/// Build the filter: `RUST_LOG` if set, else `level`, else `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `log_dir/starsaver.log`.
///
/// Called before the config is loaded so its warnings are recorded; the
/// returned handle applies the configured level afterwards. Logging stays
/// off when the directory or file cannot be created.
pub fn init_logging(log_dir: Option<&Path>, level: &str) -> Option<FilterHandle> {
    let log_dir = log_dir?;
    fs::create_dir_all(log_dir).ok()?;
    let log_file = File::create(log_dir.join(LOG_FILE_NAME)).ok()?;

    let (filter, handle) = reload::Layer::new(env_filter(level));
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .ok()?;
    Some(handle)
}

/// Switch to `level`, unless `RUST_LOG` is set.
pub fn set_level(handle: &FilterHandle, level: &str) {
    if let Err(err) = handle.reload(env_filter(level)) {
        warn!("could not change log level: {err}");
    }
}
