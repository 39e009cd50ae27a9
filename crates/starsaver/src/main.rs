use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use starsaver_config::{CONFIG_FILE_NAME, CliArgs, Configuration, default_config_dir};
use starsaver_core::StarRng;
use tracing::{info, warn};

use crate::app::App;

mod app;
mod logging;
mod settings;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();

    let log_handle = logging::init_logging(
        logging::default_log_dir().as_deref(),
        args.log_level.as_deref().unwrap_or("info"),
    );

    let config_path = args.config.clone().unwrap_or_else(|| {
        default_config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME))
    });
    let mut config = Configuration::load_or_default(&config_path);
    config.apply_cli_overrides(&args);
    let config = config.sanitized();

    if let Some(handle) = &log_handle {
        logging::set_level(handle, &config.log_level);
    }
    info!(
        config = %config_path.display(),
        stars = config.number_of_stars,
        nova_probability = config.nova_probability,
        timing_ms = config.animation_timing,
        "starting starsaver"
    );

    let rng = match args.seed {
        Some(seed) => StarRng::seeded(seed),
        None => StarRng::from_entropy(),
    };

    let terminal = ratatui::init();
    if let Err(err) = execute!(stdout(), EnableFocusChange) {
        warn!("terminal focus reporting unavailable: {err}");
    }
    let result = App::new(config, config_path, rng).run(terminal);
    if let Err(err) = execute!(stdout(), DisableFocusChange) {
        warn!("could not disable focus reporting: {err}");
    }
    ratatui::restore();
    result
}
