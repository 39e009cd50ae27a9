//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{ClockConfig, Configuration};

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.toml` for this run only.
#[derive(Parser, Debug, Default)]
#[command(name = "starsaver", about = "A drifting field of stars with the occasional nova")]
pub struct CliArgs {
    /// Number of stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// One-in-N chance per tick that a resting star goes nova (0 disables).
    #[arg(long)]
    pub nova_probability: Option<i64>,

    /// Milliseconds between animation ticks.
    #[arg(long)]
    pub timing: Option<u64>,

    /// Ticks between drift steps.
    #[arg(long)]
    pub ticks_before_move: Option<u32>,

    /// Clock format, e.g. "%H:%M".
    #[arg(long, conflicts_with = "no_clock")]
    pub date_format: Option<String>,

    /// Hide the clock overlay.
    #[arg(long)]
    pub no_clock: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to the config file (overrides the default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed the random source for a reproducible field.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Configuration {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(n) = args.stars {
            self.number_of_stars = n;
        }
        if let Some(p) = args.nova_probability {
            self.nova_probability = p;
        }
        if let Some(t) = args.timing {
            self.animation_timing = t;
        }
        if let Some(t) = args.ticks_before_move {
            self.ticks_before_move = t;
        }
        if let Some(ref format) = args.date_format {
            self.clock.get_or_insert_with(ClockConfig::default).date_format = Some(format.clone());
        }
        if args.no_clock {
            self.clock = None;
        }
        if let Some(ref level) = args.log_level {
            self.log_level = level.clone();
        }
    }
}
