//! The configuration record, its defaults and TOML persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use starsaver_core::{CellSize, FontSpec, Rgba};
use toml::{Table, Value};
use tracing::{info, warn};

use crate::error::ConfigError;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const MAX_STARS: u32 = 10_000;
const MIN_TIMING_MS: u64 = 10;
const MAX_TIMING_MS: u64 = 10_000;
const MAX_CELL: u16 = 16;
const MAX_FONT_SIZE: u16 = 4;

/// Settings for one run of the star field.
///
/// A snapshot is immutable while the animation runs; changing settings
/// means building a new snapshot and reinitializing the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    /// How many stars the field holds.
    pub number_of_stars: u32,
    /// Each resting star starts a nova with a 1-in-N chance per tick.
    /// Zero or less disables novas.
    pub nova_probability: i64,
    /// Milliseconds between ticks.
    pub animation_timing: u64,
    /// Ticks between drift steps.
    pub ticks_before_move: u32,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Sprite footprint in terminal cells.
    pub star_size: CellSize,
    /// Clock overlay. Absent means no overlay.
    pub clock: Option<ClockConfig>,
}

/// Clock overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockConfig {
    /// `strftime`-style format. Absent or empty disables the overlay.
    pub date_format: Option<String>,
    pub color: Rgba,
    pub font: FontSpec,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            date_format: Some("%H:%M:%S".to_string()),
            color: Rgba::WHITE,
            font: FontSpec::default(),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            number_of_stars: 150,
            nova_probability: 2000,
            animation_timing: 50,
            ticks_before_move: 4,
            log_level: "info".to_string(),
            star_size: CellSize::default(),
            clock: Some(ClockConfig::default()),
        }
    }
}

/// Values confirmed in the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsEdit {
    pub number_of_stars: u32,
    pub nova_probability: i64,
    pub animation_timing: u64,
}

/// Platform config directory for starsaver.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "starsaver", "starsaver")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(ConfigError::NoConfigDir)
}

/// Overwrite `slot` with `table[key]` if present and well-typed.
fn read_field<T: DeserializeOwned>(table: &Table, key: &str, slot: &mut T) {
    let Some(value) = table.get(key) else {
        return;
    };
    match value.clone().try_into::<T>() {
        Ok(parsed) => *slot = parsed,
        Err(err) => warn!(key, "invalid config value, using default: {err}"),
    }
}

impl Configuration {
    /// Parse a TOML document and clamp it into valid ranges.
    ///
    /// Only a document that is not TOML at all is an error. A field with
    /// the wrong type is reported and replaced by its default, leaving the
    /// other fields as written.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table: Table = contents.parse().map_err(ConfigError::Parse)?;
        let mut config = Self {
            clock: None,
            ..Self::default()
        };
        read_field(&table, "number_of_stars", &mut config.number_of_stars);
        read_field(&table, "nova_probability", &mut config.nova_probability);
        read_field(&table, "animation_timing", &mut config.animation_timing);
        read_field(&table, "ticks_before_move", &mut config.ticks_before_move);
        read_field(&table, "log_level", &mut config.log_level);
        read_field(&table, "star_size", &mut config.star_size);

        match table.get("clock") {
            None => {}
            Some(Value::Table(clock)) => {
                let mut overlay = ClockConfig {
                    date_format: None,
                    ..ClockConfig::default()
                };
                read_field(clock, "date_format", &mut overlay.date_format);
                read_field(clock, "color", &mut overlay.color);
                read_field(clock, "font", &mut overlay.font);
                config.clock = Some(overlay);
            }
            Some(other) => warn!(
                key = "clock",
                "expected a table, found {}; clock overlay disabled",
                other.type_str()
            ),
        }

        Ok(config.sanitized())
    }

    /// Load and sanitize the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_toml_str(&contents)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the configuration, never failing.
    ///
    /// A missing file is created with defaults. A file that cannot be read
    /// or is not TOML is reported and defaults are used for this run.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save(path) {
                Ok(()) => info!("created default config at {}", path.display()),
                Err(err) => warn!("could not write default config: {err}"),
            }
            return config;
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("using default config: {err}");
                Self::default()
            }
        }
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, serialized).map_err(ConfigError::Write)
    }

    /// Re-read `path`, returning the new snapshot only when it differs.
    pub fn reload(&self, path: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::load(path)?;
        if &fresh != self {
            info!("config reloaded with changes");
            Ok(Some(fresh))
        } else {
            Ok(None)
        }
    }

    /// Clamp every field into its valid range.
    pub fn sanitized(mut self) -> Self {
        if self.number_of_stars > MAX_STARS {
            warn!(
                "number_of_stars {} clamped to {MAX_STARS}",
                self.number_of_stars
            );
            self.number_of_stars = MAX_STARS;
        }
        if self.nova_probability < 0 {
            warn!(
                "nova_probability {} clamped to 0 (novas disabled)",
                self.nova_probability
            );
            self.nova_probability = 0;
        }
        let timing = self.animation_timing.clamp(MIN_TIMING_MS, MAX_TIMING_MS);
        if timing != self.animation_timing {
            warn!(
                "animation_timing {}ms clamped to {timing}ms",
                self.animation_timing
            );
            self.animation_timing = timing;
        }
        if self.ticks_before_move == 0 {
            warn!("ticks_before_move 0 clamped to 1");
            self.ticks_before_move = 1;
        }
        self.star_size = CellSize::new(
            self.star_size.width.clamp(1, MAX_CELL),
            self.star_size.height.clamp(1, MAX_CELL),
        );
        if let Some(clock) = self.clock.as_mut() {
            if clock
                .date_format
                .as_deref()
                .is_some_and(|f| f.trim().is_empty())
            {
                clock.date_format = None;
            }
            clock.font.size = clock.font.size.clamp(1, MAX_FONT_SIZE);
        }
        self
    }

    /// Tick interval of the animation loop.
    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_timing)
    }

    /// Clock settings if the overlay is enabled.
    pub fn clock_overlay(&self) -> Option<&ClockConfig> {
        self.clock
            .as_ref()
            .filter(|clock| clock.date_format.is_some())
    }

    /// Apply values confirmed in the settings dialog.
    pub fn apply_edit(&self, edit: SettingsEdit) -> Self {
        Self {
            number_of_stars: edit.number_of_stars,
            nova_probability: edit.nova_probability,
            animation_timing: edit.animation_timing,
            ..self.clone()
        }
        .sanitized()
    }

    /// The values the settings dialog edits.
    pub fn settings_edit(&self) -> SettingsEdit {
        SettingsEdit {
            number_of_stars: self.number_of_stars,
            nova_probability: self.nova_probability,
            animation_timing: self.animation_timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let toml_str = toml::to_string_pretty(&Configuration::default()).unwrap();
        assert!(toml_str.contains("number_of_stars = 150"));
        assert!(toml_str.contains("date_format = \"%H:%M:%S\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Configuration::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert_eq!(Configuration::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Configuration::from_toml_str("number_of_stars = 3").unwrap();
        assert_eq!(config.number_of_stars, 3);
        assert_eq!(config.nova_probability, 2000);
        assert_eq!(config.ticks_before_move, 4);
        assert_eq!(config.star_size, CellSize::new(1, 1));
    }

    #[test]
    fn test_absent_clock_disables_overlay() {
        let config = Configuration::from_toml_str("number_of_stars = 3").unwrap();
        assert!(config.clock_overlay().is_none());

        let config = Configuration::from_toml_str("[clock]\ncolor = { r = 1, g = 2, b = 3, a = 255 }")
            .unwrap();
        assert!(config.clock.is_some());
        assert!(config.clock_overlay().is_none());
    }

    #[test]
    fn test_empty_date_format_disables_overlay() {
        let config = Configuration::from_toml_str("[clock]\ndate_format = \"  \"").unwrap();
        assert!(config.clock_overlay().is_none());
    }

    #[test]
    fn test_clock_section_parses() {
        let toml_str = r#"
            [clock]
            date_format = "%H:%M"
            color = { r = 255, g = 0, b = 0, a = 200 }
            font = { family = "plain", size = 9 }
        "#;
        let config = Configuration::from_toml_str(toml_str).unwrap();
        let clock = config.clock_overlay().unwrap();
        assert_eq!(clock.date_format.as_deref(), Some("%H:%M"));
        assert_eq!(clock.color, Rgba::new(255, 0, 0, 200));
        assert_eq!(clock.font.family, "plain");
        assert_eq!(clock.font.size, MAX_FONT_SIZE);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let toml_str = r#"
            number_of_stars = 99999
            nova_probability = -5
            animation_timing = 1
            ticks_before_move = 0
            star_size = { width = 0, height = 40 }
        "#;
        let config = Configuration::from_toml_str(toml_str).unwrap();
        assert_eq!(config.number_of_stars, MAX_STARS);
        assert_eq!(config.nova_probability, 0);
        assert_eq!(config.animation_timing, MIN_TIMING_MS);
        assert_eq!(config.ticks_before_move, 1);
        assert_eq!(config.star_size, CellSize::new(1, MAX_CELL));
    }

    #[test]
    fn test_malformed_field_keeps_valid_neighbours() {
        let toml_str = r#"
            number_of_stars = "lots"
            nova_probability = 7
            ticks_before_move = 3

            [clock]
            date_format = "%H"
            font = "huge"
        "#;
        let config = Configuration::from_toml_str(toml_str).unwrap();
        assert_eq!(config.number_of_stars, 150);
        assert_eq!(config.nova_probability, 7);
        assert_eq!(config.ticks_before_move, 3);
        let clock = config.clock_overlay().unwrap();
        assert_eq!(clock.date_format.as_deref(), Some("%H"));
        assert_eq!(clock.font, FontSpec::default());
    }

    #[test]
    fn test_clock_that_is_not_a_table_disables_overlay() {
        let config = Configuration::from_toml_str("clock = 5\nnova_probability = 9").unwrap();
        assert!(config.clock.is_none());
        assert_eq!(config.nova_probability, 9);
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "number_of_stars = = [").unwrap();

        assert!(matches!(
            Configuration::load(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(Configuration::load_or_default(&path), Configuration::default());
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Configuration::load_or_default(&path);
        assert_eq!(config, Configuration::default());
        assert!(path.exists());
        assert_eq!(Configuration::load(&path).unwrap(), config);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = Configuration::default();
        config.save(&path).unwrap();
        assert_eq!(config.reload(&path).unwrap(), None);

        let mut modified = config.clone();
        modified.number_of_stars = 12;
        modified.save(&path).unwrap();
        let reloaded = config.reload(&path).unwrap().unwrap();
        assert_eq!(reloaded.number_of_stars, 12);
    }

    #[test]
    fn test_apply_edit() {
        let config = Configuration::default();
        let edited = config.apply_edit(SettingsEdit {
            number_of_stars: 40,
            nova_probability: 10,
            animation_timing: 0,
        });
        assert_eq!(edited.number_of_stars, 40);
        assert_eq!(edited.nova_probability, 10);
        assert_eq!(edited.animation_timing, MIN_TIMING_MS);
        assert_eq!(edited.clock, config.clock);
        assert_eq!(edited.settings_edit().number_of_stars, 40);
    }
}
