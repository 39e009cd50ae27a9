//! Configuration error types.

/// Errors that can occur when loading or saving the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no usable config directory.
    #[error("could not resolve a configuration directory")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
}
