//! Configuration for Tabula
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a Tabula session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Persistence Configuration
    // -------------------------------------------------------------------------
    /// Database file loaded at open and written by a bare `save`.
    /// `None` keeps the session purely in memory.
    pub data_file: Option<PathBuf>,

    /// How the decoder treats lines it does not recognize
    pub load_mode: LoadMode,

    /// Write the data file back when the session closes
    pub autosave: bool,

    /// Treat a missing data file as an empty database instead of an error
    pub create_missing: bool,
}

/// Decoder strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Skip unrecognized lines and log them (partial or foreign files still load)
    #[default]
    Lenient,

    /// Fail on the first unrecognized line with `MalformedEncoding`
    Strict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            load_mode: LoadMode::Lenient,
            autosave: false,
            create_missing: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = Some(path.into());
        self
    }

    /// Set the decoder strictness
    pub fn load_mode(mut self, mode: LoadMode) -> Self {
        self.config.load_mode = mode;
        self
    }

    /// Save the data file when the session closes
    pub fn autosave(mut self, enabled: bool) -> Self {
        self.config.autosave = enabled;
        self
    }

    /// Allow opening a data file that does not exist yet
    pub fn create_missing(mut self, enabled: bool) -> Self {
        self.config.create_missing = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
