//! Engine configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are safe to start
//! with, so a missing file or key only costs a log line.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! tick_ms = 16
//!
//! [tileset]
//! descriptor = ./assets/tileset/tileset.json
//! case_policy = normalize
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::tileattributes::CasePolicy;
use crate::resources::simclock::DEFAULT_TICK_MS;

const DEFAULT_DESCRIPTOR_PATH: &str = "./assets/tileset/tileset.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Simulation tick length in milliseconds.
    pub tick_ms: u32,
    /// Path to the JSON tileset descriptor.
    pub descriptor_path: PathBuf,
    /// How declared enum values with unusual case or spacing are handled.
    pub case_policy: CasePolicy,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            descriptor_path: PathBuf::from(DEFAULT_DESCRIPTOR_PATH),
            case_policy: CasePolicy::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Returns an error if the
    /// file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: tick_ms={}, descriptor={:?}, case_policy={}",
            self.tick_ms,
            self.descriptor_path,
            self.case_policy.name()
        );
        Ok(())
    }

    /// Load configuration from INI text. Used by tests and embedded defaults.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [simulation] section
        if let Some(tick_ms) = config.getuint("simulation", "tick_ms").ok().flatten() {
            if tick_ms == 0 || tick_ms > u64::from(u32::MAX) {
                warn!("Ignoring invalid tick_ms {}", tick_ms);
            } else {
                self.tick_ms = tick_ms as u32;
            }
        }

        // [tileset] section
        if let Some(descriptor) = config.get("tileset", "descriptor") {
            self.descriptor_path = PathBuf::from(descriptor);
        }
        if let Some(policy) = config.get("tileset", "case_policy") {
            match CasePolicy::from_name(&policy) {
                Some(policy) => self.case_policy = policy,
                None => warn!("Ignoring unknown case_policy {:?}", policy),
            }
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("simulation", "tick_ms", Some(self.tick_ms.to_string()));
        config.set(
            "tileset",
            "descriptor",
            Some(self.descriptor_path.display().to_string()),
        );
        config.set(
            "tileset",
            "case_policy",
            Some(self.case_policy.name().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }
}
