// Host configuration - Tempo, pattern shape, MIDI routing, poll rate
// RON by default, JSON when the file extension says so

use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "notestep";
const CONFIG_FILE: &str = "config.ron";

/// Settings for the `notestep` host loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Initial tempo in BPM
    pub tempo_bpm: f32,
    /// Sleep between timing polls
    pub poll_interval_ms: u64,
    /// Output port name; `None` picks the first available port
    pub midi_port: Option<String>,
    /// Client name announced to the MIDI backend
    pub client_name: String,
    /// 0-based MIDI channel
    pub channel: u8,
    pub steps_per_beat: u8,
    pub pattern_length: u8,
    /// Start playing as soon as the host loop runs
    pub autoplay: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            poll_interval_ms: 1,
            midi_port: None,
            client_name: "notestep".to_string(),
            channel: 0,
            steps_per_beat: 4,
            pattern_length: 16,
            autoplay: false,
        }
    }
}

impl HostConfig {
    /// `<config_dir>/notestep/config.ron`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Parse a config file (`.json` as JSON, anything else as RON)
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let config: Self = if is_json {
            serde_json::from_str(&data)?
        } else {
            ron::from_str(&data)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit path, or the default path if it exists, or defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            Some(default) => {
                log::info!("No config at {:?}, using defaults", default);
                Ok(Self::default())
            }
            None => {
                log::warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SeqError::Config(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if !(self.tempo_bpm > 0.0) {
            return Err(SeqError::Config(format!(
                "tempo_bpm must be > 0, got {}",
                self.tempo_bpm
            )));
        }
        if self.channel > 15 {
            return Err(SeqError::Config(format!(
                "channel must be 0..=15, got {}",
                self.channel
            )));
        }
        Ok(())
    }
}
