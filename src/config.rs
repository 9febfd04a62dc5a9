use crate::error::{PoppyError, PoppyResult};
use crate::phrases::Location;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the OpenWeatherMap key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
/// Environment variable overriding `asset_root`
pub const ASSET_ROOT_ENV: &str = "POPPYTALK_ASSET_ROOT";

/// Accepted values of `audio_backend`
pub const AUDIO_BACKENDS: [&str; 2] = ["wav", "dry_run"];
/// Accepted values of `trigger`
pub const TRIGGERS: [&str; 2] = ["button", "enter"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Weather
    pub openweather_api_key: String,
    pub weather_endpoint: String,
    pub weather_timeout_secs: u64,
    pub country_code: String,
    pub locations: [String; 2],

    // Voices
    pub asset_root: String,
    pub actors: [String; 2],
    pub audio_backend: String,
    pub volume: u8,

    // Trigger
    pub trigger: String,
    pub button_device: String,
    pub button_key: String,

    // Meta
    pub rng_seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweather_api_key: "".to_string(),
            weather_endpoint: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            weather_timeout_secs: 10,
            country_code: "US".to_string(),
            locations: ["waynesboro".to_string(), "ocean_city".to_string()],
            asset_root: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .to_string_lossy()
                .to_string(),
            actors: ["child1".to_string(), "child2".to_string()],
            audio_backend: "wav".to_string(),
            volume: 100,
            trigger: "button".to_string(),
            button_device: "/dev/input/event0".to_string(),
            button_key: "ENTER".to_string(),
            rng_seed: None,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; a corrupt file is moved aside and defaults are used
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                    let backup_path = path.with_extension("json.corrupt");
                    let _ = std::fs::rename(path, &backup_path);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.openweather_api_key = key;
            }
        }
        if let Ok(root) = std::env::var(ASSET_ROOT_ENV) {
            if !root.trim().is_empty() {
                self.asset_root = root;
            }
        }
    }

    /// Check the values the engine relies on
    pub fn validate(&self) -> PoppyResult<()> {
        self.parsed_locations()?;

        for actor in &self.actors {
            if actor.is_empty()
                || actor.contains(|c: char| c == '/' || c == '\\')
                || actor == "."
                || actor == ".."
            {
                return Err(PoppyError::Config(format!(
                    "actor name {:?} cannot be used as a directory name",
                    actor
                )));
            }
        }
        if self.actors[0] == self.actors[1] {
            return Err(PoppyError::Config(format!(
                "the two actors must differ, both are {:?}",
                self.actors[0]
            )));
        }
        if !AUDIO_BACKENDS.contains(&self.audio_backend.as_str()) {
            return Err(PoppyError::Config(format!(
                "unknown audio_backend {:?} (expected one of {:?})",
                self.audio_backend, AUDIO_BACKENDS
            )));
        }
        if !TRIGGERS.contains(&self.trigger.as_str()) {
            return Err(PoppyError::Config(format!(
                "unknown trigger {:?} (expected one of {:?})",
                self.trigger, TRIGGERS
            )));
        }
        if self.volume > 100 {
            return Err(PoppyError::Config(format!(
                "volume must be in [0...100], got {}",
                self.volume
            )));
        }
        if self.weather_timeout_secs == 0 {
            return Err(PoppyError::Config(
                "weather_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn parsed_locations(&self) -> PoppyResult<[Location; 2]> {
        Ok([
            Location::parse(&self.locations[0])?,
            Location::parse(&self.locations[1])?,
        ])
    }

    pub fn asset_root(&self) -> PathBuf {
        PathBuf::from(&self.asset_root)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("poppytalk")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.locations, ["waynesboro", "ocean_city"]);
        assert_eq!(config.actors, ["child1", "child2"]);
        assert_eq!(config.country_code, "US");
        assert_eq!(config.weather_timeout_secs, 10);
        assert_eq!(config.volume, 100);
        assert!(config.rng_seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("Failed to serialize");
        let restored: Config = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(config.locations, restored.locations);
        assert_eq!(config.actors, restored.actors);
        assert_eq!(config.audio_backend, restored.audio_backend);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "locations": ["harrisburg", "cape_may"], "volume": 40 }"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locations, ["harrisburg", "cape_may"]);
        assert_eq!(config.volume, 40);
        assert_eq!(config.actors, ["child1", "child2"]);
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.locations, ["waynesboro", "ocean_city"]);
        assert!(!path.exists());
        assert!(dir.path().join("config.json.corrupt").exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.rng_seed = Some(7);
        config.save_to(&path).unwrap();

        let restored = Config::load_from(&path).unwrap();
        assert_eq!(restored.rng_seed, Some(7));
    }

    #[test]
    fn test_validate_accepts_known_backends_and_triggers() {
        for backend in AUDIO_BACKENDS {
            for trigger in TRIGGERS {
                let config = Config {
                    audio_backend: backend.to_string(),
                    trigger: trigger.to_string(),
                    ..Config::default()
                };
                assert!(config.validate().is_ok(), "{} / {}", backend, trigger);
            }
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.locations[1] = "Ocean City".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.actors[1] = "child1".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.actors[0] = "../child1".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.volume = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.weather_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.audio_backend = "wave".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.trigger = "doorbell".to_string();
        assert!(config.validate().is_err());
    }
}
