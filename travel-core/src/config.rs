use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ServiceId;

/// Credentials for a single external service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,
}

/// Base URLs of the external services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub unsplash: String,
    pub openweather: String,
    pub wikipedia: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            unsplash: "https://api.unsplash.com".to_string(),
            openweather: "https://api.openweathermap.org".to_string(),
            wikipedia: "https://en.wikipedia.org".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every service at the same host. Handy for mock servers.
    pub fn all_at(base: &str) -> Self {
        Self {
            unsplash: base.to_string(),
            openweather: base.to_string(),
            wikipedia: base.to_string(),
        }
    }
}

/// Custom text shown for a destination on the home grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationInfo {
    pub description: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Example TOML:
    /// [services.unsplash]
    /// api_key = "..."
    pub services: HashMap<String, ServiceConfig>,

    pub endpoints: Endpoints,

    /// Destinations shown on the home grid, in display order.
    pub popular: Vec<String>,

    /// Keyed by destination name as it appears in `popular`.
    pub destinations: BTreeMap<String, DestinationInfo>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services: HashMap::new(),
            endpoints: Endpoints::default(),
            popular: DEFAULT_DESTINATIONS
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            destinations: default_destinations(),
        }
    }
}

const DEFAULT_DESTINATIONS: &[(&str, &str)] = &[
    (
        "Paris",
        "The capital of France, known for its art, fashion, gastronomy, and culture.",
    ),
    (
        "Kyoto",
        "Once the imperial capital of Japan, famous for its classical Buddhist temples and gardens.",
    ),
    (
        "Rome",
        "The eternal city, showcasing millennia of art, architecture, and history.",
    ),
    (
        "Bora Bora",
        "A stunning South Pacific island known for its scuba diving and luxury overwater bungalows.",
    ),
    (
        "New York",
        "The city that never sleeps, home to iconic landmarks, Broadway shows, and endless energy.",
    ),
    (
        "Cairo",
        "Egypt’s sprawling capital, set on the Nile River, with nearby Giza pyramid complex.",
    ),
];

fn default_destinations() -> BTreeMap<String, DestinationInfo> {
    DEFAULT_DESTINATIONS
        .iter()
        .map(|(name, description)| {
            (
                name.to_string(),
                DestinationInfo {
                    description: description.to_string(),
                },
            )
        })
        .collect()
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "travel-explorer", "travel-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace the API key for a service.
    pub fn upsert_api_key(&mut self, service: ServiceId, api_key: String) {
        self.services
            .insert(service.as_str().to_string(), ServiceConfig { api_key });
    }

    /// Returns API key for a service, if present.
    pub fn api_key(&self, service: ServiceId) -> Option<&str> {
        self.services
            .get(service.as_str())
            .map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_configured(&self, service: ServiceId) -> bool {
        !service.requires_api_key() || self.api_key(service).is_some()
    }

    pub fn description_for(&self, destination: &str) -> Option<&str> {
        self.destinations
            .get(destination)
            .map(|info| info.description.as_str())
    }
}
