//! Configuration file loading and data folder resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument / environment variable (handled by the binary)
//! 2. TOML config file
//! 3. OS-dependent compiled default (fallback)
//!
//! A missing config file is not an error; the service starts on defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the persisted submission list inside the data folder
pub const SUBMISSIONS_FILE: &str = "submissions.json";

/// Application folder name used under the platform config/data dirs
const APP_DIR: &str = "musicmead";

/// Spotify credentials section of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyToml {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub refresh_token: Option<String>,
}

/// Playlist identifiers section of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistsToml {
    pub wrapped: Option<String>,
    pub peace: Option<String>,
    pub worship: Option<String>,
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub public_dir: Option<PathBuf>,
    pub keepalive_url: Option<String>,
    pub production: Option<bool>,
    #[serde(default)]
    pub spotify: SpotifyToml,
    #[serde(default)]
    pub playlists: PlaylistsToml,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Load the config file at `path`, or at the platform default location
    ///
    /// A file that does not exist yields the default config. A file that exists
    /// but cannot be read or parsed is an error when its path was given
    /// explicitly, and a warning otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            if explicit {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    config_path.display()
                )));
            }
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let loaded = std::fs::read_to_string(&config_path)
            .map_err(Error::from)
            .and_then(|content| Self::parse(&content));

        match loaded {
            Ok(config) => {
                debug!("Loaded config file {}", config_path.display());
                Ok(config)
            }
            Err(e) if !explicit => {
                warn!("Ignoring config file {}: {}", config_path.display(), e);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

/// Platform config file location, e.g. `~/.config/musicmead/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// OS-dependent default data folder
pub fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/musicmead (or /var/lib/musicmead without a home)
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("/var/lib/musicmead"))
    } else if cfg!(any(target_os = "macos", target_os = "windows")) {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("./data"))
    } else {
        PathBuf::from("./data")
    }
}

/// Resolve the data folder: explicit value, then config file, then default
pub fn resolve_data_dir(explicit: Option<&Path>, file: &TomlConfig) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = &file.data_dir {
        return path.clone();
    }
    default_data_dir()
}
