//! mead-web runtime settings
//!
//! Command-line flags double as environment variables (`clap` `env`), and any
//! value left unset falls back to the TOML config file and then to compiled
//! defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mead_common::config::{resolve_data_dir, TomlConfig};
use mead_common::Round;

pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";

/// Deployment mode; production hides the admin UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Development,
    Production,
}

/// Command-line arguments for mead-web
#[derive(Parser, Debug, Clone)]
#[command(name = "mead-web")]
#[command(about = "Song submission and playlist sync service")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "BIND_ADDR")]
    pub bind: IpAddr,

    /// TOML config file (defaults to the platform config dir)
    #[arg(short, long, env = "MEAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Folder holding submissions.json
    #[arg(short, long, env = "MEAD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Folder of static browser assets served at /
    #[arg(long, env = "MEAD_PUBLIC_DIR")]
    pub public_dir: Option<PathBuf>,

    /// Deployment mode
    #[arg(long = "mode", value_enum, env = "APP_ENV")]
    pub mode: Option<RunMode>,

    /// Password required by admin endpoints
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub spotify_client_id: Option<String>,

    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    #[arg(long, env = "SPOTIFY_REDIRECT_URI")]
    pub spotify_redirect_uri: Option<String>,

    /// Long-lived refresh token obtained through /auth/login
    #[arg(long, env = "SPOTIFY_REFRESH_TOKEN", hide_env_values = true)]
    pub spotify_refresh_token: Option<String>,

    #[arg(long, default_value = DEFAULT_SPOTIFY_API_BASE, env = "SPOTIFY_API_BASE")]
    pub spotify_api_base: String,

    #[arg(long, default_value = DEFAULT_SPOTIFY_ACCOUNTS_BASE, env = "SPOTIFY_ACCOUNTS_BASE")]
    pub spotify_accounts_base: String,

    #[arg(long, env = "PLAYLIST_WRAPPED_ID")]
    pub playlist_wrapped_id: Option<String>,

    #[arg(long, env = "PLAYLIST_PEACE_ID")]
    pub playlist_peace_id: Option<String>,

    #[arg(long, env = "PLAYLIST_WORSHIP_ID")]
    pub playlist_worship_id: Option<String>,

    /// Public health URL pinged periodically to keep the host awake
    #[arg(long, env = "KEEPALIVE_URL")]
    pub keepalive_url: Option<String>,
}

/// Spotify application credentials and endpoints
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub refresh_token: Option<String>,
    pub api_base: String,
    pub accounts_base: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            refresh_token: None,
            api_base: DEFAULT_SPOTIFY_API_BASE.to_string(),
            accounts_base: DEFAULT_SPOTIFY_ACCOUNTS_BASE.to_string(),
        }
    }
}

/// Target playlist per round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistIds {
    pub wrapped: Option<String>,
    pub peace: Option<String>,
    pub worship: Option<String>,
}

impl PlaylistIds {
    pub fn get(&self, round: Round) -> Option<&str> {
        match round {
            Round::Wrapped => self.wrapped.as_deref(),
            Round::Peace => self.peace.as_deref(),
            Round::Worship => self.worship.as_deref(),
        }
    }

    /// Playlist id for every round, or `None` if any is unset
    pub fn all(&self) -> Option<[(Round, &str); 3]> {
        Some([
            (Round::Wrapped, self.get(Round::Wrapped)?),
            (Round::Peace, self.get(Round::Peace)?),
            (Round::Worship, self.get(Round::Worship)?),
        ])
    }
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub public_dir: Option<PathBuf>,
    pub production: bool,
    pub admin_password: Option<String>,
    pub spotify: SpotifyConfig,
    pub playlists: PlaylistIds,
    pub keepalive_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000),
            data_dir: PathBuf::from("./data"),
            public_dir: None,
            production: false,
            admin_password: None,
            spotify: SpotifyConfig::default(),
            playlists: PlaylistIds::default(),
            keepalive_url: None,
        }
    }
}

/// Treat blank strings as unset
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// Merge parsed arguments over the config file
    pub fn resolve(args: Args, file: TomlConfig) -> Self {
        let data_dir = resolve_data_dir(args.data_dir.as_deref(), &file);
        let production = match args.mode {
            Some(mode) => mode == RunMode::Production,
            None => file.production.unwrap_or(false),
        };

        let spotify = SpotifyConfig {
            client_id: non_blank(args.spotify_client_id.or(file.spotify.client_id)),
            client_secret: non_blank(args.spotify_client_secret.or(file.spotify.client_secret)),
            redirect_uri: non_blank(args.spotify_redirect_uri.or(file.spotify.redirect_uri)),
            refresh_token: non_blank(args.spotify_refresh_token.or(file.spotify.refresh_token)),
            api_base: args.spotify_api_base.trim_end_matches('/').to_string(),
            accounts_base: args.spotify_accounts_base.trim_end_matches('/').to_string(),
        };

        let playlists = PlaylistIds {
            wrapped: non_blank(args.playlist_wrapped_id.or(file.playlists.wrapped)),
            peace: non_blank(args.playlist_peace_id.or(file.playlists.peace)),
            worship: non_blank(args.playlist_worship_id.or(file.playlists.worship)),
        };

        Self {
            bind_addr: SocketAddr::new(args.bind, args.port),
            data_dir,
            public_dir: args.public_dir.or(file.public_dir),
            production,
            admin_password: non_blank(args.admin_password),
            spotify,
            playlists,
            keepalive_url: non_blank(args.keepalive_url.or(file.keepalive_url)),
        }
    }

    /// Whether the browser should render admin controls
    pub fn admin_ui_enabled(&self) -> bool {
        !self.production && self.admin_password.is_some()
    }
}
