//! Spotify accounts service
//!
//! Covers the one-time authorization-code flow used to obtain a long-lived
//! refresh token, and the refresh-token grant used at runtime to mint access
//! tokens. Token requests are form-encoded with HTTP Basic client credentials.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::catalog::CatalogError;
use crate::config::SpotifyConfig;

/// Scopes needed to rewrite the round playlists
const SCOPES: &str = "playlist-modify-public playlist-modify-private";
pub(crate) const USER_AGENT: &str = concat!("MusicMead/", env!("CARGO_PKG_VERSION"));
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Only present on the authorization-code exchange (and occasionally on refresh)
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Spotify accounts API client
pub struct SpotifyAuth {
    http_client: reqwest::Client,
    config: SpotifyConfig,
}

impl SpotifyAuth {
    pub fn new(config: SpotifyConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn has_refresh_token(&self) -> bool {
        self.config.refresh_token.is_some()
    }

    fn client_id(&self) -> Result<&str, CatalogError> {
        self.config
            .client_id
            .as_deref()
            .ok_or_else(|| CatalogError::NotConfigured("SPOTIFY_CLIENT_ID is not set".to_string()))
    }

    fn client_secret(&self) -> Result<&str, CatalogError> {
        self.config.client_secret.as_deref().ok_or_else(|| {
            CatalogError::NotConfigured("SPOTIFY_CLIENT_SECRET is not set".to_string())
        })
    }

    fn redirect_uri(&self) -> Result<&str, CatalogError> {
        self.config.redirect_uri.as_deref().ok_or_else(|| {
            CatalogError::NotConfigured("SPOTIFY_REDIRECT_URI is not set".to_string())
        })
    }

    /// URL the operator's browser is sent to for the one-time consent
    pub fn authorize_url(&self) -> Result<String, CatalogError> {
        let base = format!("{}/authorize", self.config.accounts_base);
        let url = Url::parse_with_params(
            &base,
            &[
                ("client_id", self.client_id()?),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri()?),
                ("scope", SCOPES),
            ],
        )
        .map_err(|e| CatalogError::NotConfigured(format!("Invalid accounts URL: {}", e)))?;

        Ok(url.into())
    }

    /// Exchange an authorization code for access and refresh tokens
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, CatalogError> {
        let redirect_uri = self.redirect_uri()?;
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    /// Mint a fresh access token from the stored refresh token
    pub async fn refresh(&self) -> Result<TokenResponse, CatalogError> {
        let refresh_token = self.config.refresh_token.as_deref().ok_or_else(|| {
            CatalogError::NotConfigured(
                "SPOTIFY_REFRESH_TOKEN is not set. Run the auth flow first.".to_string(),
            )
        })?;

        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, CatalogError> {
        let url = format!("{}/api/token", self.config.accounts_base);
        debug!(grant_type = form[0].1, "Requesting Spotify token");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.client_id()?, Some(self.client_secret()?))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
