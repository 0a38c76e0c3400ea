// src/config.rs
use std::{env, path::PathBuf, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    listen_addr: String,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
    media: MediaConfig,
}

/// Media handling knobs shared by the upload command and the image normaliser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaConfig {
    pub root: PathBuf,
    pub post_cover_width: u32,
    pub favicon_width: u32,
    pub jpeg_quality: u8,
    pub max_upload_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
            post_cover_width: 800,
            favicon_width: 32,
            jpeg_quality: 60,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://blog.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key} has an invalid value: {raw}"))),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates required keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url());
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        let biscuit_private_key = env::var("BISCUIT_ROOT_PRIVATE_KEY")
            .map_err(|_| ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;

        if biscuit_private_key.len() != 64 {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let token_ttl_secs = parse_var::<u64>("TOKEN_TTL_SECONDS")?.unwrap_or_else(default_token_ttl);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_else(default_allowed_origins);

        let media = MediaConfig::from_env()?;

        Ok(Self {
            database_url,
            listen_addr,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
            media,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Return the allowed CORS origins as configured.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn media(&self) -> &MediaConfig {
        &self.media
    }
}

impl MediaConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let root = env::var("MEDIA_ROOT").map_or(defaults.root, PathBuf::from);
        let post_cover_width =
            parse_var::<u32>("POST_COVER_WIDTH")?.unwrap_or(defaults.post_cover_width);
        let favicon_width = parse_var::<u32>("FAVICON_WIDTH")?.unwrap_or(defaults.favicon_width);
        let jpeg_quality = parse_var::<u8>("JPEG_QUALITY")?.unwrap_or(defaults.jpeg_quality);
        let max_upload_bytes =
            parse_var::<usize>("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes);

        let config = Self {
            root,
            post_cover_width,
            favicon_width,
            jpeg_quality,
            max_upload_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.post_cover_width == 0 || self.favicon_width == 0 {
            return Err(ConfigError::Invalid(
                "image target widths must be positive".into(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(
                "JPEG_QUALITY must be between 1 and 100".into(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "MAX_UPLOAD_BYTES must be positive".into(),
            ));
        }
        Ok(())
    }
}
