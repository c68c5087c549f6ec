use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Variables that must be present (and non-empty) for the gateway to start.
pub const REQUIRED_VARS: [&str; 6] = [
    "R2_BUCKET_NAME",
    "R2_PUBLIC_URL",
    "R2_ACCESS_KEY",
    "R2_SECRET_KEY",
    "R2_ACCOUNT_ID",
    "API_KEY",
];

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

#[derive(Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub public_url: String,
    pub access_key: String,
    pub secret_key: String,
    pub account_id: String,
}

impl StorageConfig {
    /// R2 S3-compatible endpoint for the configured account.
    pub fn endpoint(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("public_url", &self.public_url)
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    pub api_key: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig").finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones. Every missing
    /// required variable is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let required = |name: &str| get(name).unwrap_or_default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let tls = match (get("TLS_CERT_FILE"), get("TLS_KEY_FILE")) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_file: cert.into(),
                key_file: key.into(),
            }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of TLS_CERT_FILE and TLS_KEY_FILE is set, serving plain HTTP"
                );
                None
            }
        };

        Ok(Self {
            server: ServerConfig {
                port,
                host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                tls,
            },
            storage: StorageConfig {
                bucket: required("R2_BUCKET_NAME"),
                public_url: required("R2_PUBLIC_URL"),
                access_key: required("R2_ACCESS_KEY"),
                secret_key: required("R2_SECRET_KEY"),
                account_id: required("R2_ACCOUNT_ID"),
            },
            auth: AuthConfig {
                api_key: required("API_KEY"),
            },
        })
    }
}
