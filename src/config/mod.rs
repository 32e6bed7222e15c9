//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `CHECKMATE_*` environment variables
//! (and `ALLOWED_ORIGINS` for CORS, which keeps its deployment-facing name).

pub mod error;


pub use error::{Artifact, ConfigError};

use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_ALLOWED_ORIGINS, DEFAULT_CLASSIFIER_PATH, DEFAULT_EMBEDDER_DIR};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Sentence-transformers model directory.
    pub embedder_dir: PathBuf,

    /// Trained classifier weights (safetensors).
    pub classifier_path: PathBuf,

    /// Origins allowed by CORS in addition to the deployment platform pattern.
    pub allowed_origins: Vec<String>,

    /// Run the embedder in deterministic stub mode (no model directory needed).
    pub stub_embedder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            embedder_dir: PathBuf::from(DEFAULT_EMBEDDER_DIR),
            classifier_path: PathBuf::from(DEFAULT_CLASSIFIER_PATH),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            stub_embedder: false,
        }
    }
}

impl Config {
    /// Env var holding the HTTP port.
    pub const ENV_PORT: &'static str = "CHECKMATE_PORT";
    const ENV_BIND_ADDR: &'static str = "CHECKMATE_BIND_ADDR";
    const ENV_EMBEDDER_DIR: &'static str = "CHECKMATE_EMBEDDER_DIR";
    const ENV_CLASSIFIER_PATH: &'static str = "CHECKMATE_CLASSIFIER_PATH";
    const ENV_ALLOWED_ORIGINS: &'static str = "ALLOWED_ORIGINS";
    const ENV_STUB_EMBEDDER: &'static str = "CHECKMATE_STUB_EMBEDDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let embedder_dir = Self::parse_path_from_env(Self::ENV_EMBEDDER_DIR, defaults.embedder_dir);
        let classifier_path =
            Self::parse_path_from_env(Self::ENV_CLASSIFIER_PATH, defaults.classifier_path);
        let allowed_origins = env::var(Self::ENV_ALLOWED_ORIGINS)
            .map(|v| parse_origins(&v))
            .unwrap_or(defaults.allowed_origins);
        let stub_embedder = Self::parse_flag_from_env(Self::ENV_STUB_EMBEDDER, defaults.stub_embedder)?;

        Ok(Self {
            port,
            bind_addr,
            embedder_dir,
            classifier_path,
            allowed_origins,
            stub_embedder,
        })
    }

    /// Checks that the artifacts exist with the right kind (read-only; nothing is created).
    ///
    /// The embedder directory is not required in stub mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.stub_embedder {
            check_artifact(Artifact::Embedder, &self.embedder_dir, true)?;
        }
        check_artifact(Artifact::Classifier, &self.classifier_path, false)
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Address a local client should connect to for this server.
    ///
    /// A wildcard bind address is reached through the loopback interface of the same family.
    pub fn local_connect_addr(&self) -> SocketAddr {
        let ip = match self.bind_addr {
            IpAddr::V4(v4) if v4.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(v6) if v6.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        SocketAddr::new(ip, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        let Ok(value) = env::var(Self::ENV_PORT) else {
            return Ok(default);
        };

        match value.trim().parse::<u16>() {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(ConfigError::InvalidPort {
                var: Self::ENV_PORT,
                value,
            }),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr {
                    var: Self::ENV_BIND_ADDR,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_flag_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        let Ok(value) = env::var(var_name) else {
            return Ok(default);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidFlag {
                var: var_name,
                value,
            }),
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn check_artifact(artifact: Artifact, path: &Path, is_dir: bool) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ArtifactMissing {
            artifact,
            path: path.to_path_buf(),
        });
    }

    let (ok, expected) = if is_dir {
        (path.is_dir(), "directory")
    } else {
        (path.is_file(), "file")
    };
    if !ok {
        return Err(ConfigError::ArtifactWrongKind {
            artifact,
            path: path.to_path_buf(),
            expected,
        });
    }

    Ok(())
}
