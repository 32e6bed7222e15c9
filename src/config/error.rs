use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Model artifact a path setting points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Embedder,
    Classifier,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Embedder => f.write_str("embedder model directory"),
            Artifact::Classifier => f.write_str("classifier weights file"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Not a number, or `0`.
    #[error("{var}='{value}' is not a usable port (1-65535)")]
    InvalidPort { var: &'static str, value: String },

    #[error("{var}='{value}' is not an IP address: {source}")]
    InvalidBindAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("{var}='{value}' is not a boolean (use 1/0, true/false, yes/no, on/off)")]
    InvalidFlag { var: &'static str, value: String },

    #[error("{artifact} not found at {path}")]
    ArtifactMissing { artifact: Artifact, path: PathBuf },

    #[error("{artifact} at {path} is not a {expected}")]
    ArtifactWrongKind {
        artifact: Artifact,
        path: PathBuf,
        expected: &'static str,
    },
}
