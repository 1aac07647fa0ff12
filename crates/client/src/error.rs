//! Error type shared by every client operation.

use thiserror::Error;

/// Everything a request against the world-editing server can fail with.
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a status other than 200 that has no
    /// dedicated meaning for the endpoint.
    #[error("request to /{path} failed with status {status}")]
    Transport { status: u16, path: String },

    /// The endpoint answered 404: the resource has not been set up on the
    /// server yet. For `/buildarea` this means no build area is configured.
    #[error("/{path} is not configured on the server")]
    NotConfigured { path: String },

    /// The response body did not have the expected structure.
    #[error("malformed response: {0}")]
    Format(String),

    /// Block-state text or a structured edit did not fit the grammar.
    #[error("invalid block state: {0}")]
    Parse(#[from] gdmc_world::ParseError),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by the error, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            Error::NotConfigured { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
