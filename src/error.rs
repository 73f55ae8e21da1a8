//! Crate error type
//!
//! Gameplay never fails: damage, timeouts and wins are phase transitions.
//! Errors only surface at the edges (config parsing, explicit level loads).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no level defined for index {0}")]
    UnknownLevel(usize),

    #[error("a level set needs at least one level")]
    NoLevels,

    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
