//! Crate error type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The current snapshot is shorter than the previous one, so the
    /// equal-length comparison would read past its end at `index`.
    #[error(
        "padwatch: channel {} is out of range (previous = {} channels, current = {} channels)",
        index,
        previous,
        current
    )]
    OutOfRange {
        index: usize,
        previous: usize,
        current: usize,
    },
    #[error("padwatch: invalid input: {}", .0)]
    InvalidInput(String),
    #[error("padwatch: input backend unavailable: {}", .0)]
    Backend(String),
    #[error("padwatch: the native input context is already initialized")]
    AlreadyInitialized,
    #[error("padwatch: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("padwatch: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("padwatch: invalid config: {}", .0)]
    InvalidConfig(String),
    #[error("padwatch: hidapi: {}", .0)]
    Hid(String),
    #[error("padwatch: {}", .0)]
    Io(#[from] std::io::Error),
    #[error("padwatch: {}", .0)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
