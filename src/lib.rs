pub mod cli;
pub mod core;
pub mod download;
pub mod tools;

pub use crate::core::accession::{AccessionMap, AccessionRecord, ReplicateRange};
pub use crate::core::config::{load_settings, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SradlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("External tool failed: {0}")]
    Tool(String),

    #[error("{0}")]
    Other(String),
}

impl SradlError {
    /// Process exit code for this kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            SradlError::Config(_) => 2,
            SradlError::Io(_) => 3,
            SradlError::Parse(_) => 4,
            SradlError::Tool(_) => 5,
            SradlError::Other(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SradlError>;
