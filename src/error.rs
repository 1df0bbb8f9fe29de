use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a catalog or talking to the CLI caller.
///
/// Matching itself never fails; these only surface at the edges.
#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Failed to read stdin: {0}")]
    StdinRead(#[from] io::Error),

    #[error("Failed to parse input JSON: {0}")]
    InputParse(#[from] serde_json::Error),

    #[error("Failed to serialize output: {0}")]
    OutputSerialize(serde_json::Error),

    #[error("Failed to read tool catalog from {path}: {source}")]
    CatalogRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse tool catalog: {0}")]
    CatalogParse(String),

    #[error("Invalid tool catalog: {0}")]
    CatalogValidation(String),

    #[error("Tool catalog not found at {0}")]
    CatalogNotFound(PathBuf),

    #[error("Config directory not found")]
    NoConfigDir,
}
