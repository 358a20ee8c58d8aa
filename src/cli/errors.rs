use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Directory not found: {path:?}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Config file not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    #[error("Generator error: {0}")]
    Generator(#[from] geocroissant::Error),
}
