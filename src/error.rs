use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DirdocError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Path '{path}' {reason}")]
    InvalidRoot { path: PathBuf, reason: &'static str },
    #[error("Invalid configuration: {0}")]
    Config(String),
}
impl DirdocError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DirdocError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn invalid_root(path: impl Into<PathBuf>, reason: &'static str) -> Self {
        DirdocError::InvalidRoot {
            path: path.into(),
            reason,
        }
    }
}
