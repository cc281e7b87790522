use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Read,
    Write,
}

/// Failure of a File Store operation. Cancelled prompts are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("failed to read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("failed to write '{}': {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl DocumentError {
    pub fn read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::Read,
            Self::Write { .. } => ErrorCode::Write,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{channel} listener is no longer registered")]
    StaleListener { channel: &'static str },
}
