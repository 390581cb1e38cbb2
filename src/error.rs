//! Error types for operations around the parser
//!
//! Payload problems are never errors here: they are collected as
//! [`ParseIssue`](crate::diagnostics::ParseIssue)s inside a
//! [`ParseResult`](crate::diagnostics::ParseResult). `TileError` covers the
//! surrounding plumbing: files, configuration, encodings and the CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Configuration error in {file}: {message}")]
    Config { file: String, message: String },

    #[error("Encoding error in {file}: {message}")]
    Encoding { file: String, message: String },

    #[error("Watch error: {message}")]
    Watch { message: String },

    #[error("{file} is not renderable ({errors} error(s), {warnings} warning(s))")]
    Unrenderable { file: String, errors: usize, warnings: usize },
}

pub type Result<T> = std::result::Result<T, TileError>;

impl TileError {
    pub fn config(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn encoding(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoding {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn watch(message: impl Into<String>) -> Self {
        Self::Watch {
            message: message.into(),
        }
    }
}
