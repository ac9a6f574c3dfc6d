//! Error types module
//!
//! All failures raised while turning a source file into a media item are unified
//! under [`MediaError`]. The three source errors (`UnreadableImage`,
//! `MalformedMarkup`, `UnsupportedSource`) abort creation of the item they
//! concern; nothing partial is handed back to the caller.

use std::io;
use std::path::{Path, PathBuf};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for bad input files
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error reporting - lets errors describe how they should be surfaced
/// to the user or operator by whatever layer catches them.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UNREADABLE_IMAGE")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same operation could succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Unreadable image {}: {reason}", .path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("Malformed markup in {}: {reason}", .path.display())]
    MalformedMarkup { path: PathBuf, reason: String },

    #[error("Unsupported source {}: {reason}", .path.display())]
    UnsupportedSource { path: PathBuf, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type MediaResult<T> = Result<T, MediaError>;

impl MediaError {
    pub fn unreadable_image(path: &Path, reason: impl ToString) -> Self {
        MediaError::UnreadableImage {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_markup(path: &Path, reason: impl ToString) -> Self {
        MediaError::MalformedMarkup {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn unsupported_source(path: &Path, reason: impl ToString) -> Self {
        MediaError::UnsupportedSource {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// True for the errors caused by a corrupt or missing source file.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            MediaError::UnreadableImage { .. }
                | MediaError::MalformedMarkup { .. }
                | MediaError::UnsupportedSource { .. }
        )
    }
}

impl From<validator::ValidationErrors> for MediaError {
    fn from(err: validator::ValidationErrors) -> Self {
        MediaError::InvalidInput(format!("Validation error: {}", err))
    }
}

impl From<envy::Error> for MediaError {
    fn from(err: envy::Error) -> Self {
        MediaError::Config(err.to_string())
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn media_error_static_metadata(
    err: &MediaError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        MediaError::UnreadableImage { .. } => (
            "UNREADABLE_IMAGE",
            false,
            Some("Check image format and try a different file"),
            LogLevel::Warn,
        ),
        MediaError::MalformedMarkup { .. } => (
            "MALFORMED_MARKUP",
            false,
            Some("Check that the SVG file is well-formed XML"),
            LogLevel::Warn,
        ),
        MediaError::UnsupportedSource { .. } => (
            "UNSUPPORTED_SOURCE",
            false,
            Some("Verify the path points to an existing regular file"),
            LogLevel::Warn,
        ),
        MediaError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check the submitted values and try again"),
            LogLevel::Debug,
        ),
        MediaError::Config(_) => (
            "CONFIGURATION_ERROR",
            false,
            Some("Check the MEDIALIB_* environment variables"),
            LogLevel::Error,
        ),
        MediaError::Io(_) => (
            "IO_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for MediaError {
    fn error_code(&self) -> &'static str {
        media_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        media_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        media_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            MediaError::UnreadableImage { path, .. } => format!(
                "The file \"{}\" could not be read as an image",
                file_name_of(path)
            ),
            MediaError::MalformedMarkup { path, .. } => format!(
                "The file \"{}\" is not a valid SVG document",
                file_name_of(path)
            ),
            MediaError::UnsupportedSource { path, .. } => {
                format!("This is not a valid file: \"{}\"", file_name_of(path))
            }
            MediaError::InvalidInput(msg) => msg.clone(),
            MediaError::Config(_) | MediaError::Io(_) => "An internal error occurred".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        media_error_static_metadata(self).3
    }
}

// Paths are not shown to clients, only the file name.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
