//! Storage provider abstraction
//!
//! This module defines the StorageProvider trait that every storage type must implement.

use crate::StorageType;
use medialib_core::error::{ErrorMetadata, LogLevel};
use medialib_core::MediaItem;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No storage provider registered for storage type: {0}")]
    ProviderNotRegistered(StorageType),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl ErrorMetadata for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            StorageError::ProviderNotRegistered(_) => "STORAGE_PROVIDER_NOT_REGISTERED",
            StorageError::ConfigError(_) => "STORAGE_CONFIGURATION_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn suggested_action(&self) -> Option<&'static str> {
        Some("Check the storage provider configuration")
    }

    fn client_message(&self) -> String {
        "The media item could not be located".to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Storage provider trait
///
/// Every storage type (local files, external URLs, movie hosts) is served by a
/// provider implementing this trait, so code rendering media items never needs
/// to know where the bytes actually live.
pub trait StorageProvider: Send + Sync {
    /// The storage type this provider serves
    fn storage_type(&self) -> StorageType;

    /// Filesystem path for local files, canonical remote URL otherwise
    fn absolute_path(&self, item: &MediaItem) -> String;

    /// Web path including scheme and host
    fn absolute_web_path(&self, item: &MediaItem) -> String;

    /// Web path as used in rendered pages
    fn web_path(&self, item: &MediaItem) -> String;

    /// Web path of a filtered (e.g. resized) variant.
    ///
    /// Providers without an image-filter cache return `None` and callers fall
    /// back to [`StorageProvider::web_path`].
    fn web_path_with_filter(&self, _item: &MediaItem, _filter: &str) -> Option<String> {
        None
    }

    /// Thumbnail URL, if the provider can offer one
    fn thumbnail(&self, item: &MediaItem) -> Option<String>;

    /// Anchor element linking to the item
    fn link_html(&self, item: &MediaItem) -> String;

    /// Markup embedding the item in a page
    fn include_html(&self, item: &MediaItem) -> String;
}
