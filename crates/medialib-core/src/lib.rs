//! Medialib Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! all medialib components: media and storage types, resolutions, aspect-ratio
//! buckets and the `MediaItem` aggregate.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::MediaLibraryConfig;
pub use error::{ErrorMetadata, LogLevel, MediaError, MediaResult};
pub use models::{
    AspectRatio, MediaItem, MediaItemRecord, MediaItemUpdate, MediaType, Resolution,
};
pub use storage_types::StorageType;
