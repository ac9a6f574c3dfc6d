//! Medialib Storage Library
//!
//! This crate turns media items into web-accessible paths and HTML snippets. Each
//! [`StorageType`] is served by one [`StorageProvider`]; the [`StorageManager`]
//! dispatches an item to the provider matching its storage type.
//!
//! # Path layout
//!
//! Locally stored files live at `{base_path}/{sharding_folder}/{filename}` and
//! are served from `{base_url}/{sharding_folder}/{filename}`. Filtered (resized)
//! variants are served from `{filter_cache_base_url}/{filter}/{sharding_folder}/{filename}`.
//! Remote providers never touch the filesystem; they only format URLs from the
//! item's url field.

pub mod factory;
pub(crate) mod html;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-remote")]
pub mod remote;
pub mod traits;
pub mod view;

// Re-export commonly used types
pub use factory::{create_storage_manager, StorageManager};
#[cfg(feature = "storage-local")]
pub use local::LocalStorageProvider;
pub use medialib_core::StorageType;
#[cfg(feature = "storage-remote")]
pub use remote::{ExternalStorageProvider, VimeoStorageProvider, YoutubeStorageProvider};
pub use traits::{StorageError, StorageProvider, StorageResult};
pub use view::media_item_json;
