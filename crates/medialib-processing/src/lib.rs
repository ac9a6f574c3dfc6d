//! Medialib Processing Library
//!
//! Turns a file on disk into a [`MediaItem`](medialib_core::MediaItem):
//!
//! - [`classifier`] derives the media type from the extension and MIME type
//! - [`resolution`] reads pixel dimensions from raster headers or SVG markup
//! - [`source`] is the file-access layer (metadata, MIME sniffing)
//! - [`factory`] runs the three in order and builds the item

pub mod classifier;
pub mod factory;
pub mod resolution;
pub mod source;

pub use classifier::{ClassificationTables, MediaClassifier};
pub use factory::MediaItemFactory;
pub use resolution::{ResolutionResolver, ResolverConfig};
pub use source::{LocalSourceFile, SourceFile};
