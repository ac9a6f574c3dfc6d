//! Data models for the media library
//!
//! Value objects (media type, resolution, aspect ratio) and the `MediaItem`
//! aggregate that ties them together.

mod aspect_ratio;
mod media;
mod media_item;
mod resolution;

// Re-export all models for convenient imports
pub use aspect_ratio::*;
pub use media::*;
pub use media_item::*;
pub use resolution::*;
