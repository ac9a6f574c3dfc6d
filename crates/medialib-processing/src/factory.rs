//! Media item creation.
//!
//! The factory is the single entry point turning a source into a
//! [`MediaItem`]: the file is inspected, classified and measured before the
//! item is built, so a failure at any step leaves nothing half-initialised.

use crate::classifier::MediaClassifier;
use crate::resolution::{ResolutionResolver, ResolverConfig};
use crate::source::{LocalSourceFile, SourceFile};
use medialib_core::models::LocalFileDetails;
use medialib_core::{MediaError, MediaItem, MediaLibraryConfig, MediaResult, StorageType};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MediaItemFactory {
    classifier: MediaClassifier,
    resolver: ResolutionResolver,
    mime_sniff_bytes: usize,
}

impl Default for MediaItemFactory {
    fn default() -> Self {
        Self::new(MediaClassifier::new(), ResolutionResolver::default())
    }
}

impl MediaItemFactory {
    pub fn new(classifier: MediaClassifier, resolver: ResolutionResolver) -> Self {
        let mime_sniff_bytes = resolver.config().mime_sniff_bytes;
        Self {
            classifier,
            resolver,
            mime_sniff_bytes,
        }
    }

    pub fn from_config(config: &MediaLibraryConfig) -> Self {
        Self::new(
            MediaClassifier::new(),
            ResolutionResolver::new(ResolverConfig::from(config)),
        )
    }

    pub fn classifier(&self) -> &MediaClassifier {
        &self.classifier
    }

    pub fn resolver(&self) -> &ResolutionResolver {
        &self.resolver
    }

    /// Create an item for the regular file at `path`.
    ///
    /// Fails with [`MediaError::UnsupportedSource`] before classification when
    /// the path is not an existing regular file.
    pub fn create_from_local_path(
        &self,
        path: impl AsRef<Path>,
        folder_id: Uuid,
        user_id: i32,
    ) -> MediaResult<MediaItem> {
        let source = LocalSourceFile::open(path.as_ref(), self.mime_sniff_bytes)?;
        self.create_from_source(&source, folder_id, user_id)
    }

    /// Create an item from an already inspected source file.
    pub fn create_from_source(
        &self,
        source: &dyn SourceFile,
        folder_id: Uuid,
        user_id: i32,
    ) -> MediaResult<MediaItem> {
        let media_type = self
            .classifier
            .classify(source.filename(), source.mime_type());

        let resolution = self
            .resolver
            .resolve_with_mime(source.path(), media_type, source.mime_type())
            .inspect_err(|e| {
                tracing::warn!(
                    path = %source.path().display(),
                    media_type = %media_type,
                    error = %e,
                    "Failed to resolve media dimensions"
                );
            })?;

        let mut item = MediaItem::from_local_file(
            LocalFileDetails {
                title: source.title(),
                filename: source.filename().to_string(),
                media_type,
                mime: source.mime_type().map(str::to_string),
                size: Some(source.size()),
                sharding_folder_name: source.parent_folder_name().map(str::to_string),
            },
            folder_id,
            user_id,
        );

        if let Some(resolution) = resolution {
            item.set_resolution(resolution.width, resolution.height);
        }

        tracing::info!(
            media_item_id = %item.id(),
            filename = %item.url(),
            media_type = %media_type,
            width = ?item.width(),
            height = ?item.height(),
            "Created media item from local file"
        );

        Ok(item)
    }

    /// Create an item referencing a movie on a video host. No file is read and
    /// no resolution is computed.
    pub fn create_from_movie(
        &self,
        storage_type: StorageType,
        movie_id: &str,
        title: &str,
        folder_id: Uuid,
        user_id: i32,
    ) -> MediaResult<MediaItem> {
        if !storage_type.is_movie_host() {
            return Err(MediaError::InvalidInput(format!(
                "Storage type {} does not host movies",
                storage_type
            )));
        }
        if movie_id.trim().is_empty() {
            return Err(MediaError::InvalidInput(
                "Movie id must not be empty".to_string(),
            ));
        }

        let item = MediaItem::from_movie(storage_type, movie_id.trim(), title, folder_id, user_id);

        tracing::info!(
            media_item_id = %item.id(),
            storage_type = %storage_type,
            movie_id = %movie_id,
            "Created media item from movie"
        );

        Ok(item)
    }
}

impl From<&MediaLibraryConfig> for MediaItemFactory {
    fn from(config: &MediaLibraryConfig) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use medialib_core::{AspectRatio, MediaType, Resolution};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_image_item() {
        let dir = TempDir::new().unwrap();
        let shard = dir.path().join("7");
        fs::create_dir(&shard).unwrap();
        let path = shard.join("sunset.png");
        RgbImage::from_pixel(160, 90, Rgb([255, 128, 0]))
            .save(&path)
            .unwrap();

        let folder_id = Uuid::new_v4();
        let item = MediaItemFactory::default()
            .create_from_local_path(&path, folder_id, 3)
            .unwrap();

        assert_eq!(item.media_type(), MediaType::Image);
        assert_eq!(item.storage_type(), StorageType::Local);
        assert_eq!(item.title(), "sunset");
        assert_eq!(item.url(), "sunset.png");
        assert_eq!(item.full_url(), "7/sunset.png");
        assert_eq!(item.mime(), Some("image/png"));
        assert_eq!(item.folder_id(), folder_id);
        assert_eq!(item.user_id(), 3);
        assert_eq!(item.resolution(), Some(Resolution::new(160, 90)));
        assert_eq!(item.aspect_ratio(), Some(AspectRatio::Widescreen));
        assert_eq!(item.size(), Some(fs::metadata(&path).unwrap().len()));
    }

    #[test]
    fn test_document_has_no_resolution() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"%PDF-1.4\n%%EOF").unwrap();

        let item = MediaItemFactory::default()
            .create_from_local_path(&path, Uuid::new_v4(), 1)
            .unwrap();

        assert_eq!(item.media_type(), MediaType::Document);
        assert_eq!(item.mime(), Some("application/pdf"));
        assert_eq!(item.resolution(), None);
        assert_eq!(item.aspect_ratio(), None);
    }

    #[test]
    fn test_corrupt_image_aborts_creation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"\xff\xd8\xff\xe0 not really a jpeg").unwrap();

        let result = MediaItemFactory::default().create_from_local_path(&path, Uuid::new_v4(), 1);
        assert!(matches!(result, Err(MediaError::UnreadableImage { .. })));
    }

    #[test]
    fn test_configured_fallback_size_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.svg");
        fs::write(&path, r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();

        let config = MediaLibraryConfig {
            svg_fallback_size: 50,
            ..MediaLibraryConfig::default()
        };
        let item = MediaItemFactory::from_config(&config)
            .create_from_local_path(&path, Uuid::new_v4(), 1)
            .unwrap();

        assert_eq!(item.resolution(), Some(Resolution::square(50)));
        assert_eq!(item.aspect_ratio(), Some(AspectRatio::Square));
    }

    #[test]
    fn test_create_movie_item() {
        let item = MediaItemFactory::default()
            .create_from_movie(StorageType::Vimeo, " 76979871 ", "Trailer", Uuid::new_v4(), 2)
            .unwrap();

        assert_eq!(item.media_type(), MediaType::Movie);
        assert_eq!(item.storage_type(), StorageType::Vimeo);
        assert_eq!(item.url(), "76979871");
        assert_eq!(item.resolution(), None);
        assert_eq!(item.aspect_ratio(), None);
    }

    #[test]
    fn test_movie_requires_movie_host() {
        let factory = MediaItemFactory::default();

        let result = factory.create_from_movie(StorageType::Local, "abc", "x", Uuid::new_v4(), 1);
        assert!(matches!(result, Err(MediaError::InvalidInput(_))));

        let result = factory.create_from_movie(StorageType::Youtube, "  ", "x", Uuid::new_v4(), 1);
        assert!(matches!(result, Err(MediaError::InvalidInput(_))));
    }
}
