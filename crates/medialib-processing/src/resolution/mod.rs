//! Pixel dimensions of image files.
//!
//! Raster images are measured from their header; SVG files are measured from
//! the root element's `viewBox` or `width`/`height` attributes.

mod raster;
mod svg;

pub use svg::parse_svg_length;

use crate::source::{read_header, sniff_mime_type, SVG_MIME_TYPES};
use medialib_core::config::{MIME_SNIFF_BYTES, SVG_FALLBACK_SIZE};
use medialib_core::{MediaLibraryConfig, MediaResult, MediaType, Resolution};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Edge length used when an SVG declares neither a viewBox nor a size
    pub svg_fallback_size: u32,
    /// Leading bytes read by [`ResolutionResolver::resolve`] to tell SVG from raster
    pub mime_sniff_bytes: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            svg_fallback_size: SVG_FALLBACK_SIZE,
            mime_sniff_bytes: MIME_SNIFF_BYTES,
        }
    }
}

impl From<&MediaLibraryConfig> for ResolverConfig {
    fn from(config: &MediaLibraryConfig) -> Self {
        Self {
            svg_fallback_size: config.svg_fallback_size,
            mime_sniff_bytes: config.mime_sniff_bytes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolutionResolver {
    config: ResolverConfig,
}

impl ResolutionResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Dimensions of the file at `path`, or `None` when `media_type` is not an image.
    ///
    /// The file content decides between the SVG and raster branches. Non-image
    /// types return without touching the filesystem.
    pub fn resolve(&self, path: &Path, media_type: MediaType) -> MediaResult<Option<Resolution>> {
        if !media_type.is_image() {
            return Ok(None);
        }

        let header = read_header(path, self.config.mime_sniff_bytes)?;
        self.resolve_with_mime(path, media_type, sniff_mime_type(&header))
    }

    /// Like [`resolve`](Self::resolve), with the MIME type already known.
    ///
    /// Anything other than `image/svg` or `image/svg+xml` is treated as raster.
    pub fn resolve_with_mime(
        &self,
        path: &Path,
        media_type: MediaType,
        mime_type: Option<&str>,
    ) -> MediaResult<Option<Resolution>> {
        if !media_type.is_image() {
            return Ok(None);
        }

        let resolution = if mime_type.is_some_and(|mime| SVG_MIME_TYPES.contains(&mime)) {
            svg::dimensions(path, self.config.svg_fallback_size)?
        } else {
            raster::dimensions(path)?
        };

        tracing::debug!(
            path = %path.display(),
            width = resolution.width,
            height = resolution.height,
            "Resolved image dimensions"
        );

        Ok(Some(resolution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use medialib_core::MediaError;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join(name);
        RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_non_images_are_not_resolved() {
        let resolver = ResolutionResolver::default();
        let missing = Path::new("/definitely/not/here.mp4");

        for media_type in [
            MediaType::Movie,
            MediaType::Audio,
            MediaType::Document,
            MediaType::Archive,
            MediaType::Other,
        ] {
            assert_eq!(resolver.resolve(missing, media_type).unwrap(), None);
        }
    }

    #[test]
    fn test_resolve_raster() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "wide.png", 64, 36);

        let resolution = ResolutionResolver::default()
            .resolve(&path, MediaType::Image)
            .unwrap();

        assert_eq!(resolution, Some(Resolution::new(64, 36)));
    }

    #[test]
    fn test_resolve_svg_by_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.svg");
        fs::write(&path, r#"<svg viewBox="0 0 300 150" width="10" height="10"/>"#).unwrap();

        let resolution = ResolutionResolver::default()
            .resolve(&path, MediaType::Image)
            .unwrap();

        assert_eq!(resolution, Some(Resolution::new(300, 150)));
    }

    #[test]
    fn test_resolve_with_explicit_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icon");
        fs::write(&path, r#"<svg width="48" height="24"></svg>"#).unwrap();

        let resolver = ResolutionResolver::default();
        assert_eq!(
            resolver
                .resolve_with_mime(&path, MediaType::Image, Some("image/svg"))
                .unwrap(),
            Some(Resolution::new(48, 24))
        );

        // Without an SVG MIME type the same file is read as raster
        let result = resolver.resolve_with_mime(&path, MediaType::Image, Some("text/plain"));
        assert!(matches!(result, Err(MediaError::UnreadableImage { .. })));
    }

    #[test]
    fn test_configured_fallback_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.svg");
        fs::write(&path, "<svg/>").unwrap();

        let resolver = ResolutionResolver::new(ResolverConfig {
            svg_fallback_size: 64,
            ..ResolverConfig::default()
        });

        assert_eq!(
            resolver.resolve(&path, MediaType::Image).unwrap(),
            Some(Resolution::square(64))
        );
    }

    #[test]
    fn test_config_from_library_config() {
        let library = MediaLibraryConfig {
            svg_fallback_size: 120,
            mime_sniff_bytes: 512,
            ..MediaLibraryConfig::default()
        };

        let config = ResolverConfig::from(&library);
        assert_eq!(config.svg_fallback_size, 120);
        assert_eq!(config.mime_sniff_bytes, 512);
    }

    #[test]
    fn test_missing_image_is_unsupported_source() {
        let dir = TempDir::new().unwrap();
        let result =
            ResolutionResolver::default().resolve(&dir.path().join("gone.png"), MediaType::Image);
        assert!(matches!(result, Err(MediaError::UnsupportedSource { .. })));
    }
}
