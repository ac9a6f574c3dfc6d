use crate::html::{escape_html, join_url, link_to};
use crate::traits::{StorageError, StorageProvider, StorageResult};
use crate::StorageType;
use medialib_core::MediaItem;
use std::path::PathBuf;

/// Local filesystem storage provider
#[derive(Clone, Debug)]
pub struct LocalStorageProvider {
    base_path: PathBuf,
    base_url: String,
    site_url: String,
    filter_cache_base_url: String,
}

impl LocalStorageProvider {
    /// Create a new LocalStorageProvider instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory of stored files (e.g., "/var/lib/medialib/uploads")
    /// * `base_url` - URL prefix files are served from (e.g., "/media/uploads")
    /// * `site_url` - Scheme and host prepended for absolute web paths
    /// * `filter_cache_base_url` - URL prefix of filtered variants (e.g., "/media/cache")
    pub fn new(
        base_path: impl Into<PathBuf>,
        base_url: impl Into<String>,
        site_url: impl Into<String>,
        filter_cache_base_url: impl Into<String>,
    ) -> StorageResult<Self> {
        let provider = LocalStorageProvider {
            base_path: base_path.into(),
            base_url: base_url.into(),
            site_url: site_url.into(),
            filter_cache_base_url: filter_cache_base_url.into(),
        };

        if provider.base_path.as_os_str().is_empty() {
            return Err(StorageError::ConfigError(
                "Local storage base path must not be empty".to_string(),
            ));
        }
        if provider.base_url.trim().is_empty() || provider.site_url.trim().is_empty() {
            return Err(StorageError::ConfigError(
                "Local storage base URL and site URL must not be empty".to_string(),
            ));
        }

        Ok(provider)
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn file_path(&self, item: &MediaItem) -> PathBuf {
        let mut path = self.base_path.clone();
        if let Some(folder) = item.sharding_folder_name() {
            path.push(folder);
        }
        path.push(item.url());
        path
    }
}

impl StorageProvider for LocalStorageProvider {
    fn storage_type(&self) -> StorageType {
        StorageType::Local
    }

    fn absolute_path(&self, item: &MediaItem) -> String {
        self.file_path(item).to_string_lossy().into_owned()
    }

    fn absolute_web_path(&self, item: &MediaItem) -> String {
        join_url(&self.site_url, &self.web_path(item))
    }

    fn web_path(&self, item: &MediaItem) -> String {
        join_url(&self.base_url, &item.full_url())
    }

    fn web_path_with_filter(&self, item: &MediaItem, filter: &str) -> Option<String> {
        // Only raster images have cached variants.
        if !item.media_type().is_image() || is_svg(item) {
            return None;
        }

        Some(join_url(
            &join_url(&self.filter_cache_base_url, filter),
            &item.full_url(),
        ))
    }

    fn thumbnail(&self, item: &MediaItem) -> Option<String> {
        item.media_type()
            .is_image()
            .then(|| self.web_path(item))
    }

    fn link_html(&self, item: &MediaItem) -> String {
        link_to(&self.web_path(item), item)
    }

    fn include_html(&self, item: &MediaItem) -> String {
        if !item.media_type().is_image() {
            return self.link_html(item);
        }

        let title = escape_html(item.title());
        let mut html = format!(
            "<img src=\"{}\" alt=\"{}\" title=\"{}\"",
            escape_html(&self.web_path(item)),
            title,
            title
        );
        if let Some(resolution) = item.resolution() {
            html.push_str(&format!(
                " width=\"{}\" height=\"{}\"",
                resolution.width, resolution.height
            ));
        }
        html.push_str(" />");
        html
    }
}

fn is_svg(item: &MediaItem) -> bool {
    matches!(item.mime(), Some("image/svg" | "image/svg+xml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialib_core::models::LocalFileDetails;
    use medialib_core::MediaType;
    use uuid::Uuid;

    fn provider() -> LocalStorageProvider {
        LocalStorageProvider::new(
            "/var/lib/medialib/uploads",
            "/media/uploads/",
            "https://example.com",
            "/media/cache",
        )
        .unwrap()
    }

    fn item(filename: &str, media_type: MediaType, mime: &str) -> MediaItem {
        MediaItem::from_local_file(
            LocalFileDetails {
                title: "A \"quoted\" title".to_string(),
                filename: filename.to_string(),
                media_type,
                mime: Some(mime.to_string()),
                size: Some(10),
                sharding_folder_name: Some("03".to_string()),
            },
            Uuid::new_v4(),
            1,
        )
    }

    #[test]
    fn test_paths() {
        let provider = provider();
        let item = item("photo.jpg", MediaType::Image, "image/jpeg");

        assert_eq!(
            provider.absolute_path(&item),
            "/var/lib/medialib/uploads/03/photo.jpg"
        );
        assert_eq!(provider.web_path(&item), "/media/uploads/03/photo.jpg");
        assert_eq!(
            provider.absolute_web_path(&item),
            "https://example.com/media/uploads/03/photo.jpg"
        );
    }

    #[test]
    fn test_filtered_path_only_for_raster_images() {
        let provider = provider();

        let photo = item("photo.jpg", MediaType::Image, "image/jpeg");
        assert_eq!(
            provider.web_path_with_filter(&photo, "backend").as_deref(),
            Some("/media/cache/backend/03/photo.jpg")
        );

        let icon = item("icon.svg", MediaType::Image, "image/svg+xml");
        assert_eq!(provider.web_path_with_filter(&icon, "backend"), None);

        let doc = item("cv.pdf", MediaType::Document, "application/pdf");
        assert_eq!(provider.web_path_with_filter(&doc, "backend"), None);
        assert_eq!(provider.thumbnail(&doc), None);
    }

    #[test]
    fn test_include_html_for_image_escapes_title() {
        let provider = provider();
        let mut photo = item("photo.jpg", MediaType::Image, "image/jpeg");
        photo.set_resolution(640, 480);

        assert_eq!(
            provider.include_html(&photo),
            "<img src=\"/media/uploads/03/photo.jpg\" alt=\"A &quot;quoted&quot; title\" \
             title=\"A &quot;quoted&quot; title\" width=\"640\" height=\"480\" />"
        );
    }

    #[test]
    fn test_include_html_for_document_is_link() {
        let provider = provider();
        let doc = item("cv.pdf", MediaType::Document, "application/pdf");

        assert_eq!(provider.include_html(&doc), provider.link_html(&doc));
        assert!(provider
            .link_html(&doc)
            .starts_with("<a href=\"/media/uploads/03/cv.pdf\""));
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        let result = LocalStorageProvider::new("/tmp", " ", "https://example.com", "/cache");
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
