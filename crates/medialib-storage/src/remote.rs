//! Providers for media that is not stored locally.
//!
//! None of these perform I/O; they format URLs from the item's url field, which
//! holds an absolute URL for external items and a movie id for movie hosts.

use crate::html::{escape_html, link_to};
use crate::traits::StorageProvider;
use crate::StorageType;
use medialib_core::MediaItem;

/// Items whose url is already an absolute URL.
#[derive(Clone, Debug, Default)]
pub struct ExternalStorageProvider;

impl StorageProvider for ExternalStorageProvider {
    fn storage_type(&self) -> StorageType {
        StorageType::External
    }

    fn absolute_path(&self, item: &MediaItem) -> String {
        item.url().to_string()
    }

    fn absolute_web_path(&self, item: &MediaItem) -> String {
        item.url().to_string()
    }

    fn web_path(&self, item: &MediaItem) -> String {
        item.url().to_string()
    }

    fn thumbnail(&self, item: &MediaItem) -> Option<String> {
        item.media_type()
            .is_image()
            .then(|| item.url().to_string())
    }

    fn link_html(&self, item: &MediaItem) -> String {
        link_to(item.url(), item)
    }

    fn include_html(&self, item: &MediaItem) -> String {
        if item.media_type().is_image() {
            format!(
                "<img src=\"{}\" alt=\"{}\" />",
                escape_html(item.url()),
                escape_html(item.title())
            )
        } else {
            self.link_html(item)
        }
    }
}

fn embed_iframe(src: &str, item: &MediaItem) -> String {
    format!(
        "<iframe src=\"{}\" title=\"{}\" width=\"560\" height=\"315\" \
         frameborder=\"0\" allowfullscreen></iframe>",
        escape_html(src),
        escape_html(item.title())
    )
}

/// Movies hosted on YouTube, referenced by video id.
#[derive(Clone, Debug, Default)]
pub struct YoutubeStorageProvider;

impl YoutubeStorageProvider {
    const WATCH_URL: &'static str = "https://www.youtube.com/watch?v=";
    const EMBED_URL: &'static str = "https://www.youtube.com/embed/";
    const THUMBNAIL_URL: &'static str = "https://img.youtube.com/vi/";
}

impl StorageProvider for YoutubeStorageProvider {
    fn storage_type(&self) -> StorageType {
        StorageType::Youtube
    }

    fn absolute_path(&self, item: &MediaItem) -> String {
        format!("{}{}", Self::WATCH_URL, item.url())
    }

    fn absolute_web_path(&self, item: &MediaItem) -> String {
        self.absolute_path(item)
    }

    fn web_path(&self, item: &MediaItem) -> String {
        self.absolute_path(item)
    }

    fn thumbnail(&self, item: &MediaItem) -> Option<String> {
        Some(format!("{}{}/0.jpg", Self::THUMBNAIL_URL, item.url()))
    }

    fn link_html(&self, item: &MediaItem) -> String {
        link_to(&self.web_path(item), item)
    }

    fn include_html(&self, item: &MediaItem) -> String {
        embed_iframe(&format!("{}{}", Self::EMBED_URL, item.url()), item)
    }
}

/// Movies hosted on Vimeo, referenced by video id.
#[derive(Clone, Debug, Default)]
pub struct VimeoStorageProvider;

impl VimeoStorageProvider {
    const WATCH_URL: &'static str = "https://vimeo.com/";
    const EMBED_URL: &'static str = "https://player.vimeo.com/video/";
}

impl StorageProvider for VimeoStorageProvider {
    fn storage_type(&self) -> StorageType {
        StorageType::Vimeo
    }

    fn absolute_path(&self, item: &MediaItem) -> String {
        format!("{}{}", Self::WATCH_URL, item.url())
    }

    fn absolute_web_path(&self, item: &MediaItem) -> String {
        self.absolute_path(item)
    }

    fn web_path(&self, item: &MediaItem) -> String {
        self.absolute_path(item)
    }

    // Vimeo thumbnails need an authenticated API call.
    fn thumbnail(&self, _item: &MediaItem) -> Option<String> {
        None
    }

    fn link_html(&self, item: &MediaItem) -> String {
        link_to(&self.web_path(item), item)
    }

    fn include_html(&self, item: &MediaItem) -> String {
        embed_iframe(&format!("{}{}", Self::EMBED_URL, item.url()), item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn movie(storage_type: StorageType, id: &str) -> MediaItem {
        MediaItem::from_movie(storage_type, id, "Trailer", Uuid::new_v4(), 1)
    }

    #[test]
    fn test_youtube_urls() {
        let provider = YoutubeStorageProvider;
        let item = movie(StorageType::Youtube, "abc123");

        assert_eq!(
            provider.web_path(&item),
            "https://www.youtube.com/watch?v=abc123"
        );
        assert_eq!(
            provider.thumbnail(&item).as_deref(),
            Some("https://img.youtube.com/vi/abc123/0.jpg")
        );
        assert!(provider
            .include_html(&item)
            .starts_with("<iframe src=\"https://www.youtube.com/embed/abc123\""));
    }

    #[test]
    fn test_vimeo_urls() {
        let provider = VimeoStorageProvider;
        let item = movie(StorageType::Vimeo, "76979871");

        assert_eq!(provider.absolute_web_path(&item), "https://vimeo.com/76979871");
        assert_eq!(provider.thumbnail(&item), None);
        assert!(provider
            .include_html(&item)
            .contains("https://player.vimeo.com/video/76979871"));
    }

    #[test]
    fn test_movie_providers_have_no_filtered_paths() {
        let item = movie(StorageType::Youtube, "abc123");
        assert_eq!(YoutubeStorageProvider.web_path_with_filter(&item, "backend"), None);
    }

    #[test]
    fn test_external_uses_url_verbatim() {
        let provider = ExternalStorageProvider;
        let item = movie(StorageType::External, "https://cdn.example.com/clip.mp4");

        assert_eq!(provider.web_path(&item), "https://cdn.example.com/clip.mp4");
        assert_eq!(provider.thumbnail(&item), None);
        assert_eq!(
            provider.include_html(&item),
            "<a href=\"https://cdn.example.com/clip.mp4\" title=\"Trailer\" \
             target=\"_blank\">Trailer</a>"
        );
    }
}
