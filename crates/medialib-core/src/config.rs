//! Configuration module
//!
//! Settings for the media library are read from `MEDIALIB_`-prefixed environment
//! variables (a `.env` file is honoured). Every key has a default so a bare
//! environment yields a usable development configuration.

use serde::Deserialize;

use crate::error::MediaError;

const ENV_PREFIX: &str = "MEDIALIB_";

// Common constants
pub const SVG_FALLBACK_SIZE: u32 = 200;
pub const MIME_SNIFF_BYTES: usize = 4096;
const BACKEND_PREVIEW_FILTER: &str = "backend";

fn default_local_storage_path() -> String {
    "uploads".to_string()
}

fn default_local_storage_base_url() -> String {
    "/media/uploads".to_string()
}

fn default_site_url() -> String {
    "http://localhost".to_string()
}

fn default_filter_cache_base_url() -> String {
    "/media/cache".to_string()
}

fn default_backend_preview_filter() -> String {
    BACKEND_PREVIEW_FILTER.to_string()
}

fn default_svg_fallback_size() -> u32 {
    SVG_FALLBACK_SIZE
}

fn default_mime_sniff_bytes() -> usize {
    MIME_SNIFF_BYTES
}

/// Media library configuration
#[derive(Clone, Debug, Deserialize)]
pub struct MediaLibraryConfig {
    /// Root directory of locally stored files (`MEDIALIB_LOCAL_STORAGE_PATH`)
    #[serde(default = "default_local_storage_path")]
    pub local_storage_path: String,
    /// URL prefix under which local files are served
    #[serde(default = "default_local_storage_base_url")]
    pub local_storage_base_url: String,
    /// Scheme and host used to build absolute web paths
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// URL prefix of filtered (resized) image variants
    #[serde(default = "default_filter_cache_base_url")]
    pub filter_cache_base_url: String,
    /// Filter used for backend previews in the JSON view
    #[serde(default = "default_backend_preview_filter")]
    pub backend_preview_filter: String,
    /// Edge length assumed for SVG files that declare no size
    #[serde(default = "default_svg_fallback_size")]
    pub svg_fallback_size: u32,
    /// Number of leading bytes inspected when sniffing a MIME type
    #[serde(default = "default_mime_sniff_bytes")]
    pub mime_sniff_bytes: usize,
}

impl Default for MediaLibraryConfig {
    fn default() -> Self {
        Self {
            local_storage_path: default_local_storage_path(),
            local_storage_base_url: default_local_storage_base_url(),
            site_url: default_site_url(),
            filter_cache_base_url: default_filter_cache_base_url(),
            backend_preview_filter: default_backend_preview_filter(),
            svg_fallback_size: default_svg_fallback_size(),
            mime_sniff_bytes: default_mime_sniff_bytes(),
        }
    }
}

impl MediaLibraryConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config: MediaLibraryConfig = envy::prefixed(ENV_PREFIX)
            .from_env()
            .map_err(MediaError::from)?;
        config.validate()?;

        tracing::debug!(
            local_storage_path = %config.local_storage_path,
            local_storage_base_url = %config.local_storage_base_url,
            svg_fallback_size = config.svg_fallback_size,
            "Loaded media library configuration"
        );

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs (keys carry the
    /// `MEDIALIB_` prefix, as in the environment).
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, MediaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let config: MediaLibraryConfig = envy::prefixed(ENV_PREFIX)
            .from_iter(pairs.into_iter().map(|(k, v)| (k.into(), v.into())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MediaError> {
        if self.local_storage_path.trim().is_empty() {
            return Err(MediaError::Config(
                "MEDIALIB_LOCAL_STORAGE_PATH must not be empty".to_string(),
            ));
        }

        for (key, value) in [
            ("MEDIALIB_LOCAL_STORAGE_BASE_URL", &self.local_storage_base_url),
            ("MEDIALIB_SITE_URL", &self.site_url),
            ("MEDIALIB_FILTER_CACHE_BASE_URL", &self.filter_cache_base_url),
        ] {
            if value.trim().is_empty() {
                return Err(MediaError::Config(format!("{} must not be empty", key)));
            }
        }

        if self.svg_fallback_size == 0 {
            return Err(MediaError::Config(
                "MEDIALIB_SVG_FALLBACK_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.mime_sniff_bytes < 16 {
            return Err(MediaError::Config(
                "MEDIALIB_MIME_SNIFF_BYTES must be at least 16".to_string(),
            ));
        }

        Ok(())
    }
}
