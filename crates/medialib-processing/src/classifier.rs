//! Media type classification from file extension and MIME type.
//!
//! The extension is authoritative: an unknown or missing extension classifies
//! as `other`, and when the extension and MIME types disagree the extension's
//! type is returned. The MIME type is only compared and logged.

use medialib_core::MediaType;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

const EXTENSIONS: &[(&str, MediaType)] = &[
    // Images
    ("jpg", MediaType::Image),
    ("jpeg", MediaType::Image),
    ("jpe", MediaType::Image),
    ("png", MediaType::Image),
    ("gif", MediaType::Image),
    ("webp", MediaType::Image),
    ("avif", MediaType::Image),
    ("svg", MediaType::Image),
    ("bmp", MediaType::Image),
    ("ico", MediaType::Image),
    ("tif", MediaType::Image),
    ("tiff", MediaType::Image),
    ("heic", MediaType::Image),
    ("heif", MediaType::Image),
    // Movies
    ("mp4", MediaType::Movie),
    ("m4v", MediaType::Movie),
    ("mov", MediaType::Movie),
    ("avi", MediaType::Movie),
    ("mkv", MediaType::Movie),
    ("webm", MediaType::Movie),
    ("wmv", MediaType::Movie),
    ("flv", MediaType::Movie),
    ("mpg", MediaType::Movie),
    ("mpeg", MediaType::Movie),
    ("3gp", MediaType::Movie),
    ("ogv", MediaType::Movie),
    // Audio
    ("mp3", MediaType::Audio),
    ("wav", MediaType::Audio),
    ("ogg", MediaType::Audio),
    ("oga", MediaType::Audio),
    ("opus", MediaType::Audio),
    ("m4a", MediaType::Audio),
    ("flac", MediaType::Audio),
    ("aac", MediaType::Audio),
    ("wma", MediaType::Audio),
    ("aif", MediaType::Audio),
    ("aiff", MediaType::Audio),
    // Documents
    ("pdf", MediaType::Document),
    ("doc", MediaType::Document),
    ("docx", MediaType::Document),
    ("xls", MediaType::Document),
    ("xlsx", MediaType::Document),
    ("ppt", MediaType::Document),
    ("pptx", MediaType::Document),
    ("odt", MediaType::Document),
    ("ods", MediaType::Document),
    ("odp", MediaType::Document),
    ("rtf", MediaType::Document),
    ("txt", MediaType::Document),
    ("csv", MediaType::Document),
    ("md", MediaType::Document),
    // Archives
    ("zip", MediaType::Archive),
    ("tar", MediaType::Archive),
    ("gz", MediaType::Archive),
    ("tgz", MediaType::Archive),
    ("bz2", MediaType::Archive),
    ("xz", MediaType::Archive),
    ("7z", MediaType::Archive),
    ("rar", MediaType::Archive),
];

const MIME_TYPES: &[(&str, MediaType)] = &[
    // Documents
    ("application/pdf", MediaType::Document),
    ("application/msword", MediaType::Document),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        MediaType::Document,
    ),
    ("application/vnd.ms-excel", MediaType::Document),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        MediaType::Document,
    ),
    ("application/vnd.ms-powerpoint", MediaType::Document),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        MediaType::Document,
    ),
    ("application/vnd.oasis.opendocument.text", MediaType::Document),
    (
        "application/vnd.oasis.opendocument.spreadsheet",
        MediaType::Document,
    ),
    (
        "application/vnd.oasis.opendocument.presentation",
        MediaType::Document,
    ),
    ("application/rtf", MediaType::Document),
    // Archives
    ("application/zip", MediaType::Archive),
    ("application/x-zip-compressed", MediaType::Archive),
    ("application/x-tar", MediaType::Archive),
    ("application/gzip", MediaType::Archive),
    ("application/x-gzip", MediaType::Archive),
    ("application/x-bzip2", MediaType::Archive),
    ("application/x-xz", MediaType::Archive),
    ("application/x-7z-compressed", MediaType::Archive),
    ("application/x-rar-compressed", MediaType::Archive),
    ("application/vnd.rar", MediaType::Archive),
    // Audio
    ("application/ogg", MediaType::Audio),
];

const MIME_PREFIXES: &[(&str, MediaType)] = &[
    ("image/", MediaType::Image),
    ("video/", MediaType::Movie),
    ("audio/", MediaType::Audio),
    ("text/", MediaType::Document),
];

static DEFAULT_TABLES: LazyLock<Arc<ClassificationTables>> = LazyLock::new(|| {
    Arc::new(ClassificationTables::from_entries(EXTENSIONS, MIME_TYPES, MIME_PREFIXES))
});

/// Immutable extension and MIME lookup tables.
#[derive(Debug, Clone)]
pub struct ClassificationTables {
    extensions: HashMap<String, MediaType>,
    mime_types: HashMap<String, MediaType>,
    mime_prefixes: Vec<(String, MediaType)>,
}

impl ClassificationTables {
    /// Build tables from explicit entries. Keys are matched case-insensitively.
    pub fn from_entries(
        extensions: &[(&str, MediaType)],
        mime_types: &[(&str, MediaType)],
        mime_prefixes: &[(&str, MediaType)],
    ) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|(ext, media_type)| (ext.to_lowercase(), *media_type))
                .collect(),
            mime_types: mime_types
                .iter()
                .map(|(mime, media_type)| (mime.to_lowercase(), *media_type))
                .collect(),
            mime_prefixes: mime_prefixes
                .iter()
                .map(|(prefix, media_type)| (prefix.to_lowercase(), *media_type))
                .collect(),
        }
    }

    /// The built-in tables, built once per process.
    pub fn shared() -> Arc<ClassificationTables> {
        Arc::clone(&DEFAULT_TABLES)
    }

    pub fn extensions(&self) -> impl Iterator<Item = (&str, MediaType)> {
        self.extensions
            .iter()
            .map(|(ext, media_type)| (ext.as_str(), *media_type))
    }
}

/// Media type classifier
#[derive(Debug, Clone)]
pub struct MediaClassifier {
    tables: Arc<ClassificationTables>,
}

impl Default for MediaClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaClassifier {
    pub fn new() -> Self {
        Self::with_tables(ClassificationTables::shared())
    }

    pub fn with_tables(tables: Arc<ClassificationTables>) -> Self {
        Self { tables }
    }

    /// Classify a file by name and (optional) MIME type.
    ///
    /// The extension always decides; an unknown extension yields
    /// [`MediaType::Other`] whatever the MIME type says.
    pub fn classify(&self, filename: &str, mime_type: Option<&str>) -> MediaType {
        let extension_type = self.type_from_filename(filename);
        let mime_type_type = mime_type.and_then(|mime| self.type_from_mime(mime));

        if let Some(mime_type_type) = mime_type_type {
            if extension_type != mime_type_type {
                tracing::debug!(
                    filename = %filename,
                    mime_type = ?mime_type,
                    extension_type = %extension_type,
                    mime_type_type = %mime_type_type,
                    "Extension and MIME type disagree, using extension"
                );
            }
        }

        extension_type
    }

    /// Type of the file's extension, [`MediaType::Other`] when it has none or
    /// it is not in the tables.
    pub fn type_from_filename(&self, filename: &str) -> MediaType {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.type_from_extension(e))
            .unwrap_or(MediaType::Other)
    }

    pub fn type_from_extension(&self, extension: &str) -> Option<MediaType> {
        let normalized = extension.trim_start_matches('.').to_lowercase();
        self.tables.extensions.get(&normalized).copied()
    }

    /// Classify a MIME string. Parameters (`; charset=...`) are ignored; strings
    /// that are not `type/subtype` yield `None`.
    pub fn type_from_mime(&self, mime_type: &str) -> Option<MediaType> {
        let essence = mime_type.split(';').next()?.trim().to_lowercase();

        let (top_level, subtype) = essence.split_once('/')?;
        if top_level.is_empty() || subtype.is_empty() || subtype.contains('/') {
            return None;
        }

        if let Some(media_type) = self.tables.mime_types.get(&essence) {
            return Some(*media_type);
        }

        self.tables
            .mime_prefixes
            .iter()
            .find(|(prefix, _)| essence.starts_with(prefix.as_str()))
            .map(|(_, media_type)| *media_type)
    }
}
