//! File access for media sources.
//!
//! [`SourceFile`] is what the item factory needs to know about an uploaded file.
//! [`LocalSourceFile`] implements it for a path on the local filesystem and
//! determines the MIME type from the file's leading bytes rather than trusting
//! the extension.

use medialib_core::{MediaError, MediaResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

pub const SVG_MIME_TYPES: [&str; 2] = ["image/svg", "image/svg+xml"];

/// Metadata of a file about to become a media item.
pub trait SourceFile {
    fn path(&self) -> &Path;

    fn filename(&self) -> &str;

    /// MIME type determined from the content, if recognizable
    fn mime_type(&self) -> Option<&str>;

    /// Size in bytes
    fn size(&self) -> u64;

    /// Name of the directory containing the file
    fn parent_folder_name(&self) -> Option<&str>;

    fn extension(&self) -> Option<&str> {
        Path::new(self.filename())
            .extension()
            .and_then(|e| e.to_str())
    }

    /// File name without its extension.
    fn title(&self) -> String {
        let filename = self.filename();
        match self.extension() {
            Some(extension) => filename
                .strip_suffix(extension)
                .and_then(|stem| stem.strip_suffix('.'))
                .unwrap_or(filename)
                .to_string(),
            None => filename.to_string(),
        }
    }

    fn is_svg(&self) -> bool {
        self.mime_type()
            .is_some_and(|mime| SVG_MIME_TYPES.contains(&mime))
    }

    /// At most `limit` leading bytes of the content.
    fn read_header(&self, limit: usize) -> MediaResult<Vec<u8>> {
        read_header(self.path(), limit)
    }
}

/// A regular file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSourceFile {
    path: PathBuf,
    filename: String,
    mime_type: Option<String>,
    size: u64,
    parent_folder_name: Option<String>,
}

impl LocalSourceFile {
    /// Inspect `path`, sniffing the MIME type from at most `sniff_bytes` leading bytes.
    ///
    /// Fails with [`MediaError::UnsupportedSource`] when the path does not exist
    /// or is not a regular file.
    pub fn open(path: impl AsRef<Path>, sniff_bytes: usize) -> MediaResult<Self> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|e| {
            MediaError::unsupported_source(path, format!("This is not a valid file: {}", e))
        })?;
        if !metadata.is_file() {
            return Err(MediaError::unsupported_source(
                path,
                "The given source is not a file",
            ));
        }

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                MediaError::unsupported_source(path, "File name is not valid UTF-8")
            })?
            .to_string();

        let header = read_header(path, sniff_bytes)?;
        let mime_type = sniff_mime_type(&header).map(str::to_string);

        let parent_folder_name = path
            .parent()
            .and_then(|parent| parent.file_name())
            .and_then(|name| name.to_str())
            .map(str::to_string);

        tracing::debug!(
            path = %path.display(),
            mime_type = ?mime_type,
            size = metadata.len(),
            "Inspected source file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            filename,
            mime_type,
            size: metadata.len(),
            parent_folder_name,
        })
    }
}

impl SourceFile for LocalSourceFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn filename(&self) -> &str {
        &self.filename
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn parent_folder_name(&self) -> Option<&str> {
        self.parent_folder_name.as_deref()
    }
}

/// Read up to `limit` leading bytes. The handle is dropped before returning.
pub fn read_header(path: &Path, limit: usize) -> MediaResult<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| MediaError::unsupported_source(path, format!("Cannot open file: {}", e)))?;

    let mut header = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// MIME type of the content starting with `header`, if recognizable.
pub fn sniff_mime_type(header: &[u8]) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(header) {
        return Some(format.to_mime_type());
    }

    if looks_like_svg(header) {
        return Some("image/svg+xml");
    }

    sniff_magic(header)
}

/// True when the first element of the document is `<svg>`. The XML
/// declaration, comments, processing instructions and a DOCTYPE may precede it.
fn looks_like_svg(header: &[u8]) -> bool {
    let header = header.strip_prefix(b"\xef\xbb\xbf").unwrap_or(header);
    let mut reader = Reader::from_reader(header);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return e.local_name().as_ref() == b"svg";
            }
            Ok(Event::Decl(_))
            | Ok(Event::Comment(_))
            | Ok(Event::DocType(_))
            | Ok(Event::PI(_)) => {}
            Ok(Event::Text(ref e)) if e.iter().all(|b| b.is_ascii_whitespace()) => {}
            _ => return false,
        }
        buf.clear();
    }
}

fn sniff_magic(header: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1f\x8b", "application/gzip"),
        (b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
        (b"Rar!\x1a\x07", "application/vnd.rar"),
        (b"ID3", "audio/mpeg"),
        (b"fLaC", "audio/flac"),
        (b"OggS", "audio/ogg"),
        (b"\x1a\x45\xdf\xa3", "video/webm"),
    ];

    if let Some((_, mime)) = SIGNATURES
        .iter()
        .find(|(signature, _)| header.starts_with(signature))
    {
        return Some(mime);
    }

    if header.len() >= 12 && &header[0..4] == b"RIFF" {
        return match &header[8..12] {
            b"WAVE" => Some("audio/wav"),
            b"AVI " => Some("video/x-msvideo"),
            _ => None,
        };
    }

    if header.len() >= 12 && &header[4..8] == b"ftyp" {
        return match &header[8..12] {
            b"M4A " => Some("audio/mp4"),
            b"qt  " => Some("video/quicktime"),
            _ => Some("video/mp4"),
        };
    }

    None
}
