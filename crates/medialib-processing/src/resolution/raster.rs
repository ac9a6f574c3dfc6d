use image::ImageReader;
use medialib_core::{MediaError, MediaResult, Resolution};
use std::path::Path;

/// Read width and height from the image header without decoding pixel data.
pub(super) fn dimensions(path: &Path) -> MediaResult<Resolution> {
    let reader = ImageReader::open(path)
        .map_err(|e| MediaError::unsupported_source(path, e))?
        .with_guessed_format()
        .map_err(|e| MediaError::unreadable_image(path, e))?;

    if reader.format().is_none() {
        return Err(MediaError::unreadable_image(
            path,
            "Unrecognized image format",
        ));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| MediaError::unreadable_image(path, e))?;

    Ok(Resolution::new(width, height))
}
