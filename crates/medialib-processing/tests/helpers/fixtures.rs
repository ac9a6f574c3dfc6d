//! Test fixtures: encoded raster images, SVG documents and other blobs.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode fixture image");
    buffer
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

/// SVG with the given root attributes and a single child shape.
pub fn create_test_svg(root_attributes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" {}>
  <circle cx="50" cy="50" r="40" fill="red"/>
</svg>
"#,
        root_attributes
    )
}

/// JPEG signature followed by garbage.
pub fn create_corrupt_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend_from_slice(b"definitely not a JFIF segment");
    data
}

/// Leading bytes of an MP4 container.
pub fn create_test_mp4_header() -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&24u32.to_be_bytes());
    data.extend_from_slice(b"ftypisom");
    data.extend_from_slice(&[0, 0, 2, 0]);
    data.extend_from_slice(b"isomiso2");
    data
}

/// Leading bytes of an MP3 file with an ID3v2 tag.
pub fn create_test_mp3_header() -> Vec<u8> {
    let mut data = b"ID3".to_vec();
    data.extend_from_slice(&[4, 0, 0, 0, 0, 0, 0]);
    data
}
