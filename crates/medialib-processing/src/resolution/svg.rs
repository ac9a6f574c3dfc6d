use medialib_core::{MediaError, MediaResult, Resolution};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Leading decimal number of an attribute value, e.g. `"12.5px"` -> `"12.5"`.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid number pattern")
});

/// Size attributes found on the root element.
#[derive(Debug, Default)]
struct RootSize {
    view_box: Option<String>,
    width: Option<String>,
    height: Option<String>,
}

impl RootSize {
    fn from_element(path: &Path, element: &BytesStart) -> MediaResult<Self> {
        let mut size = RootSize::default();

        for attr in element.attributes() {
            let attr = attr.map_err(|e| MediaError::malformed_markup(path, e))?;
            let value = || -> MediaResult<String> {
                attr.unescape_value()
                    .map(|v| v.into_owned())
                    .map_err(|e| MediaError::malformed_markup(path, e))
            };

            match attr.key.as_ref() {
                b"viewBox" => size.view_box = Some(value()?),
                b"width" => size.width = Some(value()?),
                b"height" => size.height = Some(value()?),
                _ => {}
            }
        }

        Ok(size)
    }

    fn resolution(&self) -> Resolution {
        if let Some(view_box) = &self.view_box {
            let mut tokens = view_box
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .skip(2);
            let width = tokens.next().map(parse_svg_length).unwrap_or(0);
            let height = tokens.next().map(parse_svg_length).unwrap_or(0);
            return Resolution::new(width, height);
        }

        Resolution::new(
            self.width.as_deref().map(parse_svg_length).unwrap_or(0),
            self.height.as_deref().map(parse_svg_length).unwrap_or(0),
        )
    }
}

/// Truncate an SVG length to a whole number of pixels.
///
/// Only the leading number counts (`"99.9%"` is 99). Values that do not start
/// with a number are 0, and negative values clamp to 0.
pub fn parse_svg_length(value: &str) -> u32 {
    LEADING_NUMBER
        .find(value)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .map(|number| number.trunc() as u32)
        .unwrap_or(0)
}

/// Dimensions declared by the SVG document at `path`.
///
/// The root `viewBox` wins over `width`/`height`. A document that declares no
/// size at all is assumed to be a `fallback_size` square.
pub(super) fn dimensions(path: &Path, fallback_size: u32) -> MediaResult<Resolution> {
    let content = fs::read(path).map_err(|e| MediaError::unsupported_source(path, e))?;
    let content = content.strip_prefix(b"\xef\xbb\xbf").unwrap_or(&content);

    let root = parse_root(path, content)?;
    let resolution = root.resolution();

    if resolution.is_zero() {
        tracing::debug!(
            path = %path.display(),
            fallback_size,
            "SVG declares no size, using fallback"
        );
        return Ok(Resolution::square(fallback_size));
    }

    Ok(resolution)
}

/// Walk the whole document, checking well-formedness, and return the root's size attributes.
fn parse_root(path: &Path, content: &[u8]) -> MediaResult<RootSize> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root: Option<RootSize> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(MediaError::malformed_markup(path, "Multiple root elements"));
                    }
                    root = Some(RootSize::from_element(path, e)?);
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 0 {
                    if root.is_some() {
                        return Err(MediaError::malformed_markup(path, "Multiple root elements"));
                    }
                    root = Some(RootSize::from_element(path, e)?);
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    MediaError::malformed_markup(path, "Closing tag without opening tag")
                })?;
            }
            Ok(Event::Text(ref e)) => {
                if depth == 0 && e.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(MediaError::malformed_markup(
                        path,
                        "Text outside of the root element",
                    ));
                }
            }
            Ok(Event::CData(_)) if depth == 0 => {
                return Err(MediaError::malformed_markup(
                    path,
                    "Character data outside of the root element",
                ));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(MediaError::malformed_markup(
                    path,
                    format!("at position {}: {}", reader.buffer_position(), e),
                ))
            }
        }
        buf.clear();
    }

    if depth > 0 {
        return Err(MediaError::malformed_markup(path, "Unclosed element"));
    }

    root.ok_or_else(|| MediaError::malformed_markup(path, "No root element"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolve_markup(markup: &str) -> MediaResult<Resolution> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image.svg");
        fs::write(&path, markup).unwrap();
        dimensions(&path, 200)
    }

    #[test]
    fn test_view_box_wins_over_width_and_height() {
        let resolution =
            resolve_markup(r#"<svg viewBox="0 0 300 150" width="10" height="20"></svg>"#).unwrap();
        assert_eq!(resolution, Resolution::new(300, 150));
    }

    #[test]
    fn test_view_box_is_truncated() {
        let resolution = resolve_markup(r#"<svg viewBox="0 0 99.9 10.5"/>"#).unwrap();
        assert_eq!(resolution, Resolution::new(99, 10));
    }

    #[test]
    fn test_view_box_with_commas_and_extra_spaces() {
        let resolution = resolve_markup(r#"<svg viewBox="0,0,  640,480"/>"#).unwrap();
        assert_eq!(resolution, Resolution::new(640, 480));
    }

    #[test]
    fn test_short_view_box_defaults_missing_tokens() {
        let resolution = resolve_markup(r#"<svg viewBox="0 0 120"/>"#).unwrap();
        assert_eq!(resolution, Resolution::new(120, 0));
    }

    #[test]
    fn test_width_and_height_attributes() {
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg" width="48px" height="32.7"/>"#;
        let resolution = resolve_markup(markup).unwrap();
        assert_eq!(resolution, Resolution::new(48, 32));
    }

    #[test]
    fn test_single_attribute_keeps_other_at_zero() {
        let resolution = resolve_markup(r#"<svg width="64"/>"#).unwrap();
        assert_eq!(resolution, Resolution::new(64, 0));
    }

    #[test]
    fn test_fallback_without_size() {
        assert_eq!(
            resolve_markup(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#).unwrap(),
            Resolution::square(200)
        );
    }

    #[test]
    fn test_fallback_for_empty_view_box() {
        assert_eq!(
            resolve_markup(r#"<svg viewBox="0 0 0 0"/>"#).unwrap(),
            Resolution::square(200)
        );
    }

    #[test]
    fn test_only_root_attributes_are_used() {
        let markup = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- exported -->
<svg>
  <svg viewBox="0 0 500 500"/>
  <rect width="10" height="10"/>
</svg>"#;
        assert_eq!(resolve_markup(markup).unwrap(), Resolution::square(200));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        assert_eq!(
            resolve_markup("\u{feff}<svg width=\"5\" height=\"6\"/>").unwrap(),
            Resolution::new(5, 6)
        );
    }

    #[test]
    fn test_malformed_markup() {
        for markup in [
            "<svg><g></svg>",
            "<svg>",
            "not xml at all",
            "",
            "<svg/><svg/>",
            "<svg></svg>trailing",
            r#"<svg width="1" width="2"/>"#,
        ] {
            assert!(
                matches!(resolve_markup(markup), Err(MediaError::MalformedMarkup { .. })),
                "expected malformed markup for {:?}",
                markup
            );
        }
    }

    #[test]
    fn test_parse_svg_length() {
        assert_eq!(parse_svg_length("300"), 300);
        assert_eq!(parse_svg_length(" 12.9 "), 12);
        assert_eq!(parse_svg_length("100%"), 100);
        assert_eq!(parse_svg_length(".5"), 0);
        assert_eq!(parse_svg_length("1e3"), 1000);
        assert_eq!(parse_svg_length("-40"), 0);
        assert_eq!(parse_svg_length("auto"), 0);
        assert_eq!(parse_svg_length(""), 0);
    }
}
