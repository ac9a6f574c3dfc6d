use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MediaError;

/// Media type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "media_item_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Movie,
    Audio,
    Document,
    Archive,
    Other,
}

impl MediaType {
    pub const ALL: [MediaType; 6] = [
        MediaType::Image,
        MediaType::Movie,
        MediaType::Audio,
        MediaType::Document,
        MediaType::Archive,
        MediaType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Movie => "movie",
            MediaType::Audio => "audio",
            MediaType::Document => "document",
            MediaType::Archive => "archive",
            MediaType::Other => "other",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Image)
    }

    pub fn is_movie(&self) -> bool {
        matches!(self, MediaType::Movie)
    }
}

impl FromStr for MediaType {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::ALL
            .into_iter()
            .find(|media_type| media_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MediaError::InvalidInput(format!("Invalid media type: {}", s)))
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for media_type in MediaType::ALL {
            assert_eq!(media_type.as_str().parse::<MediaType>().unwrap(), media_type);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("video".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_equality_is_by_value() {
        let a: MediaType = "Image".parse().unwrap();
        let b = MediaType::Image;
        assert_eq!(a, b);
        assert!(a.is_image());
        assert!(!a.is_movie());
    }
}
