use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::MediaError;

/// Storage backend types
///
/// Where a media item lives. `Local` items are files managed by the library;
/// the other variants reference media hosted elsewhere, with the item's url
/// holding either an absolute URL (`External`) or a provider movie id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "media_item_storage_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Local,
    External,
    Youtube,
    Vimeo,
}

impl StorageType {
    pub const ALL: [StorageType; 4] = [
        StorageType::Local,
        StorageType::External,
        StorageType::Youtube,
        StorageType::Vimeo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Local => "local",
            StorageType::External => "external",
            StorageType::Youtube => "youtube",
            StorageType::Vimeo => "vimeo",
        }
    }

    /// Movie hosts whose items are referenced by id rather than stored.
    pub fn is_movie_host(&self) -> bool {
        matches!(self, StorageType::Youtube | StorageType::Vimeo)
    }
}

impl FromStr for StorageType {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(StorageType::Local),
            "external" => Ok(StorageType::External),
            "youtube" => Ok(StorageType::Youtube),
            "vimeo" => Ok(StorageType::Vimeo),
            _ => Err(MediaError::InvalidInput(format!(
                "Invalid storage type: {}",
                s
            ))),
        }
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
