use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::aspect_ratio::AspectRatio;
use super::media::MediaType;
use super::resolution::Resolution;
use crate::error::{MediaError, MediaResult};
use crate::storage_types::StorageType;

/// Facts about a locally stored file, gathered before the item is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileDetails {
    pub title: String,
    pub filename: String,
    pub media_type: MediaType,
    pub mime: Option<String>,
    pub size: Option<u64>,
    pub sharding_folder_name: Option<String>,
}

/// A file or movie reference held by the media library.
///
/// Width, height and aspect ratio are only written through [`MediaItem::set_resolution`]
/// so the three always agree; the aspect ratio has no setter of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    id: Uuid,
    folder_id: Uuid,
    user_id: i32,
    storage_type: StorageType,
    #[serde(rename = "type")]
    media_type: MediaType,
    mime: Option<String>,
    sharding_folder_name: Option<String>,
    url: String,
    title: String,
    size: Option<u64>,
    resolution: Option<Resolution>,
    aspect_ratio: Option<AspectRatio>,
    created_on: DateTime<Utc>,
    edited_on: DateTime<Utc>,
}

/// Replacement values for an existing item's editable fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MediaItemUpdate {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,
    pub folder_id: Uuid,
    pub user_id: i32,
    #[validate(length(min = 1, message = "Url must not be empty"))]
    pub url: String,
}

/// Flat row shape handed to and received from the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MediaItemRecord {
    pub id: Uuid,
    pub folder_id: Uuid,
    pub user_id: i32,
    pub storage_type: StorageType,
    pub media_type: MediaType,
    pub mime: Option<String>,
    pub sharding_folder_name: Option<String>,
    pub url: String,
    pub title: String,
    pub size: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub aspect_ratio: Option<AspectRatio>,
    pub created_on: DateTime<Utc>,
    pub edited_on: DateTime<Utc>,
}

impl MediaItem {
    fn new(
        title: String,
        url: String,
        media_type: MediaType,
        storage_type: StorageType,
        folder_id: Uuid,
        user_id: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            folder_id,
            user_id,
            storage_type,
            media_type,
            mime: None,
            sharding_folder_name: None,
            url,
            title,
            size: None,
            resolution: None,
            aspect_ratio: None,
            created_on: now,
            edited_on: now,
        }
    }

    /// Build an item for a file kept in local storage. The caller resolves the
    /// resolution separately and applies it with [`MediaItem::set_resolution`].
    pub fn from_local_file(details: LocalFileDetails, folder_id: Uuid, user_id: i32) -> Self {
        let mut item = Self::new(
            details.title,
            details.filename,
            details.media_type,
            StorageType::Local,
            folder_id,
            user_id,
        );
        item.mime = details.mime;
        item.size = details.size;
        item.sharding_folder_name = details.sharding_folder_name;
        item
    }

    /// Build an item referencing a movie hosted by `storage_type` under `movie_id`.
    pub fn from_movie(
        storage_type: StorageType,
        movie_id: impl Into<String>,
        movie_title: impl Into<String>,
        folder_id: Uuid,
        user_id: i32,
    ) -> Self {
        Self::new(
            movie_title.into(),
            movie_id.into(),
            MediaType::Movie,
            storage_type,
            folder_id,
            user_id,
        )
    }

    /// Rebuild an item from a stored row. The stored aspect ratio is ignored and
    /// derived again from width and height.
    pub fn from_record(record: MediaItemRecord) -> MediaResult<Self> {
        let width = record.width.map(u32::try_from).transpose();
        let height = record.height.map(u32::try_from).transpose();
        let (width, height) = match (width, height) {
            (Ok(width), Ok(height)) => (width, height),
            _ => {
                return Err(MediaError::InvalidInput(format!(
                    "Negative resolution stored for media item {}",
                    record.id
                )))
            }
        };
        let size = record
            .size
            .map(u64::try_from)
            .transpose()
            .map_err(|_| {
                MediaError::InvalidInput(format!(
                    "Negative size stored for media item {}",
                    record.id
                ))
            })?;

        let mut item = Self {
            id: record.id,
            folder_id: record.folder_id,
            user_id: record.user_id,
            storage_type: record.storage_type,
            media_type: record.media_type,
            mime: record.mime,
            sharding_folder_name: record.sharding_folder_name,
            url: record.url,
            title: record.title,
            size,
            resolution: Resolution::from_columns(width, height),
            aspect_ratio: None,
            created_on: record.created_on,
            edited_on: record.edited_on,
        };
        item.refresh_aspect_ratio();
        Ok(item)
    }

    pub fn to_record(&self) -> MediaResult<MediaItemRecord> {
        let too_large = |field: &str| {
            MediaError::InvalidInput(format!(
                "Media item {} {} does not fit in a database column",
                self.id, field
            ))
        };

        Ok(MediaItemRecord {
            id: self.id,
            folder_id: self.folder_id,
            user_id: self.user_id,
            storage_type: self.storage_type,
            media_type: self.media_type,
            mime: self.mime.clone(),
            sharding_folder_name: self.sharding_folder_name.clone(),
            url: self.url.clone(),
            title: self.title.clone(),
            size: self
                .size
                .map(i64::try_from)
                .transpose()
                .map_err(|_| too_large("size"))?,
            width: self
                .width()
                .map(i32::try_from)
                .transpose()
                .map_err(|_| too_large("width"))?,
            height: self
                .height()
                .map(i32::try_from)
                .transpose()
                .map_err(|_| too_large("height"))?,
            aspect_ratio: self.aspect_ratio,
            created_on: self.created_on,
            edited_on: self.edited_on,
        })
    }

    /// Replace title, folder, owner and url after validating the new values.
    pub fn apply_update(&mut self, update: MediaItemUpdate) -> MediaResult<()> {
        update.validate()?;

        self.title = update.title;
        self.folder_id = update.folder_id;
        self.user_id = update.user_id;
        self.url = update.url;
        Ok(())
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) -> &mut Self {
        self.resolution = Some(Resolution::new(width, height));
        self.refresh_aspect_ratio();
        self
    }

    /// Derive the aspect ratio from the current resolution.
    pub fn refresh_aspect_ratio(&mut self) {
        self.aspect_ratio = self.resolution.map(|resolution| resolution.aspect_ratio());
    }

    /// Call before the item is first stored.
    pub fn before_insert(&mut self) {
        let now = Utc::now();
        self.created_on = now;
        self.edited_on = now;
        self.refresh_aspect_ratio();
    }

    /// Call before changes to an already stored item are written.
    pub fn before_update(&mut self) {
        self.edited_on = Utc::now();
        self.refresh_aspect_ratio();
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn folder_id(&self) -> Uuid {
        self.folder_id
    }

    pub fn set_folder(&mut self, folder_id: Uuid) -> &mut Self {
        self.folder_id = folder_id;
        self
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    pub fn set_storage_type(&mut self, storage_type: StorageType) {
        self.storage_type = storage_type;
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn sharding_folder_name(&self) -> Option<&str> {
        self.sharding_folder_name.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `{sharding_folder}/{url}`; just the url when there is no sharding folder.
    pub fn full_url(&self) -> String {
        match self.sharding_folder_name.as_deref() {
            Some(folder) if !folder.is_empty() => format!("{}/{}", folder, self.url),
            _ => self.url.clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn width(&self) -> Option<u32> {
        self.resolution.map(|r| r.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.resolution.map(|r| r.height)
    }

    pub fn aspect_ratio(&self) -> Option<AspectRatio> {
        self.aspect_ratio
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn edited_on(&self) -> DateTime<Utc> {
        self.edited_on
    }
}
