//! JSON representation of a media item as consumed by the backend UI.

use crate::{StorageManager, StorageResult};
use medialib_core::MediaItem;
use serde_json::{json, Value as JsonValue};

/// Render `item` with its resolved web paths. `preview_filter` names the image
/// filter used for `preview_source`.
///
/// Besides the item fields the object carries a `"{type}": true` flag (e.g.
/// `"image": true`) so templates can branch on the media type directly.
pub fn media_item_json(
    item: &MediaItem,
    storage: &StorageManager,
    preview_filter: &str,
) -> StorageResult<JsonValue> {
    let source = storage.web_path(item, None)?;
    let preview_source = storage.web_path(item, Some(preview_filter))?;

    let mut value = json!({
        "id": item.id(),
        "folder": item.folder_id(),
        "userId": item.user_id(),
        "type": item.media_type().as_str(),
        "storageType": item.storage_type().as_str(),
        "mime": item.mime(),
        "shardingFolderName": item.sharding_folder_name(),
        "url": item.url(),
        "fullUrl": item.full_url(),
        "title": item.title(),
        "size": item.size(),
        "width": item.width(),
        "height": item.height(),
        "aspectRatio": item.aspect_ratio().map(|ratio| ratio.as_str()),
        "createdOn": item.created_on().timestamp(),
        "editedOn": item.edited_on().timestamp(),
        "source": source,
        "preview_source": preview_source,
        "direct_url": source,
    });

    if let Some(object) = value.as_object_mut() {
        object.insert(item.media_type().as_str().to_string(), JsonValue::Bool(true));
    }

    Ok(value)
}
