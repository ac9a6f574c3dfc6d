#[cfg(feature = "storage-local")]
use crate::LocalStorageProvider;
#[cfg(feature = "storage-remote")]
use crate::{ExternalStorageProvider, VimeoStorageProvider, YoutubeStorageProvider};
use crate::{StorageError, StorageProvider, StorageResult, StorageType};
use medialib_core::{MediaItem, MediaLibraryConfig};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry dispatching media items to the provider of their storage type.
#[derive(Clone, Default)]
pub struct StorageManager {
    providers: HashMap<StorageType, Arc<dyn StorageProvider>>,
}

impl StorageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any previous one for the same storage type.
    pub fn register(&mut self, provider: Arc<dyn StorageProvider>) -> &mut Self {
        let storage_type = provider.storage_type();
        if self.providers.insert(storage_type, provider).is_some() {
            tracing::debug!(storage_type = %storage_type, "Replaced storage provider");
        }
        self
    }

    pub fn provider(&self, storage_type: StorageType) -> StorageResult<&dyn StorageProvider> {
        self.providers
            .get(&storage_type)
            .map(|provider| provider.as_ref())
            .ok_or(StorageError::ProviderNotRegistered(storage_type))
    }

    pub fn provider_for(&self, item: &MediaItem) -> StorageResult<&dyn StorageProvider> {
        self.provider(item.storage_type())
    }

    /// Web path of an item, through `filter` when its provider supports filtered
    /// variants and plain otherwise.
    pub fn web_path(&self, item: &MediaItem, filter: Option<&str>) -> StorageResult<String> {
        let provider = self.provider_for(item)?;
        Ok(filter
            .and_then(|filter| provider.web_path_with_filter(item, filter))
            .unwrap_or_else(|| provider.web_path(item)))
    }

    /// Thumbnail of an item, through `filter` when supported.
    pub fn thumbnail(
        &self,
        item: &MediaItem,
        filter: Option<&str>,
    ) -> StorageResult<Option<String>> {
        let provider = self.provider_for(item)?;
        Ok(filter
            .and_then(|filter| provider.web_path_with_filter(item, filter))
            .or_else(|| provider.thumbnail(item)))
    }

    pub fn absolute_path(&self, item: &MediaItem) -> StorageResult<String> {
        Ok(self.provider_for(item)?.absolute_path(item))
    }

    pub fn absolute_web_path(&self, item: &MediaItem) -> StorageResult<String> {
        Ok(self.provider_for(item)?.absolute_web_path(item))
    }

    pub fn link_html(&self, item: &MediaItem) -> StorageResult<String> {
        Ok(self.provider_for(item)?.link_html(item))
    }

    pub fn include_html(&self, item: &MediaItem) -> StorageResult<String> {
        Ok(self.provider_for(item)?.include_html(item))
    }
}

/// Create a storage manager with every provider enabled at compile time
pub fn create_storage_manager(config: &MediaLibraryConfig) -> StorageResult<StorageManager> {
    let mut manager = StorageManager::new();

    #[cfg(feature = "storage-local")]
    {
        let local = LocalStorageProvider::new(
            config.local_storage_path.clone(),
            config.local_storage_base_url.clone(),
            config.site_url.clone(),
            config.filter_cache_base_url.clone(),
        )?;
        manager.register(Arc::new(local));
    }

    #[cfg(feature = "storage-remote")]
    {
        manager
            .register(Arc::new(ExternalStorageProvider))
            .register(Arc::new(YoutubeStorageProvider))
            .register(Arc::new(VimeoStorageProvider));
    }

    #[cfg(not(feature = "storage-local"))]
    let _ = config;

    tracing::debug!(
        providers = manager.providers.len(),
        "Storage providers registered"
    );

    Ok(manager)
}
