//! Test helpers: temporary upload directories populated with fixture files.
//!
//! Run from workspace root: `cargo test -p medialib-processing --test media_item_test`.

pub mod fixtures;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary upload root with a single sharding folder.
pub struct UploadDir {
    _root: TempDir,
    shard: PathBuf,
}

impl UploadDir {
    pub fn new(sharding_folder: &str) -> Self {
        let root = TempDir::new().expect("create temp dir");
        let shard = root.path().join(sharding_folder);
        fs::create_dir_all(&shard).expect("create sharding folder");
        Self { _root: root, shard }
    }

    /// Write `content` into the sharding folder and return its path.
    pub fn write(&self, filename: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.shard.join(filename);
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn write_jpeg(&self, filename: &str, width: u32, height: u32) -> PathBuf {
        self.write(filename, fixtures::create_test_jpeg(width, height))
    }

    pub fn write_png(&self, filename: &str, width: u32, height: u32) -> PathBuf {
        self.write(filename, fixtures::create_test_png(width, height))
    }
}
