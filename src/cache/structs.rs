use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Snapshot;
use crate::errors::cache_context;

/// File-based store for the snapshot and the other JSON artifacts
pub struct Cache {
    data_dir: PathBuf,
}

impl Cache {
    /// Create a new cache instance, creating the directory if needed
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(Self { data_dir })
    }

    /// Save data as pretty JSON, replacing any previous file in one rename
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_path(key);
        let temp_path = file_path.with_extension("json.tmp");

        let mut json = serde_json::to_string_pretty(data).with_context(|| cache_context("serialize", key))?;
        json.push('\n');

        fs::write(&temp_path, json).with_context(|| cache_context("write", key))?;
        fs::rename(&temp_path, &file_path).with_context(|| cache_context("replace", key))?;

        info!("Saved data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load data from cache
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_path(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path).with_context(|| cache_context("read", key))?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!("Loaded data from cache: {}", file_path.display());
        Ok(Some(data))
    }

    /// Check if cached data exists
    pub fn exists(&self, key: &str) -> bool {
        self.build_path(key).exists()
    }

    pub fn load_snapshot(&self, key: &str) -> Result<Option<Snapshot>> {
        self.load(key)
    }

    pub fn save_snapshot(&self, key: &str, snapshot: &Snapshot) -> Result<()> {
        self.save(key, snapshot)
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.build_path(key)
    }

    fn build_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: String,
    }

    #[test]
    fn test_cache_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path().join("nested/data")).unwrap();

        let data = TestData {
            value: "test".to_string(),
        };

        cache.save("test_key", &data).unwrap();
        let loaded: Option<TestData> = cache.load("test_key").unwrap();

        assert_eq!(loaded, Some(data));
        assert!(!cache.path("test_key").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_saved_file_is_pretty_with_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path()).unwrap();

        cache.save("pretty", &TestData { value: "x".into() }).unwrap();
        let text = fs::read_to_string(cache.path("pretty")).unwrap();

        assert_eq!(text, "{\n  \"value\": \"x\"\n}\n");
    }

    #[test]
    fn test_missing_key_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(temp_dir.path()).unwrap();

        let loaded: Option<TestData> = cache.load("absent").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("absent"));
    }
}
