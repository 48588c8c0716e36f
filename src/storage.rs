use crate::config::AppConfig;
use crate::error::StoreError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A key-value preference store holding opaque byte blobs.
pub trait PreferenceStore {
    /// Returns the blob stored under `key`, or `None` when the key is absent.
    fn data(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrites the blob stored under `key`.
    fn set_data(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// Preference store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    dir: PathBuf,
}

impl FilePreferences {
    /// Opens the store in the directory chosen by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let data_dir = config.data_dir().ok_or(StoreError::NoDataDirectory)?;
        Self::open(data_dir)
    }

    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("Using preference directory {}", dir.display());
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl PreferenceStore for FilePreferences {
    fn data(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn set_data(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        // Write beside the target and rename so a crash never leaves half a blob.
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Preference store living only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, Vec<u8>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn data(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_data(&mut self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}
