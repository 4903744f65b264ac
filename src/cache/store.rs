// Durable cache tier.
// String-keyed storage that survives restarts, plus the JSON record format stored in it.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::RawResult;

use super::paths;

/// Stored form of one cache entry: `{"timestamp": <epoch millis>, "data": [..]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DurableRecord {
    pub timestamp: i64,
    pub data: Vec<RawResult>,
}

/// Process-external key/value storage for the durable tier.
///
/// `read` returns `Ok(None)` for a key that was never written or was removed.
pub trait DurableStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DurableStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let path = paths::entry_path(&self.dir, key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = paths::entry_path(&self.dir, key);

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        let path = paths::entry_path(&self.dir, key);
        match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_dir_all(&self.dir) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-process stand-in for the durable tier.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.values.clear();
        Ok(())
    }
}
