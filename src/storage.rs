//! Flat-file persistence. Each collection (rooms, doctors) is one JSON array
//! on disk, read and written wholesale on every operation.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

pub struct JsonCollection<T> {
    path: PathBuf,
    _items: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonCollection {
            path: path.into(),
            _items: PhantomData,
        }
    }

    /// Creates the file holding an empty collection if it does not exist yet,
    /// along with any missing parent directories.
    pub fn ensure(&self) -> Result<()> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(dir) = self.path.parent() {
                    fs::create_dir_all(dir)?;
                }
                fs::write(&self.path, "[]")?;
                info!("created empty collection at {}", self.path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads the whole collection. A missing file is initialized first and
    /// reads as empty; unreadable content surfaces as a parse failure, not
    /// an I/O one.
    pub fn load(&self) -> Result<Vec<T>> {
        self.ensure()?;
        let data = fs::read_to_string(&self.path)?;
        let items = serde_json::from_str(&data)?;
        Ok(items)
    }

    /// Replaces the whole collection on disk. The bytes go to a sibling temp
    /// file first and are renamed over the target, so a crash mid-write
    /// leaves the previous contents intact.
    pub fn save(&self, items: &[T]) -> Result<()> {
        let data = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
