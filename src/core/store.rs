//! Data directory - flat JSON files, one array per record type
//!
//! Every read-modify-write goes through [`DataDir::update`], which holds the
//! directory's write lock for the whole load, mutate, save sequence. Cloned
//! handles share the same lock.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::core::entity::Record;

/// File whose presence marks an initialized data directory
const MARKER_FILE: &str = "users.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No data directory at {0}. Run 'carangos init' first")]
    NotInitialized(PathBuf),

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize {name} records: {message}")]
    Serialize { name: &'static str, message: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Handle on the data directory
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl DataDir {
    /// Open an existing, initialized data directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.join(MARKER_FILE).is_file() {
            return Err(StoreError::NotInitialized(root));
        }
        Ok(Self::at(root))
    }

    /// Create the directory if needed and return a handle on it
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self::at(root))
    }

    fn at(root: PathBuf) -> Self {
        Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the directory has been initialized
    pub fn is_initialized(&self) -> bool {
        self.root.join(MARKER_FILE).is_file()
    }

    /// Path of the file backing a record type
    pub fn path_of<R: Record>(&self) -> PathBuf {
        self.root.join(R::FILE)
    }

    /// Load every record of a type; a missing file is an empty collection
    pub fn load<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let path = self.path_of::<R>();
        if !path.exists() {
            tracing::debug!(file = R::FILE, "no file yet, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<R> = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(file = R::FILE, count = records.len(), "loaded records");
        Ok(records)
    }

    /// Replace the stored collection of a type
    ///
    /// Writes to a sibling temp file and renames it over the target.
    pub fn save<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let path = self.path_of::<R>();
        let content =
            serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialize {
                name: R::NAME,
                message: e.to_string(),
            })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;
        tracing::debug!(file = R::FILE, count = records.len(), "saved records");
        Ok(())
    }

    /// Load, mutate and save a collection while holding the write lock
    ///
    /// Nothing is written when `f` fails.
    pub fn update<R, T, E, F>(&self, f: F) -> Result<T, E>
    where
        R: Record,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<R>) -> Result<T, E>,
    {
        let _guard = self.write_lock.lock();
        let mut records = self.load::<R>()?;
        let out = f(&mut records)?;
        self.save(&records)?;
        Ok(out)
    }

    /// Like [`DataDir::update`], for changes that span two record types
    ///
    /// Both collections are saved only when `f` succeeds.
    pub fn update_pair<A, B, T, E, F>(&self, f: F) -> Result<T, E>
    where
        A: Record,
        B: Record,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<A>, &mut Vec<B>) -> Result<T, E>,
    {
        let _guard = self.write_lock.lock();
        let mut first = self.load::<A>()?;
        let mut second = self.load::<B>()?;
        let out = f(&mut first, &mut second)?;
        self.save(&first)?;
        self.save(&second)?;
        Ok(out)
    }
}

/// Find a record by its natural key
pub fn find_by_key<'a, R: Record>(records: &'a [R], key: &str) -> Option<&'a R> {
    records.iter().find(|r| r.key() == key)
}
