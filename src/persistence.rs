//! Stats storage backends
//!
//! Storage is injected into the session so tests can run against an
//! in-memory fake. All I/O is best-effort; callers log failures and move on.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Storage collaborator for the persisted stats record.
pub trait StatsStore {
    /// Read the raw JSON record, if one exists.
    fn read(&self) -> io::Result<Option<String>>;
    /// Overwrite the record wholesale.
    fn write(&self, json: &str) -> io::Result<()>;
}

/// Stats persisted to a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsStore for JsonFileStore {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, json: &str) -> io::Result<()> {
        fs::write(&self.path, json)
    }
}

/// In-memory store for tests. Clones share the same record.
#[derive(Clone, Default)]
pub struct MemoryStore {
    record: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStore {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.record.borrow().clone())
    }

    fn write(&self, json: &str) -> io::Result<()> {
        *self.record.borrow_mut() = Some(json.to_string());
        Ok(())
    }
}
