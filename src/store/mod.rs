use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{seed_projects, seed_users, Project, User, ViewHistory};

pub mod reconcile;

/// Store key for the project collection.
pub const PROJECTS_KEY: &str = "investmentProjects";
/// Store key for the user collection.
pub const USERS_KEY: &str = "systemUsers";
/// Store key for the recently-viewed history.
pub const HISTORY_KEY: &str = "recentlyViewedProjects_v2";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no platform data directory available")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable string-keyed key-value store. Injected so tests can substitute
/// an in-memory fake for the on-disk implementation.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store used in tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-disk store keeping one JSON file per key.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at the platform data directory.
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "invest-tracker")
            .ok_or(StoreError::NoDataDir)?;
        Self::at(dirs.data_dir().to_path_buf())
    }

    /// Store rooted at an explicit directory.
    pub fn at(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Read a stored JSON array, tolerating absence and corruption. Anything
/// unreadable is logged and treated as absent so startup never fails on
/// bad persisted state.
fn read_array(store: &dyn KeyValueStore, key: &str) -> Option<Vec<Value>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "store read failed, falling back to defaults");
            return None;
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => Some(items),
        Ok(_) => {
            warn!(key, "stored value is not an array, falling back to defaults");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "stored value unparsable, falling back to defaults");
            None
        }
    }
}

/// Load the project collection, reconciling every record field-by-field.
/// Absent, empty or corrupted state yields the seed projects.
pub fn load_projects(store: &dyn KeyValueStore) -> Vec<Project> {
    match read_array(store, PROJECTS_KEY) {
        Some(items) if !items.is_empty() => items.iter().map(reconcile::project).collect(),
        _ => seed_projects(),
    }
}

/// Load the user collection; absent or empty state seeds the default
/// admin account.
pub fn load_users(store: &dyn KeyValueStore) -> Vec<User> {
    match read_array(store, USERS_KEY) {
        Some(items) if !items.is_empty() => items.iter().map(reconcile::user).collect(),
        _ => seed_users(),
    }
}

/// Load the recently-viewed history; anything unusable yields an empty
/// history. Entries whose id does not parse are dropped.
pub fn load_history(store: &dyn KeyValueStore) -> ViewHistory {
    let entries = read_array(store, HISTORY_KEY)
        .map(|items| items.iter().filter_map(reconcile::history_entry).collect())
        .unwrap_or_default();
    ViewHistory::new(entries)
}

pub fn save_projects(store: &mut dyn KeyValueStore, projects: &[Project]) -> Result<()> {
    let json = serde_json::to_string(projects)?;
    store.set(PROJECTS_KEY, &json)?;
    debug!(count = projects.len(), "saved project collection");
    Ok(())
}

pub fn save_users(store: &mut dyn KeyValueStore, users: &[User]) -> Result<()> {
    let json = serde_json::to_string(users)?;
    store.set(USERS_KEY, &json)?;
    debug!(count = users.len(), "saved user collection");
    Ok(())
}

pub fn save_history(store: &mut dyn KeyValueStore, history: &ViewHistory) -> Result<()> {
    let json = serde_json::to_string(history)?;
    store.set(HISTORY_KEY, &json)?;
    Ok(())
}
