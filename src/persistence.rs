use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Transaction;

/// Key under which the whole transaction collection is stored
pub const STORAGE_KEY: &str = "transactions";

/// Durable mirror of the transaction collection
///
/// The store only ever calls these two operations. Each `save` replaces the
/// previously stored collection as a whole; there is no incremental write.
///
/// # Example
///
/// ```
/// use finance_tracker::persistence::{MemoryPersistence, PersistenceBackend};
///
/// let mut persistence = MemoryPersistence::new();
/// persistence.save(&[]).unwrap();
///
/// assert!(persistence.load().unwrap().is_empty());
/// ```
pub trait PersistenceBackend {
    /// Load the previously saved collection
    ///
    /// Returns an empty collection when nothing has been stored yet, and an
    /// error when stored data exists but cannot be parsed.
    fn load(&self) -> Result<Vec<Transaction>>;

    /// Serialize and write the entire collection, overwriting any prior value
    fn save(&mut self, transactions: &[Transaction]) -> Result<()>;
}

/// Persistence backed by a JSON file named after [`STORAGE_KEY`]
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a failed write leaves the previous contents intact.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Store transactions in `<dir>/transactions.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    /// Store transactions at an explicit file path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceBackend for JsonFilePersistence {
    fn load(&self) -> Result<Vec<Transaction>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(transactions)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

/// In-memory key-value persistence
///
/// Holds serialized text exactly like a browser's local storage would, which
/// makes it useful for tests and for sessions that should not touch disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryPersistence {
    entries: HashMap<String, String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `raw` under [`STORAGE_KEY`]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(STORAGE_KEY.to_string(), raw.into());
        Self { entries }
    }

    /// The serialized text currently stored, if any
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(STORAGE_KEY).map(String::as_str)
    }
}

impl PersistenceBackend for MemoryPersistence {
    fn load(&self) -> Result<Vec<Transaction>> {
        match self.raw() {
            Some(text) => Ok(serde_json::from_str(text)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(transactions)?;
        self.entries.insert(STORAGE_KEY.to_string(), json);
        Ok(())
    }
}
