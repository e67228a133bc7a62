//! Persistence of the entry history.
//!
//! The history lives as one JSON array serialized into a single string under
//! a fixed key of a key-value string store. The aggregator only needs
//! [`EntryStore`]; the concrete layering is:
//!
//! - [`KeyValueStore`]: string blobs by key ([`MemoryKeyValue`],
//!   [`FileKeyValue`]).
//! - [`KeyedEntryStore`]: an [`EntryStore`] on top of any key-value store.
//! - [`MemoryStore`]: a plain in-memory [`EntryStore`].
//!
//! Reading never fails. A missing key, an unreadable file or a blob that is
//! not a JSON array all read as an empty history.
use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
};

use serde_json::value::RawValue;

use crate::{EngineError, ExpenseEntry, ResultEngine};

/// Key under which the history is stored by default.
pub const DEFAULT_STORE_KEY: &str = "expenses_v1";

/// Capability to append to and read back the ordered entry history.
pub trait EntryStore {
    /// Appends `entry` at the end of the history.
    fn append(&mut self, entry: ExpenseEntry) -> ResultEngine<()>;

    /// Returns the whole history in insertion order.
    fn load_all(&self) -> Vec<ExpenseEntry>;
}

/// A string store addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ResultEngine<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> ResultEngine<()>;
}

/// Key-value store kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryKeyValue {
    values: BTreeMap<String, String>,
}

impl MemoryKeyValue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValue {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ResultEngine<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store persisted as one JSON object in a file.
///
/// A missing file is an empty store. Parent directories are created on the
/// first write.
#[derive(Clone, Debug)]
pub struct FileKeyValue {
    path: PathBuf,
}

impl FileKeyValue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> ResultEngine<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileKeyValue {
    fn get(&self, key: &str) -> ResultEngine<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> ResultEngine<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// Outcome of reading the history blob.
///
/// Elements stay as their stored JSON text so that appending never rewrites
/// what is already there.
enum Blob {
    Missing,
    Elements(Vec<Box<RawValue>>),
    Unreadable(String),
}

/// [`EntryStore`] serializing the history under one key of a
/// [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct KeyedEntryStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> KeyedEntryStore<K> {
    /// Stores the history under [`DEFAULT_STORE_KEY`].
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STORE_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Gives back the underlying key-value store.
    pub fn into_inner(self) -> K {
        self.kv
    }

    fn read_blob(&self) -> Blob {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Blob::Missing,
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    "cannot read entry store, using empty history: {err}"
                );
                return Blob::Missing;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(elements) => Blob::Elements(elements),
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    "stored history is not a JSON array, using empty history: {err}"
                );
                Blob::Unreadable(raw)
            }
        }
    }
}

impl<K: KeyValueStore> EntryStore for KeyedEntryStore<K> {
    fn append(&mut self, entry: ExpenseEntry) -> ResultEngine<()> {
        let mut elements = match self.read_blob() {
            Blob::Missing => Vec::new(),
            Blob::Elements(elements) => elements,
            Blob::Unreadable(raw) => {
                let backup = format!("{}.corrupt", self.key);
                tracing::warn!(%backup, "moving unreadable history aside before writing");
                self.kv.set(&backup, raw)?;
                Vec::new()
            }
        };
        let existing: Vec<ExpenseEntry> = elements.iter().map(|raw| read_entry(raw)).collect();
        ensure_appendable(&existing, &entry)?;

        tracing::info!(id = %entry.id, category = entry.category_key(), "appending entry");
        elements.push(serde_json::value::to_raw_value(&entry)?);
        let payload = serde_json::to_string(&elements)?;
        self.kv.set(&self.key, payload)
    }

    fn load_all(&self) -> Vec<ExpenseEntry> {
        match self.read_blob() {
            Blob::Elements(elements) => elements.iter().map(|raw| read_entry(raw)).collect(),
            Blob::Missing | Blob::Unreadable(_) => Vec::new(),
        }
    }
}

/// [`EntryStore`] kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Vec<ExpenseEntry>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<ExpenseEntry> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = ExpenseEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl EntryStore for MemoryStore {
    fn append(&mut self, entry: ExpenseEntry) -> ResultEngine<()> {
        ensure_appendable(&self.entries, &entry)?;
        self.entries.push(entry);
        Ok(())
    }

    fn load_all(&self) -> Vec<ExpenseEntry> {
        self.entries.clone()
    }
}

/// Typed view of one stored element. Elements that are not entry-shaped
/// still count, as empty entries.
fn read_entry(raw: &RawValue) -> ExpenseEntry {
    serde_json::from_str(raw.get()).unwrap_or_default()
}

/// Entries need a non-blank id that is not already in the history.
fn ensure_appendable(entries: &[ExpenseEntry], entry: &ExpenseEntry) -> ResultEngine<()> {
    if entry.id.trim().is_empty() {
        return Err(EngineError::InvalidEntry("entry id is empty".to_string()));
    }
    if entries.iter().any(|existing| existing.id == entry.id) {
        return Err(EngineError::InvalidEntry(format!(
            "entry \"{}\" already present",
            entry.id
        )));
    }
    Ok(())
}
