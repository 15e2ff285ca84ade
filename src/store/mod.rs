//! Configuration store.
//!
//! # Data Flow
//! ```text
//! LineSource (file / memory)
//!     → load_line (one raw line)
//!     → parser::parse_line
//!     → recognized section name?  yes → add_section (new instance, new cursor)
//!                                 no  → add_key (into the cursor's key table)
//! ```
//!
//! # State Machine
//! ```text
//! Empty → Loading → Loaded
//! ```
//! `load_file` passes through `Loading`; a failed file still ends in `Loaded`
//! with whatever was read before the failure.
//!
//! # Design Decisions
//! - One coarse `RwLock` around the whole state; queries return owned clones
//! - `load_file` is append-only and best-effort; `reload` is all-or-nothing
//! - Repeated section headers open distinct instances, never merge

pub mod error;
pub mod model;
pub mod source;

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::parser::{parse_line, Record};

pub use error::{StoreError, StoreResult};
pub use model::{KeyTable, Model};
pub use source::{FileSource, LineSource, MemorySource};

use model::Cursor;

/// Section name used for keys that appear before any recognized header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Load progress of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreState {
    /// Nothing has been loaded yet.
    #[default]
    Empty,
    /// A `load_file` call is feeding lines.
    Loading,
    /// At least one line or file has been processed.
    Loaded,
}

/// Paths fed by one `load_file` call and the section names in effect for it.
#[derive(Debug, Clone)]
struct Batch {
    recognized: Vec<String>,
    paths: Vec<PathBuf>,
}

/// Everything guarded by the store lock.
#[derive(Debug, Clone, Default)]
struct Inner {
    /// Caller-supplied names only; the implicit default is tracked apart.
    recognized: Vec<String>,
    default_opened: bool,
    model: Model,
    cursor: Option<Cursor>,
    batches: Vec<Batch>,
    state: StoreState,
}

impl Inner {
    fn is_section(&self, name: &str) -> bool {
        self.recognized.iter().any(|s| s == name)
            || (self.default_opened && name == DEFAULT_SECTION)
    }

    fn load_line(&mut self, raw: &str) {
        let Some(record) = parse_line(raw) else {
            return;
        };
        if self.state == StoreState::Empty {
            self.state = StoreState::Loaded;
        }

        if self.is_section(record.name()) {
            let name = record.name().to_string();
            self.add_section(&name, record);
        } else {
            self.add_key(record);
        }
    }

    fn add_section(&mut self, section: &str, record: Record) {
        let cursor = self.model.open_section(section, record);
        tracing::debug!(section = %section, index = cursor.index, "Opened section");
        self.cursor = Some(cursor);
    }

    fn add_key(&mut self, record: Record) {
        let cursor = match &self.cursor {
            Some(cursor) => cursor.clone(),
            None => {
                self.default_opened = true;
                let cursor = self
                    .model
                    .open_section(DEFAULT_SECTION, Record::new(DEFAULT_SECTION));
                tracing::debug!(key = %record.name(), "Key before any section, using default section");
                self.cursor = Some(cursor.clone());
                cursor
            }
        };
        self.model.push_key(&cursor, record);
    }

    fn load_reader<R: BufRead>(&mut self, reader: R) -> std::io::Result<()> {
        for line in source::decode_lines(reader) {
            self.load_line(&line?);
        }
        Ok(())
    }

    fn source_paths(&self) -> Vec<PathBuf> {
        self.batches
            .iter()
            .flat_map(|batch| batch.paths.iter().cloned())
            .collect()
    }

    /// Build a new state by replaying `batches`, each with its own section
    /// names, then adopt `recognized` as the current name set.
    fn replay(
        source: &dyn LineSource,
        batches: &[Batch],
        recognized: Vec<String>,
    ) -> StoreResult<Self> {
        let mut fresh = Self::default();
        for batch in batches {
            fresh.recognized = batch.recognized.clone();
            fresh.batches.push(batch.clone());
            fresh.state = StoreState::Loading;
            for path in &batch.paths {
                feed_path(source, path, |line| fresh.load_line(line))?;
            }
            fresh.state = StoreState::Loaded;
        }
        fresh.recognized = recognized;
        Ok(fresh)
    }
}

/// Open `path` through `source` and hand each line to `feed`.
fn feed_path(
    source: &dyn LineSource,
    path: &Path,
    mut feed: impl FnMut(&str),
) -> StoreResult<()> {
    let read_error = |err| StoreError::Read {
        path: path.to_path_buf(),
        source: err,
    };

    let lines = source.open(path).map_err(read_error)?;
    let mut count = 0usize;
    for line in lines {
        feed(&line.map_err(read_error)?);
        count += 1;
    }

    tracing::info!(path = %path.display(), lines = count, "Loaded config file");
    Ok(())
}

/// A haproxy-style configuration held in memory.
///
/// All methods take `&self`; share the store with `Arc<ConfigStore>`. The lock
/// keeps individual calls memory-safe, but interleaving loads from several
/// threads still needs outside coordination.
#[derive(Debug)]
pub struct ConfigStore {
    inner: RwLock<Inner>,
    source: Arc<dyn LineSource>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create an empty store reading from the filesystem.
    pub fn new() -> Self {
        Self::with_source(Arc::new(FileSource))
    }

    /// Create an empty store that opens paths through `source`.
    pub fn with_source(source: Arc<dyn LineSource>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            source,
        }
    }

    /// Create an empty filesystem-backed store with recognized section names.
    pub fn with_sections<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store.set_recognized_sections(names);
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("config store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("config store lock poisoned")
    }

    /// Add names whose lines open a new section. Duplicates are harmless.
    pub fn set_recognized_sections<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write()
            .recognized
            .extend(names.into_iter().map(Into::into));
    }

    pub fn recognized_sections(&self) -> Vec<String> {
        self.read().recognized.clone()
    }

    /// Paths passed to `load_file` so far, in order.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.read().source_paths()
    }

    /// Current load progress. `Loading` is visible to other threads while a
    /// `load_file` call is between lines.
    pub fn state(&self) -> StoreState {
        self.read().state
    }

    /// Parse one raw line and file it as a section header or a key.
    ///
    /// Blank and comment-only lines are ignored.
    pub fn load_line(&self, raw: &str) {
        self.write().load_line(raw);
    }

    /// Feed every line of `reader`. Lines read before an I/O error stay loaded.
    pub fn load_reader<R: BufRead>(&self, reader: R) -> std::io::Result<()> {
        self.write().load_reader(reader)
    }

    /// Open a new instance of `section` headed by `record`.
    pub fn add_section(&self, section: &str, record: Record) {
        self.write().add_section(section, record);
    }

    /// Add a key to the most recently opened section instance.
    ///
    /// Opens the `DEFAULT` section first if nothing has been opened yet.
    pub fn add_key(&self, record: Record) {
        self.write().add_key(record);
    }

    /// Load files in order.
    ///
    /// Stops at the first file that cannot be opened or read; lines from
    /// earlier files (and from the failing file before the error) are kept.
    /// The lock is taken per line, so readers may observe a partial load.
    pub fn load_file<I, P>(&self, paths: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        {
            let mut inner = self.write();
            let batch = Batch {
                recognized: inner.recognized.clone(),
                paths: paths.clone(),
            };
            inner.batches.push(batch);
            inner.state = StoreState::Loading;
        }

        let result = paths.iter().try_for_each(|path| {
            feed_path(self.source.as_ref(), path, |line| self.write().load_line(line))
        });
        self.write().state = StoreState::Loaded;

        if let Err(e) = &result {
            tracing::error!(error = %e, "Config load stopped");
        }
        result
    }

    /// Rebuild from the recorded source paths and swap the result in.
    ///
    /// Each earlier `load_file` call is replayed with the section names that
    /// were recognized when it ran. On failure the current contents are left
    /// untouched.
    pub fn reload(&self) -> StoreResult<()> {
        let (recognized, batches) = {
            let inner = self.read();
            (inner.recognized.clone(), inner.batches.clone())
        };

        let fresh = match Inner::replay(self.source.as_ref(), &batches, recognized) {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!(error = %e, "Reload failed, keeping current configuration");
                return Err(e);
            }
        };

        let files = fresh.batches.iter().map(|batch| batch.paths.len()).sum::<usize>();
        *self.write() = fresh;
        tracing::info!(files, "Configuration reloaded");
        Ok(())
    }

    /// A consistent copy of every section and key table.
    pub fn snapshot(&self) -> Model {
        self.read().model.clone()
    }

    pub fn all_sections(&self) -> BTreeMap<String, Vec<Record>> {
        self.read().model.sections().clone()
    }

    pub fn section(&self, name: &str) -> StoreResult<Vec<Record>> {
        self.read().model.section(name).map(<[Record]>::to_vec)
    }

    pub fn section_at(&self, name: &str, index: usize) -> StoreResult<Record> {
        self.read().model.section_at(name, index).cloned()
    }

    pub fn key_tables(&self, name: &str) -> StoreResult<Vec<KeyTable>> {
        self.read().model.key_tables(name).map(<[KeyTable]>::to_vec)
    }

    pub fn key_table_at(&self, name: &str, index: usize) -> StoreResult<KeyTable> {
        self.read().model.key_table_at(name, index).cloned()
    }
}
