//! Line sources backing `ConfigStore::load_file`.
//!
//! # Responsibilities
//! - Turn a path into an ordered stream of text lines
//! - Surface open and read failures as `io::Error`
//!
//! # Design Decisions
//! - The store only sees the `LineSource` trait, so tests and embedders can
//!   feed text without touching the filesystem
//! - Lines are yielded lazily; a read error ends the stream for that path
//! - Bytes are decoded per line with lossy UTF-8, so a stray Latin-1 byte
//!   becomes U+FFFD instead of failing the file

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Boxed iterator of lines produced by a source.
pub type Lines<'a> = Box<dyn Iterator<Item = io::Result<String>> + Send + 'a>;

/// Something that can produce the lines of a named file.
pub trait LineSource: Send + Sync + std::fmt::Debug {
    /// Open `path` and return its lines in order.
    fn open(&self, path: &Path) -> io::Result<Lines<'_>>;
}

/// Reads lines from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl LineSource for FileSource {
    fn open(&self, path: &Path) -> io::Result<Lines<'_>> {
        let file = File::open(path)?;
        Ok(Box::new(decode_lines(BufReader::new(file))))
    }
}

/// Split `reader` on `\n`, dropping a trailing `\r` and decoding lossily.
///
/// Only genuine I/O failures are reported as errors.
pub fn decode_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    })
}

/// Serves lines from in-memory documents keyed by path.
///
/// Documents can be replaced or removed at any time, which makes it handy
/// for exercising reloads.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: RwLock<HashMap<PathBuf, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document served for `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents
            .write()
            .expect("memory source lock poisoned")
            .insert(path.into(), text.into());
    }

    /// Remove a document; later opens of `path` fail with `NotFound`.
    pub fn remove(&self, path: &Path) {
        self.documents
            .write()
            .expect("memory source lock poisoned")
            .remove(path);
    }
}

impl LineSource for MemorySource {
    fn open(&self, path: &Path) -> io::Result<Lines<'_>> {
        let documents = self.documents.read().expect("memory source lock poisoned");
        let text = documents.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no document for {}", path.display()),
            )
        })?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        Ok(Box::new(lines.into_iter().map(Ok::<String, io::Error>)))
    }
}
