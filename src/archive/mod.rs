//! Read-only archive abstraction.
//!
//! An export archive is a collection of named entries, each retrievable as
//! raw bytes or UTF-8 text, with lookup by exact name and by suffix.
//!
//! - [`Archive`] - the trait the resolver works against
//! - [`MemoryArchive`] - entries held in memory
//! - [`ZipArchive`] - a `.zip` file or buffer (requires `zip-archive`)
//!
//! Implementations are `Send + Sync`: attachment lookups for different
//! entries may run concurrently against one archive.

#[cfg(feature = "zip-archive")]
mod zip_archive;

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::{ChatzipError, Result};

#[cfg(feature = "zip-archive")]
pub use zip_archive::ZipArchive;

/// Name and uncompressed size of an archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Full entry path inside the archive, `/`-separated.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
}

impl ArchiveEntry {
    /// Creates an entry descriptor.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The last path component.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Returns `true` if the entry sits at the archive root.
    pub fn is_root(&self) -> bool {
        !self.name.contains('/')
    }
}

/// A read-only collection of named entries.
///
/// Only [`entries`](Archive::entries) and [`read_bytes`](Archive::read_bytes)
/// must be implemented; lookups are provided on top of them.
pub trait Archive: Send + Sync {
    /// All file entries in enumeration order. Directories are not listed.
    fn entries(&self) -> &[ArchiveEntry];

    /// Reads an entry's bytes by exact name.
    ///
    /// # Errors
    ///
    /// [`ChatzipError::Archive`] if the entry is unknown or cannot be read.
    fn read_bytes(&self, name: &str) -> Result<Vec<u8>>;

    /// Reads an entry as UTF-8 text.
    fn read_text(&self, name: &str) -> Result<String> {
        let bytes = self.read_bytes(name)?;
        String::from_utf8(bytes).map_err(|source| ChatzipError::Utf8 {
            context: format!("archive entry '{name}'"),
            source,
        })
    }

    /// Looks up an entry by exact name.
    fn entry(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries().iter().find(|e| e.name == name)
    }

    /// Entries whose name ends with `suffix`, in enumeration order.
    fn find_suffix(&self, suffix: &str) -> Vec<&ArchiveEntry> {
        self.entries()
            .iter()
            .filter(|e| e.name.ends_with(suffix))
            .collect()
    }

    /// Number of entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if the archive has no file entries.
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

pub(crate) fn unknown_entry(name: &str) -> ChatzipError {
    ChatzipError::archive(
        name,
        io::Error::new(io::ErrorKind::NotFound, "no such entry"),
    )
}

/// Archive whose entries live in memory.
///
/// Useful for tests and for callers that already hold the export's files.
///
/// # Example
///
/// ```
/// use chatzip::archive::{Archive, MemoryArchive};
///
/// let archive = MemoryArchive::new()
///     .with_entry("_chat.txt", "[1/1/20, 1:00 AM] Ann: hi")
///     .with_entry("media/IMG_001.jpg", vec![0xff, 0xd8]);
///
/// assert_eq!(archive.len(), 2);
/// assert_eq!(archive.read_text("_chat.txt")?, "[1/1/20, 1:00 AM] Ann: hi");
/// # Ok::<(), chatzip::ChatzipError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: Vec<ArchiveEntry>,
    data: Vec<Vec<u8>>,
}

impl MemoryArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any existing entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let name = name.into();
        let bytes = bytes.into();
        let size = bytes.len() as u64;

        if let Some(i) = self.entries.iter().position(|e| e.name == name) {
            self.entries[i].size = size;
            self.data[i] = bytes;
        } else {
            self.entries.push(ArchiveEntry::new(name, size));
            self.data.push(bytes);
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }
}

impl Archive for MemoryArchive {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| self.data[i].clone())
            .ok_or_else(|| unknown_entry(name))
    }
}
