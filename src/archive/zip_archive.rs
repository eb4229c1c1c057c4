//! `.zip` backed [`Archive`].

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek};
use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, trace};

use super::{Archive, ArchiveEntry, unknown_entry};
use crate::error::{ChatzipError, Result};

/// Most bytes reserved up front from the size an entry header declares.
/// Larger entries grow the buffer as data is actually decompressed.
const MAX_PREALLOC: u64 = 8 * 1024 * 1024;

/// A zip archive opened for reading.
///
/// The central directory is read once on construction. Entry data is
/// decompressed on demand; the underlying reader sits behind a mutex so the
/// archive can be shared between threads.
///
/// # Example
///
/// ```rust,no_run
/// use chatzip::archive::{Archive, ZipArchive};
///
/// let archive = ZipArchive::open("WhatsApp Chat - Ann.zip")?;
/// for entry in archive.entries() {
///     println!("{} ({} bytes)", entry.name, entry.size);
/// }
/// # Ok::<(), chatzip::ChatzipError>(())
/// ```
pub struct ZipArchive<R> {
    inner: Mutex<::zip::ZipArchive<R>>,
    entries: Vec<ArchiveEntry>,
    /// Index into the zip central directory for each entry.
    indices: Vec<usize>,
}

impl ZipArchive<BufReader<File>> {
    /// Opens a `.zip` file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::new(BufReader::new(file))
    }
}

impl ZipArchive<Cursor<Vec<u8>>> {
    /// Reads a `.zip` held in memory (e.g. downloaded bytes).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> ZipArchive<R> {
    /// Reads the central directory from `reader`.
    pub fn new(reader: R) -> Result<Self> {
        let mut zip = ::zip::ZipArchive::new(reader)?;

        let mut entries = Vec::with_capacity(zip.len());
        let mut indices = Vec::with_capacity(zip.len());

        for i in 0..zip.len() {
            let file = zip.by_index_raw(i)?;
            if file.is_dir() {
                continue;
            }
            entries.push(ArchiveEntry::new(file.name(), file.size()));
            indices.push(i);
        }

        debug!(entries = entries.len(), "opened zip archive");

        Ok(Self {
            inner: Mutex::new(zip),
            entries,
            indices,
        })
    }
}

impl<R: Read + Seek + Send> Archive for ZipArchive<R> {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| unknown_entry(name))?;

        let mut zip = self
            .inner
            .lock()
            .map_err(|_| ChatzipError::archive(name, io::Error::other("archive lock poisoned")))?;

        let mut file = zip
            .by_index(self.indices[pos])
            .map_err(|e| ChatzipError::archive(name, io::Error::other(e)))?;

        let mut buf = Vec::with_capacity(self.entries[pos].size.min(MAX_PREALLOC) as usize);
        file.read_to_end(&mut buf)
            .map_err(|e| ChatzipError::archive(name, e))?;

        trace!(entry = name, bytes = buf.len(), "read zip entry");
        Ok(buf)
    }
}

impl<R> std::fmt::Debug for ZipArchive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipArchive")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
