//! Filesystem access for sprig.
//!
//! The tree and the navigation logic never touch `std::fs` directly. They go through the
//! [FileSystem] trait so listings, reads and metadata queries can be swapped out in tests.
//! [LocalFs] is the real implementation.

use std::ffi::OsString;
use std::fs::{self, symlink_metadata};
use std::io;
use std::path::Path;

/// Kind of a filesystem entry as far as the tree is concerned.
///
/// Symlinks are never followed, a link to a directory is a [EntryKind::File].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    #[inline]
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }

    fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    name: OsString,
    kind: EntryKind,
}

impl DirEntryInfo {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        DirEntryInfo {
            name: name.into(),
            kind,
        }
    }

    #[inline]
    pub fn name(&self) -> &OsString {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Dotfiles on every platform.
    pub fn is_hidden(&self) -> bool {
        self.name.to_string_lossy().starts_with('.')
    }
}

/// The filesystem operations the tree and the navigation controller depend on.
pub trait FileSystem {
    /// Lists a directory in the order the platform returns its entries.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Reads a whole file.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns the kind of the entry at `path` without following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;
}

/// [FileSystem] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::with_capacity(64);

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let ft = match entry.file_type() {
                Ok(ft) => ft,
                Err(_) => continue,
            };
            entries.push(DirEntryInfo::new(
                entry.file_name(),
                EntryKind::from_file_type(ft),
            ));
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = symlink_metadata(path)?;
        Ok(EntryKind::from_file_type(metadata.file_type()))
    }
}

/// In-memory [FileSystem] used by unit tests across the crate.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[derive(Default)]
    pub(crate) struct MockFs {
        dirs: HashMap<PathBuf, Result<Vec<DirEntryInfo>, io::ErrorKind>>,
        files: HashMap<PathBuf, Result<Vec<u8>, io::ErrorKind>>,
        list_calls: Cell<usize>,
    }

    impl MockFs {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Registers a listable directory. Child directories need their own `dir` call.
        pub(crate) fn dir(mut self, path: &str, children: &[(&str, EntryKind)]) -> Self {
            let entries = children
                .iter()
                .map(|(name, kind)| DirEntryInfo::new(*name, *kind))
                .collect();
            self.dirs.insert(PathBuf::from(path), Ok(entries));
            self
        }

        pub(crate) fn failing_dir(mut self, path: &str, kind: io::ErrorKind) -> Self {
            self.dirs.insert(PathBuf::from(path), Err(kind));
            self
        }

        pub(crate) fn file(mut self, path: &str, content: &[u8]) -> Self {
            self.files.insert(PathBuf::from(path), Ok(content.to_vec()));
            self
        }

        pub(crate) fn failing_file(mut self, path: &str, kind: io::ErrorKind) -> Self {
            self.files.insert(PathBuf::from(path), Err(kind));
            self
        }

        pub(crate) fn list_calls(&self) -> usize {
            self.list_calls.get()
        }
    }

    impl FileSystem for MockFs {
        fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
            self.list_calls.set(self.list_calls.get() + 1);
            match self.dirs.get(path) {
                Some(Ok(entries)) => Ok(entries.clone()),
                Some(Err(kind)) => Err(io::Error::from(*kind)),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }

        fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
            match self.files.get(path) {
                Some(Ok(content)) => Ok(content.clone()),
                Some(Err(kind)) => Err(io::Error::from(*kind)),
                None if self.dirs.contains_key(path) => {
                    Err(io::Error::from(io::ErrorKind::IsADirectory))
                }
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }

        fn stat(&self, path: &Path) -> io::Result<EntryKind> {
            if self.dirs.contains_key(path) {
                Ok(EntryKind::Directory)
            } else if self.files.contains_key(path) {
                Ok(EntryKind::File)
            } else {
                Err(io::Error::from(io::ErrorKind::NotFound))
            }
        }
    }
}
