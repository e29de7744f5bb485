use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;

/// A single child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The file name as returned by the directory listing.
    pub name: OsString,
    /// The full path, built lexically from the parent path.
    pub path: PathBuf,
    /// Whether the entry is a directory, following symlinks.
    ///
    /// Used for ordering and for deciding whether a followed symlink is descended into.
    pub is_dir: bool,
    /// Whether the entry is a regular file (never true for a symlink).
    pub is_file: bool,
    pub is_symlink: bool,
}

impl Entry {
    pub fn from_dir_entry(entry: fs::DirEntry) -> io::Result<Self> {
        let file_type = entry.file_type()?;
        let path = entry.path();
        let is_symlink = file_type.is_symlink();
        let is_dir = if is_symlink {
            path.is_dir()
        } else {
            file_type.is_dir()
        };
        Ok(Self {
            name: entry.file_name(),
            path,
            is_dir,
            is_file: file_type.is_file(),
            is_symlink,
        })
    }

    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }
}
