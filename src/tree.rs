//! Rendering of the directory tree as display lines.

use crate::engine::ScanSession;
use crate::types::Entry;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub(crate) const BRANCH: &str = "├── ";
pub(crate) const LAST_BRANCH: &str = "└── ";
pub(crate) const PIPE_INDENT: &str = "│   ";
pub(crate) const LAST_INDENT: &str = "    ";
pub(crate) const CONTENT_GUTTER: &str = "│   ";

/// A directory whose visible children are still being rendered.
struct Frame {
    entries: std::vec::IntoIter<Entry>,
    prefix: String,
    depth: usize,
    /// Resolved target when this directory was reached through a symlink.
    symlink_target: Option<PathBuf>,
}

/// Lazily rendered lines of a scan, in depth-first pre-order.
///
/// Directories are kept on an explicit stack instead of the call stack, so
/// very deep trees do not exhaust it. Each line is produced on demand; file
/// contents are read when their entry is reached.
///
/// The first line is always the root, `└── {name}/`.
pub struct StructureLines<'c> {
    session: ScanSession<'c>,
    pending: VecDeque<String>,
    stack: Vec<Frame>,
}

impl<'c> StructureLines<'c> {
    pub(crate) fn new(session: ScanSession<'c>) -> Self {
        let base_dir = session.base_dir().to_path_buf();
        let root_name = base_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut lines = Self {
            session,
            pending: VecDeque::from([format!("{LAST_BRANCH}{root_name}/")]),
            stack: Vec::new(),
        };
        lines.open_dir(&base_dir, String::new(), 0, None);
        lines
    }

    /// Lists `dir` and queues its visible children, or queues a marker line
    /// if it cannot be listed. Does nothing beyond the depth limit.
    fn open_dir(
        &mut self,
        dir: &Path,
        prefix: String,
        depth: usize,
        symlink_target: Option<PathBuf>,
    ) {
        if self
            .session
            .config()
            .max_depth
            .is_some_and(|max| depth > max)
        {
            self.close_symlink(symlink_target);
            return;
        }
        match list_dir(dir) {
            Ok(mut entries) => {
                entries.retain(|entry| !self.session.is_excluded(&entry.path, entry.is_dir));
                sort_entries(&mut entries);
                self.stack.push(Frame {
                    entries: entries.into_iter(),
                    prefix,
                    depth,
                    symlink_target,
                });
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::PermissionDenied | io::ErrorKind::NotFound
                ) =>
            {
                self.pending
                    .push_back(format!("{prefix}{LAST_BRANCH}[Permission denied]"));
                self.close_symlink(symlink_target);
            }
            Err(e) => {
                self.pending
                    .push_back(format!("{prefix}{LAST_BRANCH}[Error: {e}]"));
                self.close_symlink(symlink_target);
            }
        }
    }

    fn close_symlink(&mut self, symlink_target: Option<PathBuf>) {
        if let Some(target) = symlink_target {
            self.session.leave_symlink(&target);
        }
    }

    fn visit(&mut self, entry: Entry, prefix: &str, depth: usize, is_last: bool) {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let child_prefix = format!("{prefix}{}", if is_last { LAST_INDENT } else { PIPE_INDENT });
        self.pending
            .push_back(format!("{prefix}{connector}{}", format_entry(&entry)));

        let follow = !entry.is_symlink || self.session.config().follow_symlinks;
        if entry.is_dir && follow {
            let mut symlink_target = None;
            if entry.is_symlink {
                match self.session.enter_symlink(&entry.path) {
                    Some(target) => symlink_target = Some(target),
                    None => {
                        self.pending.push_back(format!(
                            "{child_prefix}{CONTENT_GUTTER}[Recursive symlink skipped]"
                        ));
                        return;
                    }
                }
            }
            self.open_dir(&entry.path, child_prefix, depth + 1, symlink_target);
        } else if entry.is_file && self.session.config().show_content {
            let content = self.session.inline_content(&entry.path, prefix, is_last);
            self.pending.extend(content);
        }
    }
}

impl Iterator for StructureLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            let frame = self.stack.last_mut()?;
            let Some(entry) = frame.entries.next() else {
                if let Some(done) = self.stack.pop() {
                    self.close_symlink(done.symlink_target);
                }
                continue;
            };
            let is_last = frame.entries.len() == 0;
            let prefix = frame.prefix.clone();
            let depth = frame.depth;
            self.visit(entry, &prefix, depth, is_last);
        }
    }
}

fn list_dir(dir: &Path) -> io::Result<Vec<Entry>> {
    fs::read_dir(dir)?
        .map(|entry| entry.and_then(Entry::from_dir_entry))
        .collect()
}

/// Directories first, then files; each group by name in codepoint order.
pub(crate) fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
}

/// A symlink renders as `name@ -> target` even when it points to a directory.
fn format_entry(entry: &Entry) -> String {
    let name = entry.display_name();
    if entry.is_symlink {
        match fs::read_link(&entry.path) {
            Ok(target) => format!("{name}@ -> {}", target.display()),
            Err(e) => format!("{name}@ -> [Error: {e}]"),
        }
    } else if entry.is_dir {
        format!("{name}/")
    } else {
        name.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn entry(name: &str, is_dir: bool) -> Entry {
        Entry {
            name: OsString::from(name),
            path: PathBuf::from(name),
            is_dir,
            is_file: !is_dir,
            is_symlink: false,
        }
    }

    #[test]
    fn test_sort_entries_dirs_first_then_codepoint() {
        let mut entries = vec![
            entry("zzz_file.txt", false),
            entry("b_dir", true),
            entry("Zeta.txt", false),
            entry("aaa_dir", true),
            entry("bbb_file.txt", false),
        ];
        sort_entries(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.display_name().into_owned()).collect();
        assert_eq!(
            names,
            vec!["aaa_dir", "b_dir", "Zeta.txt", "bbb_file.txt", "zzz_file.txt"]
        );
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(format_entry(&entry("src", true)), "src/");
        assert_eq!(format_entry(&entry("main.rs", false)), "main.rs");
    }
}
