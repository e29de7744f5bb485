use crate::error::DiraiError;
use crate::matcher::PatternMatcher;
use crate::options::{BinaryDetection, ScanConfig};
use crate::redact::Redactor;
use crate::tree::{CONTENT_GUTTER, LAST_INDENT, PIPE_INDENT, StructureLines};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// Content inlining stops here even when the line limit is unlimited.
pub const SAFETY_LINE_CAP: usize = 1_000_000;
const BINARY_PROBE_LEN: u64 = 1024;

/// State for one traversal: the resolved root, compiled rules and the
/// followed symlink targets on the current descent path.
#[derive(Debug)]
pub struct ScanSession<'c> {
    config: &'c ScanConfig,
    base_dir: PathBuf,
    open_symlinks: HashSet<PathBuf>,
    matcher: PatternMatcher,
    redactor: Redactor,
}
impl<'c> ScanSession<'c> {
    pub fn new(config: &'c ScanConfig, root: impl AsRef<Path>) -> Result<Self, DiraiError> {
        let root = root.as_ref();
        let base_dir = match fs::canonicalize(root) {
            Ok(path) => path,
            Err(_) => std::path::absolute(root).map_err(|e| DiraiError::io(root, e))?,
        };
        #[cfg(feature = "logging")]
        tracing::debug!("Starting scan of {}", base_dir.display());
        let matcher = PatternMatcher::new(config, &base_dir)?;
        let redactor = Redactor::new(&config.ignore_variables, &config.redaction_patterns)?;
        Ok(Self {
            config,
            base_dir,
            open_symlinks: HashSet::new(),
            matcher,
            redactor,
        })
    }
    pub fn config(&self) -> &ScanConfig {
        self.config
    }
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }
    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        self.matcher.is_excluded(relative, is_dir)
    }
    /// Records a followed symlink by its resolved target. Returns `None` if
    /// that target is already open on the current descent path.
    pub fn enter_symlink(&mut self, link: &Path) -> Option<PathBuf> {
        let target = fs::canonicalize(link).unwrap_or_else(|_| link.to_path_buf());
        if !self.open_symlinks.insert(target.clone()) {
            #[cfg(feature = "logging")]
            tracing::debug!("Recursive symlink skipped: {}", link.display());
            return None;
        }
        Some(target)
    }
    /// Called once every entry under a followed symlink has been rendered.
    pub fn leave_symlink(&mut self, target: &Path) {
        self.open_symlinks.remove(target);
    }
    /// Renders the content lines of `path` nested under its tree entry.
    pub fn inline_content(&self, path: &Path, prefix: &str, is_last: bool) -> Vec<String> {
        let content_prefix = format!(
            "{prefix}{}{CONTENT_GUTTER}",
            if is_last { LAST_INDENT } else { PIPE_INDENT }
        );
        if is_binary(path, self.config.binary_detection) {
            #[cfg(feature = "logging")]
            tracing::debug!("Binary file detected: {}", path.display());
            return vec![format!("{content_prefix}[Binary content omitted]")];
        }
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => return vec![format!("{content_prefix}[Error reading file: {e}]")],
        };
        let mut lines = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            match self.config.max_lines {
                Some(max) if index >= max => {
                    lines.push(format!("{content_prefix}[... {max} lines shown]"));
                    break;
                }
                None if index >= SAFETY_LINE_CAP => {
                    lines.push(format!("{content_prefix}[Stopped after 1,000,000 lines]"));
                    break;
                }
                _ => {}
            }
            match line {
                Ok(line) => {
                    lines.push(format!("{content_prefix}{}", self.redactor.redact(&line)));
                }
                Err(e) => {
                    lines.push(format!("{content_prefix}[Error reading file: {e}]"));
                    break;
                }
            }
        }
        lines
    }
    /// Consumes the session into the lazily rendered tree lines.
    pub fn into_lines(self) -> StructureLines<'c> {
        StructureLines::new(self)
    }
}

/// Unreadable files count as binary.
pub fn is_binary(path: &Path, detection: BinaryDetection) -> bool {
    if detection == BinaryDetection::None {
        return false;
    }
    let mut probe = Vec::with_capacity(BINARY_PROBE_LEN as usize);
    let read = File::open(path)
        .and_then(|file| file.take(BINARY_PROBE_LEN).read_to_end(&mut probe));
    if read.is_err() {
        return true;
    }
    match detection {
        BinaryDetection::Simple => probe.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&probe).is_binary(),
        BinaryDetection::None => false,
    }
}

/// Scans `root` and returns every rendered line.
pub fn generate_structure(
    config: &ScanConfig,
    root: impl AsRef<Path>,
) -> Result<Vec<String>, DiraiError> {
    Ok(ScanSession::new(config, root)?.into_lines().collect())
}
