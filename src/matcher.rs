//! Gitignore-style exclusion decisions for paths relative to the scan root.

use crate::error::DiraiError;
use crate::options::ScanConfig;
use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Component, Path};
#[cfg(feature = "logging")]
use tracing;

/// Path segments excluded unless `include_vcs` is set.
pub const VCS_DIRS: [&str; 3] = [".git", ".svn", ".hg"];

const GITIGNORE_FILE: &str = ".gitignore";

/// An ordered list of gitignore rules. Later rules override earlier ones.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Gitignore,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self {
            rules: Gitignore::empty(),
        }
    }

    /// Compiles `patterns`, failing on the first invalid glob.
    pub fn from_patterns<I, S>(root: &Path, patterns: I) -> Result<Self, DiraiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder
                .add_line(None, pattern)
                .map_err(|e| DiraiError::pattern(pattern, e))?;
        }
        let rules = builder
            .build()
            .map_err(|e| DiraiError::pattern("<rule set>", e))?;
        Ok(Self { rules })
    }

    /// True when the last rule matching `path`, or one of its parent
    /// directories, is an ignore rule rather than a `!` negation.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if self.rules.is_empty() || path.has_root() {
            return false;
        }
        self.rules
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Resolves a relative path to an excluded/included decision.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    exclude: RuleSet,
    include: RuleSet,
    gitignore: RuleSet,
    include_vcs: bool,
}

impl PatternMatcher {
    /// Compiles the exclude and include lists and, when enabled, the merged
    /// gitignore rules found under `base_dir`.
    pub fn new(config: &ScanConfig, base_dir: &Path) -> Result<Self, DiraiError> {
        Ok(Self {
            exclude: RuleSet::from_patterns(base_dir, &config.exclude_patterns)?,
            include: RuleSet::from_patterns(base_dir, &config.include_patterns)?,
            gitignore: load_gitignore_rules(config, base_dir),
            include_vcs: config.include_vcs,
        })
    }

    pub fn from_rule_sets(
        exclude: RuleSet,
        include: RuleSet,
        gitignore: RuleSet,
        include_vcs: bool,
    ) -> Self {
        Self {
            exclude,
            include,
            gitignore,
            include_vcs,
        }
    }

    pub fn gitignore_rules(&self) -> &RuleSet {
        &self.gitignore
    }

    pub fn is_excluded(&self, rel_path: &Path, is_dir: bool) -> bool {
        if !self.include_vcs && has_vcs_segment(rel_path) {
            return true;
        }
        if self.exclude.matches(rel_path, is_dir) {
            return true;
        }
        if self.gitignore.matches(rel_path, is_dir) {
            return true;
        }
        // Directories may still hold included files.
        !is_dir && !self.include.is_empty() && !self.include.matches(rel_path, false)
    }
}

fn has_vcs_segment(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => VCS_DIRS.iter().any(|vcs| name == *vcs),
        _ => false,
    })
}

/// Builds the gitignore rule set: the configured extra files first, then
/// every `.gitignore` below `base_dir`, each scoped to its own directory.
/// Nothing here fails the scan.
pub fn load_gitignore_rules(config: &ScanConfig, base_dir: &Path) -> RuleSet {
    if !config.use_gitignore {
        return RuleSet::empty();
    }
    let mut builder = GitignoreBuilder::new(base_dir);

    for custom in &config.gitignore_paths {
        match fs::read_to_string(custom) {
            Ok(content) => add_rules(&mut builder, "", &content, config.verbose),
            Err(_e) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping gitignore file {}: {}", custom.display(), _e);
            }
        }
    }

    let include_vcs = config.include_vcs;
    let walker = WalkBuilder::new(base_dir)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            include_vcs
                || entry.depth() == 0
                || !VCS_DIRS.iter().any(|vcs| entry.file_name() == *vcs)
        })
        .build();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(_e) => {
                #[cfg(feature = "logging")]
                if config.verbose {
                    tracing::warn!("Gitignore error: {}", _e);
                }
                continue;
            }
        };
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if !is_file || entry.file_name() != GITIGNORE_FILE {
            continue;
        }
        let path = entry.path();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_e) => {
                #[cfg(feature = "logging")]
                if config.verbose {
                    tracing::warn!("Gitignore error: {}: {}", path.display(), _e);
                }
                continue;
            }
        };
        let scope = path
            .parent()
            .and_then(|dir| dir.strip_prefix(base_dir).ok())
            .map(slash_path)
            .unwrap_or_default();
        add_rules(&mut builder, &scope, &content, config.verbose);
    }

    match builder.build() {
        Ok(rules) => RuleSet { rules },
        Err(_e) => {
            #[cfg(feature = "logging")]
            if config.verbose {
                tracing::warn!("Gitignore error: {}", _e);
            }
            RuleSet::empty()
        }
    }
}

fn add_rules(builder: &mut GitignoreBuilder, scope: &str, content: &str, _verbose: bool) {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let rule = scope_rule(scope, line);
        if let Err(_e) = builder.add_line(None, &rule) {
            #[cfg(feature = "logging")]
            if _verbose {
                tracing::warn!("Gitignore error: skipping rule '{}': {}", rule, _e);
            }
        }
    }
}

/// Prefixes `rule` with the directory of the `.gitignore` it came from.
fn scope_rule(scope: &str, rule: &str) -> String {
    if scope.is_empty() {
        return rule.to_string();
    }
    let (negation, body) = match rule.strip_prefix('!') {
        Some(rest) => ("!", rest),
        None => ("", rule),
    };
    format!("{negation}{scope}/{}", body.trim_start_matches('/'))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
