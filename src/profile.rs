//! Named scan profiles loaded from `.dirai.yaml`.
//!
//! The file is a mapping of profile name to settings:
//!
//! ```yaml
//! default:
//!   show_content: false
//! web:
//!   exclude: ["node_modules/", "*.min.js"]
//!   max_depth: 4
//!   max_lines: 200
//! ```
//!
//! A profile that also exists in the built-in store is overlaid onto it field
//! by field. Fields left unset fall back to [`ScanConfig::default`] when the
//! profile is resolved.

use crate::error::DiraiError;
use crate::options::{BinaryDetection, ScanConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

pub const CONFIG_FILE_NAME: &str = ".dirai.yaml";
pub const DEFAULT_PROFILE: &str = "default";
/// Profile selector that runs every profile in the store.
pub const ALL_PROFILES: &str = "all";
pub const DEFAULT_OUTPUT: &str = "structure.txt";
pub const DEFAULT_DIRECTORY: &str = ".";

/// Settings of one profile. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub directory: Option<PathBuf>,
    pub output: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub use_gitignore: Option<bool>,
    pub gitignore_paths: Option<Vec<PathBuf>>,
    pub include_vcs: Option<bool>,
    pub follow_symlinks: Option<bool>,
    pub max_depth: Option<usize>,
    pub show_content: Option<bool>,
    /// Negative means unlimited.
    pub max_lines: Option<i64>,
    pub ignore_variables: Option<Vec<String>>,
    pub redaction_patterns: Option<Vec<String>>,
    pub binary_detection: Option<BinaryDetection>,
    pub verbose: Option<bool>,
}

/// A profile with every setting decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub directory: PathBuf,
    /// Destination token, `-` for standard output.
    pub output: String,
    pub config: ScanConfig,
}

fn replace<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn append<T>(slot: &mut Option<Vec<T>>, value: Option<Vec<T>>) {
    if let Some(mut extra) = value {
        slot.get_or_insert_with(Vec::new).append(&mut extra);
    }
}

impl ProfileSettings {
    /// The built-in `default` profile, with every field set.
    pub fn builtin_default() -> Self {
        let config = ScanConfig::default();
        Self {
            directory: Some(PathBuf::from(DEFAULT_DIRECTORY)),
            output: Some(DEFAULT_OUTPUT.to_string()),
            exclude: Some(config.exclude_patterns),
            include: Some(config.include_patterns),
            use_gitignore: Some(config.use_gitignore),
            gitignore_paths: Some(config.gitignore_paths),
            include_vcs: Some(config.include_vcs),
            follow_symlinks: Some(config.follow_symlinks),
            max_depth: config.max_depth,
            show_content: Some(config.show_content),
            max_lines: Some(-1),
            ignore_variables: Some(config.ignore_variables),
            redaction_patterns: Some(config.redaction_patterns),
            binary_detection: Some(config.binary_detection),
            verbose: Some(config.verbose),
        }
    }

    /// Every field set in `other` replaces the one here, lists included.
    pub fn overlay(&mut self, other: ProfileSettings) {
        replace(&mut self.directory, other.directory);
        replace(&mut self.output, other.output);
        replace(&mut self.exclude, other.exclude);
        replace(&mut self.include, other.include);
        replace(&mut self.gitignore_paths, other.gitignore_paths);
        self.overlay_scalars(other.use_gitignore, other.include_vcs, other.follow_symlinks);
        replace(&mut self.max_depth, other.max_depth);
        replace(&mut self.show_content, other.show_content);
        replace(&mut self.max_lines, other.max_lines);
        replace(&mut self.ignore_variables, other.ignore_variables);
        replace(&mut self.redaction_patterns, other.redaction_patterns);
        replace(&mut self.binary_detection, other.binary_detection);
        replace(&mut self.verbose, other.verbose);
    }

    /// Applies command-line overrides: scalars replace, while `exclude`,
    /// `include` and `gitignore_paths` are appended to the profile's lists.
    pub fn apply_overrides(&mut self, overrides: ProfileSettings) {
        append(&mut self.exclude, overrides.exclude);
        append(&mut self.include, overrides.include);
        append(&mut self.gitignore_paths, overrides.gitignore_paths);
        replace(&mut self.directory, overrides.directory);
        replace(&mut self.output, overrides.output);
        self.overlay_scalars(
            overrides.use_gitignore,
            overrides.include_vcs,
            overrides.follow_symlinks,
        );
        replace(&mut self.max_depth, overrides.max_depth);
        replace(&mut self.show_content, overrides.show_content);
        replace(&mut self.max_lines, overrides.max_lines);
        replace(&mut self.ignore_variables, overrides.ignore_variables);
        replace(&mut self.redaction_patterns, overrides.redaction_patterns);
        replace(&mut self.binary_detection, overrides.binary_detection);
        replace(&mut self.verbose, overrides.verbose);
    }

    fn overlay_scalars(
        &mut self,
        use_gitignore: Option<bool>,
        include_vcs: Option<bool>,
        follow_symlinks: Option<bool>,
    ) {
        replace(&mut self.use_gitignore, use_gitignore);
        replace(&mut self.include_vcs, include_vcs);
        replace(&mut self.follow_symlinks, follow_symlinks);
    }

    pub fn resolve(self) -> ResolvedProfile {
        let defaults = ScanConfig::default();
        let max_lines = match self.max_lines {
            Some(lines) => usize::try_from(lines).ok(),
            None => defaults.max_lines,
        };
        let config = ScanConfig {
            exclude_patterns: self.exclude.unwrap_or(defaults.exclude_patterns),
            include_patterns: self.include.unwrap_or(defaults.include_patterns),
            use_gitignore: self.use_gitignore.unwrap_or(defaults.use_gitignore),
            gitignore_paths: self.gitignore_paths.unwrap_or(defaults.gitignore_paths),
            include_vcs: self.include_vcs.unwrap_or(defaults.include_vcs),
            follow_symlinks: self.follow_symlinks.unwrap_or(defaults.follow_symlinks),
            max_depth: self.max_depth.or(defaults.max_depth),
            show_content: self.show_content.unwrap_or(defaults.show_content),
            max_lines,
            ignore_variables: self.ignore_variables.unwrap_or(defaults.ignore_variables),
            redaction_patterns: self.redaction_patterns.unwrap_or(defaults.redaction_patterns),
            binary_detection: self.binary_detection.unwrap_or(defaults.binary_detection),
            verbose: self.verbose.unwrap_or(defaults.verbose),
        };
        ResolvedProfile {
            directory: self
                .directory
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECTORY)),
            output: self.output.unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            config,
        }
    }
}

/// All known profiles, always including [`DEFAULT_PROFILE`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStore {
    profiles: BTreeMap<String, ProfileSettings>,
    source: Option<PathBuf>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileStore {
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            DEFAULT_PROFILE.to_string(),
            ProfileSettings::builtin_default(),
        );
        Self {
            profiles,
            source: None,
        }
    }

    /// Parses a config document and merges it onto the built-in profiles.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml_ng::Error> {
        let mut store = Self::builtin();
        if content.trim().is_empty() {
            return Ok(store);
        }
        let parsed: Option<BTreeMap<String, Option<ProfileSettings>>> =
            serde_yaml_ng::from_str(content)?;
        for (name, settings) in parsed.unwrap_or_default() {
            let settings = settings.unwrap_or_default();
            match store.profiles.get_mut(&name) {
                Some(existing) => existing.overlay(settings),
                None => {
                    store.profiles.insert(name, settings);
                }
            }
        }
        Ok(store)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DiraiError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| DiraiError::io(path, e))?;
        let mut store = Self::from_yaml_str(&content).map_err(|e| DiraiError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        store.source = Some(path.to_path_buf());
        Ok(store)
    }

    /// Loads the first config file found in [`search_dirs`], or the built-in
    /// store when there is none.
    pub fn discover() -> Result<Self, DiraiError> {
        match find_config_file(&search_dirs()) {
            Some(path) => {
                #[cfg(feature = "logging")]
                tracing::debug!("Using config file {}", path.display());
                Self::from_file(path)
            }
            None => {
                #[cfg(feature = "logging")]
                tracing::info!("Config file not found. Using default configuration.");
                Ok(Self::builtin())
            }
        }
    }

    /// The file this store was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Unknown names fall back to the `default` profile.
    pub fn get(&self, name: &str) -> &ProfileSettings {
        if let Some(settings) = self.profiles.get(name) {
            return settings;
        }
        #[cfg(feature = "logging")]
        tracing::warn!("Unknown profile '{}', using '{}'", name, DEFAULT_PROFILE);
        &self.profiles[DEFAULT_PROFILE]
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// Expands the `all` selector; other names are kept as given.
    pub fn select(&self, requested: &[String]) -> Vec<String> {
        if requested.is_empty() {
            return vec![DEFAULT_PROFILE.to_string()];
        }
        if requested.iter().any(|name| name == ALL_PROFILES) {
            return self.names();
        }
        requested.to_vec()
    }
}

/// Current directory, then home, then the executable's directory.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home);
    }
    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir);
    }
    candidates
}

pub fn find_config_file(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
