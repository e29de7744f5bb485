use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Patterns redacted out of inlined file content unless a profile says otherwise.
pub const DEFAULT_REDACTION_PATTERNS: &[&str] = &[
    r"api[_-]?key",
    r"secret[_-]?key",
    r"token",
    r"password",
    r"credentials",
    r"auth",
    r"authorization",
    r"access",
    r"session",
    r"cookie",
    r"bearer",
    r"api_key",
    r"api_token",
    r"api_secret",
    r"api_password",
    r"api_username",
    r"apikey",
    r"apitoken",
    r"apisecret",
    r"apipassword",
    r"apiusername",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryDetection {
    /// A NUL byte in the first 1024 bytes.
    #[default]
    Simple,
    Accurate,
    None,
}

/// Settings for one scan. Built by the profile layer or by [`ScanConfigBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub exclude_patterns: Vec<String>,
    /// Empty means every file is included.
    pub include_patterns: Vec<String>,
    pub use_gitignore: bool,
    /// Extra gitignore files, merged before the discovered ones.
    pub gitignore_paths: Vec<PathBuf>,
    pub include_vcs: bool,
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
    pub show_content: bool,
    /// `None` is unlimited, still subject to the hard cap of one million lines.
    pub max_lines: Option<usize>,
    pub ignore_variables: Vec<String>,
    pub redaction_patterns: Vec<String>,
    pub binary_detection: BinaryDetection,
    pub verbose: bool,
}
impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            include_patterns: Vec::new(),
            use_gitignore: true,
            gitignore_paths: Vec::new(),
            include_vcs: false,
            follow_symlinks: false,
            max_depth: None,
            show_content: true,
            max_lines: None,
            ignore_variables: Vec::new(),
            redaction_patterns: DEFAULT_REDACTION_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            binary_detection: BinaryDetection::Simple,
            verbose: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}
impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.exclude_patterns = patterns;
        self
    }
    pub fn include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.include_patterns = patterns;
        self
    }
    pub fn use_gitignore(mut self, yes: bool) -> Self {
        self.config.use_gitignore = yes;
        self
    }
    pub fn gitignore_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.gitignore_paths = paths;
        self
    }
    pub fn include_vcs(mut self, yes: bool) -> Self {
        self.config.include_vcs = yes;
        self
    }
    pub fn follow_symlinks(mut self, yes: bool) -> Self {
        self.config.follow_symlinks = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.config.max_depth = None;
        self
    }
    pub fn show_content(mut self, yes: bool) -> Self {
        self.config.show_content = yes;
        self
    }
    pub fn max_lines(mut self, lines: Option<usize>) -> Self {
        self.config.max_lines = lines;
        self
    }
    pub fn ignore_variables(mut self, names: Vec<String>) -> Self {
        self.config.ignore_variables = names;
        self
    }
    pub fn redaction_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.redaction_patterns = patterns;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.config.binary_detection = method;
        self
    }
    pub fn verbose(mut self, yes: bool) -> Self {
        self.config.verbose = yes;
        self
    }
    pub fn build(self) -> ScanConfig {
        self.config
    }
}
