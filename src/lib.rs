//! # Dirai
//!
//! `dirai` renders a directory as a text tree, optionally with each file's
//! contents inlined beneath its entry. Values of secret-looking assignments
//! (`API_KEY=...`, `password: "..."`) are blanked on the way out, so the
//! snapshot can be shared, for example with an AI assistant.
//!
//! Entries are filtered by exclude and include patterns, by `.gitignore`
//! rules found under the root, and by a depth limit. Version control
//! directories are skipped unless asked for. Symlinks are shown with their
//! targets and can be followed, with loops cut short.
//!
//! # Features
//!
//! - `logging` (default): Enables diagnostics via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirai::{ScanConfigBuilder, generate_structure};
//!
//! let config = ScanConfigBuilder::new()
//!     .exclude_patterns(vec!["target/".into()])
//!     .max_depth(3)
//!     .max_lines(Some(50))
//!     .build();
//!
//! for line in generate_structure(&config, ".").expect("Failed to scan directory") {
//!     println!("{line}");
//! }
//! ```

mod engine;
mod error;
pub mod matcher;
mod options;
pub mod output;
pub mod profile;
pub mod redact;
mod tree;
mod types;

pub use engine::{SAFETY_LINE_CAP, ScanSession, generate_structure, is_binary};
pub use error::DiraiError;
pub use matcher::{PatternMatcher, RuleSet};
pub use options::{BinaryDetection, DEFAULT_REDACTION_PATTERNS, ScanConfig, ScanConfigBuilder};
pub use redact::Redactor;
pub use tree::StructureLines;
pub use types::Entry;
