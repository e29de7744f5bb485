//! Command-line interface for dirai.
//!
//! Runs one or more profiles from `.dirai.yaml` (or the built-in default),
//! applies command-line overrides, and writes one report per profile.

use clap::Parser;
use dirai::output::{self, Destination};
use dirai::profile::{ProfileSettings, ProfileStore};
use dirai::{BinaryDetection, DiraiError, generate_structure};
use std::path::PathBuf;
use std::process::exit;

/// Smart directory structure analysis
#[derive(Parser)]
#[command(
    name = "dirai",
    version,
    about,
    long_about = None,
    after_help = "Example: dirai --profiles web --output structure.md\n\
                  Configuration file: ./.dirai.yaml or ~/.dirai.yaml"
)]
struct Cli {
    /// Profiles to run ('all' runs every profile in the config)
    #[arg(short = 'p', long = "profiles", visible_alias = "profile", num_args = 1.., default_value = "default")]
    profiles: Vec<String>,

    /// Target directory to analyze
    #[arg(short = 'd', long)]
    directory: Option<PathBuf>,

    /// Output file name ('-' for standard output)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Exclusion patterns (gitignore syntax)
    #[arg(short = 'x', long, num_args = 1..)]
    exclude: Vec<String>,

    /// Inclusion patterns (gitignore syntax)
    #[arg(short = 'i', long, num_args = 1..)]
    include: Vec<String>,

    /// Maximum directory depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum content lines per file (-1 for unlimited)
    #[arg(long, allow_negative_numbers = true)]
    max_lines: Option<i64>,

    /// Override gitignore usage (true/false)
    #[arg(long, value_parser = parse_bool)]
    use_gitignore: Option<bool>,

    /// Additional gitignore files to use
    #[arg(long, num_args = 1..)]
    gitignore_paths: Vec<PathBuf>,

    /// Display file contents
    #[arg(long)]
    show_content: bool,

    /// Follow symbolic links
    #[arg(long)]
    follow_symlinks: bool,

    /// Include .git, .svn and .hg directories
    #[arg(long)]
    include_vcs: bool,

    /// Binary detection strategy
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// Show detailed error messages
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(format!("invalid boolean: {}", s)),
    }
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}

impl Cli {
    /// Settings given on the command line; flags that were not passed stay unset.
    fn overrides(&self) -> ProfileSettings {
        ProfileSettings {
            directory: self.directory.clone(),
            output: self.output.clone(),
            exclude: non_empty(self.exclude.clone()),
            include: non_empty(self.include.clone()),
            use_gitignore: self.use_gitignore,
            gitignore_paths: non_empty(self.gitignore_paths.clone()),
            include_vcs: self.include_vcs.then_some(true),
            follow_symlinks: self.follow_symlinks.then_some(true),
            max_depth: self.max_depth,
            show_content: self.show_content.then_some(true),
            max_lines: self.max_lines,
            ignore_variables: None,
            redaction_patterns: None,
            binary_detection: self.binary_detection,
            verbose: self.verbose.then_some(true),
        }
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .parse_filters(if verbose { "debug" } else { "warn" })
        .format_target(false)
        .init();
}

/// Ctrl-C ends the run with status 1; partial output is left as written.
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        println!("\nOperation cancelled by user");
        exit(1);
    });
    if let Err(e) = installed {
        eprintln!("Warning: cannot install interrupt handler: {}", e);
    }
}

fn load_profiles() -> ProfileStore {
    match ProfileStore::discover() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            ProfileStore::builtin()
        }
    }
}

fn run_profile(
    store: &ProfileStore,
    name: &str,
    overrides: &ProfileSettings,
) -> Result<(), DiraiError> {
    let mut settings = store.get(name).clone();
    settings.apply_overrides(overrides.clone());
    let resolved = settings.resolve();

    // Fully rendered before the destination is opened.
    let lines = generate_structure(&resolved.config, &resolved.directory)?;
    let destination = Destination::parse(&resolved.output);
    output::write_lines(lines, &destination)?;

    if !destination.is_stdout() {
        println!("DIRAI report generated: {}", resolved.output);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    install_interrupt_handler();

    let store = load_profiles();
    let overrides = cli.overrides();
    let mut failed = false;
    for name in store.select(&cli.profiles) {
        if let Err(e) = run_profile(&store, &name, &overrides) {
            eprintln!("Error: profile '{}': {}", name, e);
            failed = true;
        }
    }
    if failed {
        exit(1);
    }
}
