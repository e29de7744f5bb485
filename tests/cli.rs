//! Runs the `dirai` binary against temporary directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("project")).expect("Failed to create project dir");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn add_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join("project").join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(full_path, content).expect("Failed to write file");
    }

    fn write_config(&self, yaml: &str) {
        fs::write(self.dir.path().join(".dirai.yaml"), yaml).expect("Failed to write config");
    }

    /// Runs with the workspace as both working and home directory.
    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dirai"))
            .args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .output()
            .expect("Failed to run dirai")
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_report_to_stdout() {
    let ws = Workspace::new();
    ws.add_file("a.txt", "hello");
    ws.add_file("src/main.rs", "fn main() {}");

    let output = ws.run(&["-d", "project", "-o", "-"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "└── project/\n\
         ├── src/\n\
         │   └── main.rs\n\
         │       │   fn main() {}\n\
         └── a.txt\n    \
         │   hello\n"
    );
    assert!(!ws.path().join("structure.txt").exists());
}

#[test]
fn test_report_to_file_prints_confirmation() {
    let ws = Workspace::new();
    ws.add_file("a.txt", "hello");

    let output = ws.run(&["-d", "project", "-o", "report.txt"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "DIRAI report generated: report.txt\n");
    assert_eq!(
        fs::read_to_string(ws.path().join("report.txt")).unwrap(),
        "└── project/\n└── a.txt\n    │   hello\n"
    );
}

#[test]
fn test_exclude_flags_append_to_profile() {
    let ws = Workspace::new();
    ws.add_file("keep.rs", "");
    ws.add_file("debug.log", "");
    ws.add_file("cache/blob.bin", "");

    let output = ws.run(&["-d", "project", "-o", "-", "-x", "*.log", "cache/"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "└── project/\n└── keep.rs\n");
}

#[test]
fn test_profile_from_config_file() {
    let ws = Workspace::new();
    ws.add_file("README.md", "# Title");
    ws.add_file("main.rs", "fn main() {}");
    ws.write_config(
        "docs:\n  directory: project\n  output: '-'\n  include: ['*.md']\n  show_content: false\n",
    );

    let output = ws.run(&["--profiles", "docs"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "└── project/\n└── README.md\n");
}

#[test]
fn test_command_line_overrides_profile() {
    let ws = Workspace::new();
    ws.add_file("notes.txt", "one\ntwo\nthree");
    ws.write_config("docs:\n  directory: project\n  output: '-'\n  show_content: false\n");

    let output = ws.run(&["-p", "docs", "--show-content", "--max-lines", "1"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "└── project/\n└── notes.txt\n    │   one\n    │   [... 1 lines shown]\n"
    );
}

#[test]
fn test_unknown_profile_uses_default() {
    let ws = Workspace::new();
    ws.add_file("a.txt", "");

    let output = ws.run(&["-p", "missing", "-d", "project", "-o", "-"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "└── project/\n└── a.txt\n");
}

#[test]
fn test_secrets_are_redacted() {
    let ws = Workspace::new();
    ws.add_file(".env", "API_KEY=abc123\nPORT=8080\n");

    let output = ws.run(&["-d", "project", "-o", "-"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "└── project/\n└── .env\n    │   API_KEY=\n    │   PORT=8080\n"
    );
}

#[test]
fn test_invalid_pattern_fails() {
    let ws = Workspace::new();
    ws.add_file("a.txt", "");

    let output = ws.run(&["-d", "project", "-o", "-", "-x", "a[b"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: profile 'default'"));
}

#[cfg(unix)]
#[test]
fn test_interrupt_exits_with_status_one() {
    use std::process::Stdio;
    use std::thread::sleep;
    use std::time::Duration;

    let ws = Workspace::new();
    ws.add_file("a.txt", "");
    // Opening a FIFO with no writer blocks, which holds the scan in place.
    let fifo = ws.path().join("ignore.fifo");
    let made = Command::new("mkfifo")
        .arg(&fifo)
        .status()
        .expect("Failed to run mkfifo");
    assert!(made.success());

    let child = Command::new(env!("CARGO_BIN_EXE_dirai"))
        .args(["-d", "project", "-o", "-", "--gitignore-paths", "ignore.fifo"])
        .current_dir(ws.path())
        .env("HOME", ws.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run dirai");
    sleep(Duration::from_millis(1000));
    let pid = child.id().to_string();
    Command::new("kill")
        .args(["-INT", pid.as_str()])
        .status()
        .expect("Failed to send SIGINT");

    let output = child.wait_with_output().expect("Failed to wait for dirai");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).contains("Operation cancelled by user"));
}
