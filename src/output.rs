//! Writing rendered lines to their destination.
//!
//! The destination token `-` means standard output; anything else is a file
//! path that is created or truncated.

use crate::DiraiError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Token that selects standard output.
pub const STDOUT_TOKEN: &str = "-";

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn parse(token: &str) -> Self {
        if token == STDOUT_TOKEN {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(token))
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, Destination::Stdout)
    }
}

/// Writes each line followed by `\n`.
pub fn write_lines<I>(lines: I, destination: &Destination) -> Result<(), DiraiError>
where
    I: IntoIterator<Item = String>,
{
    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_to(lines, stdout.lock()).map_err(|e| DiraiError::io(STDOUT_TOKEN, e))
        }
        Destination::File(path) => {
            let file = File::create(path).map_err(|e| DiraiError::io(path, e))?;
            write_to(lines, file).map_err(|e| DiraiError::io(path, e))
        }
    }
}

/// Writes the lines to `path`, creating or truncating it.
pub fn write_lines_to_file<I>(lines: I, path: impl AsRef<Path>) -> Result<(), DiraiError>
where
    I: IntoIterator<Item = String>,
{
    write_lines(lines, &Destination::File(path.as_ref().to_path_buf()))
}

fn write_to<I, W>(lines: I, writer: W) -> io::Result<()>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut writer = BufWriter::new(writer);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
