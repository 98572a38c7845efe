mod artifacts;
mod infer;

pub use artifacts::ArtifactPaths;
pub use infer::input as infer_input_format;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, Stdin, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn stdout_is_tty() -> bool {
    io::stdout().is_terminal()
}

/// Corpus input: a named file or stdin.
pub enum InputSource {
    File(BufReader<File>),
    Stdin(BufReader<Stdin>),
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(r) => r.read(buf),
            Self::Stdin(r) => r.read(buf),
        }
    }
}

impl BufRead for InputSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Self::File(r) => r.fill_buf(),
            Self::Stdin(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Self::File(r) => r.consume(amt),
            Self::Stdin(r) => r.consume(amt),
        }
    }
}

pub fn open_input(path: Option<&Path>) -> Result<InputSource> {
    let Some(p) = path else {
        return Ok(InputSource::Stdin(BufReader::new(io::stdin())));
    };
    let file =
        File::open(p).with_context(|| format!("Failed to open input file: {}", p.display()))?;
    Ok(InputSource::File(BufReader::new(file)))
}

/// Artifact output: a created file or locked stdout.
pub enum OutputTarget {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(w) => w.write(buf),
            Self::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(w) => w.flush(),
            Self::Stdout(w) => w.flush(),
        }
    }
}

/// Creates `path` (and any missing parent directories), or falls back to stdout.
pub fn create_output(path: Option<&Path>) -> Result<OutputTarget> {
    let Some(p) = path else {
        return Ok(OutputTarget::Stdout(BufWriter::new(io::stdout().lock())));
    };
    if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file =
        File::create(p).with_context(|| format!("Failed to create output file: {}", p.display()))?;
    Ok(OutputTarget::File(BufWriter::new(file)))
}

/// Short display name for a destination: the file name, or `stdout`.
pub fn display_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdout".to_string())
}
