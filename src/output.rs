//! Output sink for translated polypeptides.
//!
//! Polypeptides are written one per line, either to standard output or to a
//! file. An existing output file is truncated.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing output.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("The output file '{}' could not be created", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write to {target}")]
    Write {
        target: OutputTarget,
        #[source]
        source: io::Error,
    },
}

/// Where polypeptides are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputTarget {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Stdout,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "standard output"),
            OutputTarget::File(path) => write!(f, "'{}'", path.display()),
        }
    }
}

/// A line-oriented writer over an [`OutputTarget`].
pub struct OutputSink {
    target: OutputTarget,
    writer: BufWriter<Box<dyn Write>>,
    lines_written: usize,
}

impl OutputSink {
    /// Opens the target. A file target is created, or truncated if it exists.
    pub fn open(target: OutputTarget) -> Result<Self, OutputError> {
        let writer: Box<dyn Write> = match &target {
            OutputTarget::Stdout => Box::new(io::stdout()),
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| OutputError::Create {
                    path: path.clone(),
                    source,
                })?;
                Box::new(file)
            }
        };
        Ok(Self {
            target,
            writer: BufWriter::new(writer),
            lines_written: 0,
        })
    }

    /// Writes one newline-terminated line.
    pub fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", line).map_err(|source| self.write_error(source))?;
        self.lines_written += 1;
        Ok(())
    }

    /// Flushes buffered output and returns the number of lines written.
    pub fn finish(mut self) -> Result<usize, OutputError> {
        self.writer
            .flush()
            .map_err(|source| self.write_error(source))?;
        Ok(self.lines_written)
    }

    fn write_error(&self, source: io::Error) -> OutputError {
        OutputError::Write {
            target: self.target.clone(),
            source,
        }
    }
}
