//! Input acquisition.
//!
//! Sequences come either from a literal command-line argument or from a file
//! holding one sequence per line. Blank lines in a file are skipped, and
//! surrounding whitespace is trimmed from every sequence. Bytes that are not
//! UTF-8 are kept as U+FFFD so they fail translation of their own line only.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading input sequences.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("The input file '{}' could not be opened", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read the input file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where sequences are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceSource {
    /// A single sequence given inline
    Literal(String),
    /// A file with one sequence per line
    File(PathBuf),
}

/// A sequence together with the input line it came from (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSequence {
    pub line: usize,
    pub data: String,
    /// Characters of leading whitespace trimmed from the raw input
    pub offset: usize,
}

impl InputSequence {
    #[cfg(test)]
    pub(crate) fn new(line: usize, data: impl Into<String>) -> Self {
        Self {
            line,
            data: data.into(),
            offset: 0,
        }
    }

    /// Trims `raw`, remembering how many characters were cut from its start.
    pub fn trimmed(line: usize, raw: &str) -> Self {
        let offset = raw.chars().take_while(|c| c.is_whitespace()).count();
        Self {
            line,
            data: raw.trim().to_string(),
            offset,
        }
    }
}

/// Reads all sequences from `source`.
///
/// A literal always yields exactly one sequence, even when it is empty.
pub fn read_sequences(source: &SequenceSource) -> Result<Vec<InputSequence>, InputError> {
    match source {
        SequenceSource::Literal(sequence) => Ok(vec![InputSequence::trimmed(1, sequence)]),
        SequenceSource::File(path) => read_sequence_file(path),
    }
}

/// Reads a line-delimited sequence file.
pub fn read_sequence_file<P: AsRef<Path>>(path: P) -> Result<Vec<InputSequence>, InputError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sequences(BufReader::new(file)).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses line-delimited sequences from a reader.
pub fn parse_sequences<R: BufRead>(reader: R) -> io::Result<Vec<InputSequence>> {
    let mut sequences = Vec::new();
    for (index, line_result) in reader.split(b'\n').enumerate() {
        let bytes = line_result?;
        let line = String::from_utf8_lossy(&bytes);

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        sequences.push(InputSequence::trimmed(index + 1, &line));
    }
    Ok(sequences)
}
