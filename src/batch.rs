//! Translation of several sequences in one run.
//!
//! Each sequence is translated independently. A sequence that fails does not
//! stop the others; its failure is recorded next to the successful results so
//! the report keeps the input order.

use log::{debug, error, warn};
use thiserror::Error;

use crate::genetic_code::UnknownCodonError;
use crate::input::InputSequence;
use crate::output::{OutputError, OutputSink};
use crate::translate::{Translation, TranslationError, Translator};

/// Raised once a batch has been written if any of its sequences failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{failed} of {total} sequence(s) could not be translated")]
pub struct BatchFailed {
    pub failed: usize,
    pub total: usize,
}

/// The outcome for one input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// Input line number (1-based)
    pub line: usize,
    pub outcome: Result<Translation, TranslationError>,
}

impl BatchEntry {
    /// The line to emit for this entry. Failed sequences emit an empty line.
    pub fn output_line(&self) -> &str {
        match &self.outcome {
            Ok(translation) => &translation.polypeptide,
            Err(_) => "",
        }
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_err()).count()
    }

    /// Number of sequences with an incomplete trailing codon.
    pub fn warnings(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(&e.outcome, Ok(t) if t.trailing.is_some()))
            .count()
    }

    /// Writes one line per entry to `sink`.
    pub fn write_to(&self, sink: &mut OutputSink) -> Result<(), OutputError> {
        for entry in &self.entries {
            sink.write_line(entry.output_line())?;
        }
        Ok(())
    }

    /// Converts the report into an error if any sequence failed.
    pub fn check(&self) -> Result<(), BatchFailed> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(BatchFailed {
                failed,
                total: self.total(),
            }),
        }
    }
}

/// Translates one input sequence, reporting positions in the raw input.
pub fn translate_sequence(
    translator: &Translator,
    sequence: &InputSequence,
) -> Result<Translation, TranslationError> {
    translator
        .translate(&sequence.data)
        .map(|translation| translation.shifted(sequence.offset))
        .map_err(|e| e.shifted(sequence.offset))
}

/// Translates every sequence, logging warnings and failures by line number.
///
/// Invalid sequences are recorded and the batch continues. A codon missing
/// from the table means the table itself is broken, so it ends the batch.
pub fn translate_batch(
    translator: &Translator,
    sequences: &[InputSequence],
) -> Result<BatchReport, UnknownCodonError> {
    let mut entries = Vec::with_capacity(sequences.len());
    for sequence in sequences {
        let outcome = translate_sequence(translator, sequence);
        match &outcome {
            Ok(translation) => {
                debug!(
                    "Line {}: translated {} nucleotides into {} residues ({:?})",
                    sequence.line,
                    sequence.data.len(),
                    translation.polypeptide.len(),
                    translation.termination
                );
                if let Some(trailing) = &translation.trailing {
                    warn!("Line {}: {}", sequence.line, trailing);
                }
            }
            Err(TranslationError::UnknownCodon(e)) => return Err(e.clone()),
            Err(e) => error!("Line {}: {}", sequence.line, e),
        }
        entries.push(BatchEntry {
            line: sequence.line,
            outcome,
        });
    }

    Ok(BatchReport { entries })
}
