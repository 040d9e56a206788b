//! Translation of nucleotide sequences into polypeptides.
//!
//! A [`Translator`] borrows an immutable [`CodonTable`] and turns one
//! sequence at a time into a [`Translation`]:
//!
//! 1. The sequence is upper-cased and every character is checked against
//!    the legal nucleotides. The first illegal character aborts translation.
//! 2. The sequence is split into consecutive triplets starting at position 0,
//!    or at the first start codon when [`TranslationOptions::from_start_codon`]
//!    is set.
//! 3. Each triplet is looked up. The first stop codon ends translation.
//! 4. One or two leftover characters are dropped and reported as an
//!    [`IncompleteTrailingCodon`] warning.

use thiserror::Error;

use crate::genetic_code::{is_legal_nucleotide, Codon, CodonTable, Residue, UnknownCodonError};

/// Errors that abort the translation of a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Invalid nucleotide '{nucleotide}' at position {position}: sequence must only contain A/C/G/T/a/c/g/t")]
    InvalidNucleotide { nucleotide: char, position: usize },

    #[error(transparent)]
    UnknownCodon(#[from] UnknownCodonError),
}

impl TranslationError {
    /// Moves a reported position by `offset` characters, for callers that
    /// trimmed the sequence before translating it.
    pub fn shifted(self, offset: usize) -> Self {
        match self {
            TranslationError::InvalidNucleotide {
                nucleotide,
                position,
            } => TranslationError::InvalidNucleotide {
                nucleotide,
                position: position + offset,
            },
            other => other,
        }
    }
}

/// One or two nucleotides left over after the last complete codon.
///
/// This is a warning, not a failure: the complete codons before it are
/// still translated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Incomplete trailing codon '{leftover}' at position {position} was not translated")]
pub struct IncompleteTrailingCodon {
    /// The leftover nucleotides, upper-cased
    pub leftover: String,
    /// Position of the first leftover nucleotide in the input sequence
    pub position: usize,
}

/// How translation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A stop codon was reached at `codon_index`, counted from the first
    /// translated codon.
    Stopped { codon_index: usize },
    /// All complete codons were translated without meeting a stop codon.
    Exhausted,
}

/// Result of translating one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub polypeptide: String,
    pub termination: Termination,
    /// Set when translation ran to the end of the sequence and found a
    /// partial codon there
    pub trailing: Option<IncompleteTrailingCodon>,
}

impl Translation {
    fn empty() -> Self {
        Self {
            polypeptide: String::new(),
            termination: Termination::Exhausted,
            trailing: None,
        }
    }

    /// Moves the trailing codon position by `offset` characters.
    pub fn shifted(mut self, offset: usize) -> Self {
        if let Some(trailing) = &mut self.trailing {
            trailing.position += offset;
        }
        self
    }
}

/// Switches for [`Translator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Append `*` when a stop codon ends translation
    pub include_stop: bool,
    /// Begin at the first start codon found in any frame instead of position 0
    pub from_start_codon: bool,
}

/// Translates sequences using a borrowed codon table.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    table: &'a CodonTable,
    options: TranslationOptions,
    start_codons: Vec<Codon>,
}

impl<'a> Translator<'a> {
    /// Creates a translator with default options.
    pub fn new(table: &'a CodonTable) -> Self {
        Self::with_options(table, TranslationOptions::default())
    }

    pub fn with_options(table: &'a CodonTable, options: TranslationOptions) -> Self {
        Self {
            table,
            options,
            start_codons: table.start_codons(),
        }
    }

    pub fn table(&self) -> &CodonTable {
        self.table
    }

    pub fn options(&self) -> TranslationOptions {
        self.options
    }

    /// Translates a single sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use codons2peptide::genetic_code::CodonTable;
    /// use codons2peptide::translate::Translator;
    ///
    /// let table = CodonTable::standard().unwrap();
    /// let translation = Translator::new(&table).translate("ATGGCCTAA").unwrap();
    /// assert_eq!(translation.polypeptide, "MA");
    /// ```
    pub fn translate(&self, sequence: &str) -> Result<Translation, TranslationError> {
        let dna = normalize(sequence)?;

        let offset = if self.options.from_start_codon {
            match self.find_start_codon(&dna) {
                Some(offset) => offset,
                None => return Ok(Translation::empty()),
            }
        } else {
            0
        };
        let reading_frame = &dna[offset..];

        let mut polypeptide = String::with_capacity(reading_frame.len() / 3 + 1);
        let mut codons = reading_frame.chunks_exact(3);
        for (codon_index, codon) in codons.by_ref().enumerate() {
            match self.table.lookup(&[codon[0], codon[1], codon[2]])? {
                residue @ Residue::AminoAcid(_) => polypeptide.push(residue.symbol()),
                Residue::Stop => {
                    if self.options.include_stop {
                        polypeptide.push(Residue::Stop.symbol());
                    }
                    return Ok(Translation {
                        polypeptide,
                        termination: Termination::Stopped { codon_index },
                        trailing: None,
                    });
                }
            }
        }

        let remainder = codons.remainder();
        let trailing = (!remainder.is_empty()).then(|| IncompleteTrailingCodon {
            leftover: String::from_utf8_lossy(remainder).into_owned(),
            position: dna.len() - remainder.len(),
        });

        Ok(Translation {
            polypeptide,
            termination: Termination::Exhausted,
            trailing,
        })
    }

    /// Position of the earliest start codon, in any frame.
    fn find_start_codon(&self, dna: &[u8]) -> Option<usize> {
        dna.windows(3).position(|window| {
            self.start_codons
                .iter()
                .any(|start| start.as_slice() == window)
        })
    }
}

/// Upper-cases and validates a sequence, returning its bytes.
fn normalize(sequence: &str) -> Result<Vec<u8>, TranslationError> {
    let mut dna = Vec::with_capacity(sequence.len());
    for (position, c) in sequence.chars().enumerate() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii() || !is_legal_nucleotide(upper as u8) {
            return Err(TranslationError::InvalidNucleotide {
                nucleotide: c,
                position,
            });
        }
        dna.push(upper as u8);
    }
    Ok(dna)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> CodonTable {
        CodonTable::standard().unwrap()
    }

    #[test]
    fn test_stop_codon_excluded() {
        let table = standard();
        let result = Translator::new(&table).translate("ATGGCCTAA").unwrap();

        assert_eq!(result.polypeptide, "MA");
        assert_eq!(result.termination, Termination::Stopped { codon_index: 2 });
        assert_eq!(result.trailing, None);
    }

    #[test]
    fn test_stop_codon_included() {
        let table = standard();
        let options = TranslationOptions {
            include_stop: true,
            ..Default::default()
        };
        let result = Translator::with_options(&table, options)
            .translate("ATGGCCTAAGGG")
            .unwrap();

        assert_eq!(result.polypeptide, "MA*");
        assert_eq!(result.termination, Termination::Stopped { codon_index: 2 });
    }

    #[test]
    fn test_single_codon() {
        let table = standard();
        let result = Translator::new(&table).translate("ATG").unwrap();

        assert_eq!(result.polypeptide, "M");
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.trailing, None);
    }

    #[test]
    fn test_incomplete_trailing_codon() {
        let table = standard();
        let translator = Translator::new(&table);

        let result = translator.translate("ATGG").unwrap();
        assert_eq!(result.polypeptide, "M");
        assert_eq!(
            result.trailing,
            Some(IncompleteTrailingCodon {
                leftover: "G".to_string(),
                position: 3,
            })
        );

        let result = translator.translate("ATGGCCaa").unwrap();
        assert_eq!(result.polypeptide, "MA");
        assert_eq!(
            result.trailing,
            Some(IncompleteTrailingCodon {
                leftover: "AA".to_string(),
                position: 6,
            })
        );
    }

    #[test]
    fn test_too_short_for_a_codon() {
        let table = standard();
        let result = Translator::new(&table).translate("AT").unwrap();

        assert_eq!(result.polypeptide, "");
        assert_eq!(result.trailing.unwrap().leftover, "AT");
    }

    #[test]
    fn test_remainder_after_stop_is_not_reported() {
        let table = standard();
        let result = Translator::new(&table).translate("ATGTAAGC").unwrap();

        assert_eq!(result.polypeptide, "M");
        assert_eq!(result.trailing, None);
    }

    #[test]
    fn test_invalid_nucleotide() {
        let table = standard();
        let translator = Translator::new(&table);

        assert_eq!(
            translator.translate("ATGXCC").unwrap_err(),
            TranslationError::InvalidNucleotide {
                nucleotide: 'X',
                position: 3
            }
        );
        // RNA and ambiguity codes are not accepted
        assert_eq!(
            translator.translate("AUG").unwrap_err(),
            TranslationError::InvalidNucleotide {
                nucleotide: 'U',
                position: 1
            }
        );
        assert_eq!(
            translator.translate("ATGn").unwrap_err(),
            TranslationError::InvalidNucleotide {
                nucleotide: 'n',
                position: 3
            }
        );
    }

    #[test]
    fn test_invalid_nucleotide_after_stop_still_fails() {
        let table = standard();
        let result = Translator::new(&table).translate("TAAATGZ");
        assert!(matches!(
            result,
            Err(TranslationError::InvalidNucleotide { nucleotide: 'Z', position: 6 })
        ));
    }

    #[test]
    fn test_non_ascii_position_counts_characters() {
        let table = standard();
        let result = Translator::new(&table).translate("AéTG");
        assert_eq!(
            result.unwrap_err(),
            TranslationError::InvalidNucleotide {
                nucleotide: 'é',
                position: 1
            }
        );
    }

    #[test]
    fn test_case_insensitive() {
        let table = standard();
        let translator = Translator::new(&table);

        assert_eq!(translator.translate("atggcc").unwrap().polypeptide, "MA");
        assert_eq!(translator.translate("AtGgCc").unwrap().polypeptide, "MA");
    }

    #[test]
    fn test_empty_sequence() {
        let table = standard();
        let result = Translator::new(&table).translate("").unwrap();

        assert_eq!(result, Translation::empty());
    }

    #[test]
    fn test_length_without_stop() {
        let table = standard();
        let translator = Translator::new(&table);

        for sequence in ["TTT", "TTTCTTATTGTT", "GGGAAACCCTTTGGGAAACCC"] {
            let result = translator.translate(sequence).unwrap();
            assert_eq!(result.polypeptide.len(), sequence.len() / 3, "{}", sequence);
            assert_eq!(result.termination, Termination::Exhausted);
        }
    }

    #[test]
    fn test_first_stop_wins() {
        let table = standard();
        let translator = Translator::new(&table);

        // Stops at triplet 3, the later TGA is never reached
        let result = translator.translate("TTTCTTATTTAGGGGTGA").unwrap();
        assert_eq!(result.polypeptide, "FLI");
        assert_eq!(result.termination, Termination::Stopped { codon_index: 3 });

        let result = translator.translate("TGAATG").unwrap();
        assert_eq!(result.polypeptide, "");
        assert_eq!(result.termination, Termination::Stopped { codon_index: 0 });
    }

    #[test]
    fn test_from_start_codon() {
        let table = standard();
        let options = TranslationOptions {
            from_start_codon: true,
            ..Default::default()
        };
        let translator = Translator::with_options(&table, options);

        // Start codon in the second frame
        let result = translator.translate("CCATGGCCTAA").unwrap();
        assert_eq!(result.polypeptide, "MA");
        assert_eq!(result.termination, Termination::Stopped { codon_index: 2 });

        // Trailing position is reported in input coordinates
        let result = translator.translate("CATGGC").unwrap();
        assert_eq!(result.polypeptide, "M");
        assert_eq!(
            result.trailing,
            Some(IncompleteTrailingCodon {
                leftover: "GC".to_string(),
                position: 4,
            })
        );

        // No start codon at all
        let result = translator.translate("CCCGGGTTT").unwrap();
        assert_eq!(result, Translation::empty());
    }

    #[test]
    fn test_start_codons_follow_the_table() {
        // ATA encodes methionine in vertebrate mitochondria
        let table = crate::genetic_code::genetic_code(2).unwrap();
        let options = TranslationOptions {
            from_start_codon: true,
            ..Default::default()
        };
        let translator = Translator::with_options(&table, options);

        assert_eq!(translator.translate("CCATAGGG").unwrap().polypeptide, "MG");
        assert_eq!(translator.translate("GATGATA").unwrap().polypeptide, "MM");
    }

    #[test]
    fn test_missing_codon_is_unknown_codon_error() {
        let table = standard().without(b"GCC");
        let result = Translator::new(&table).translate("ATGGCC");

        assert_eq!(
            result.unwrap_err(),
            TranslationError::UnknownCodon(UnknownCodonError {
                codon: "GCC".to_string(),
                table_id: 1,
            })
        );
    }

    #[test]
    fn test_shifted_positions() {
        let error = TranslationError::InvalidNucleotide {
            nucleotide: 'X',
            position: 3,
        };
        assert_eq!(
            error.shifted(2),
            TranslationError::InvalidNucleotide {
                nucleotide: 'X',
                position: 5
            }
        );

        let table = standard();
        let translation = Translator::new(&table).translate("ATGG").unwrap().shifted(2);
        assert_eq!(translation.trailing.unwrap().position, 5);
    }

    #[test]
    fn test_alternative_genetic_code() {
        let table = crate::genetic_code::genetic_code(2).unwrap();
        let result = Translator::new(&table).translate("ATGTGAAGA").unwrap();

        // TGA is Trp and AGA is a stop codon in vertebrate mitochondria
        assert_eq!(result.polypeptide, "MW");
        assert_eq!(result.termination, Termination::Stopped { codon_index: 2 });
    }
}
