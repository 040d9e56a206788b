//! # codons2peptide - DNA to peptide translation
//!
//! Translates DNA codon sequences into polypeptides using a genetic code
//! table. Sequences come from a literal string or from a file with one
//! sequence per line, and results go to a file or standard output.
//!
//! ## Architecture
//!
//! - `genetic_code`: Codon tables, legal nucleotides and NCBI genetic codes
//! - `translate`: Validation, chunking and translation of one sequence
//! - `input`: Reading sequences from the command line or a file
//! - `output`: Writing polypeptides to a file or standard output
//! - `batch`: Translating many sequences independently, in input order
//!
//! ```
//! use codons2peptide::genetic_code::CodonTable;
//! use codons2peptide::translate::Translator;
//!
//! let table = CodonTable::standard().unwrap();
//! let translator = Translator::new(&table);
//! assert_eq!(translator.translate("ATGG").unwrap().polypeptide, "M");
//! ```

pub mod batch;
pub mod genetic_code;
pub mod input;
pub mod output;
pub mod translate;
