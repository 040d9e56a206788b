//! Genetic code definitions and codon lookup.
//!
//! This module provides:
//! - The standard genetic code as a flat, editable codon table
//! - The set of legal nucleotides accepted in input sequences
//! - NCBI alternative genetic codes (2-33)
//!
//! To change how codons are translated, edit [`STANDARD_CODE`]. To change
//! which characters are accepted, edit [`LEGAL_NUCLEOTIDES`].

use std::collections::HashMap;

use thiserror::Error;

/// Nucleotides accepted in input sequences, after upper-casing.
pub const LEGAL_NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Table symbol marking a stop codon.
pub const STOP_SYMBOL: char = '*';

/// Symbol of the amino acid encoded by start codons.
pub const START_SYMBOL: char = 'M';

/// The standard genetic code (NCBI table 1).
///
/// Every codon must appear exactly once. Use `*` for stop codons.
#[rustfmt::skip]
pub const STANDARD_CODE: [(&str, char); 64] = [
    ("TTT", 'F'), ("TTC", 'F'), ("TTA", 'L'), ("TTG", 'L'),
    ("TCT", 'S'), ("TCC", 'S'), ("TCA", 'S'), ("TCG", 'S'),
    ("TAT", 'Y'), ("TAC", 'Y'), ("TAA", '*'), ("TAG", '*'),
    ("TGT", 'C'), ("TGC", 'C'), ("TGA", '*'), ("TGG", 'W'),
    ("CTT", 'L'), ("CTC", 'L'), ("CTA", 'L'), ("CTG", 'L'),
    ("CCT", 'P'), ("CCC", 'P'), ("CCA", 'P'), ("CCG", 'P'),
    ("CAT", 'H'), ("CAC", 'H'), ("CAA", 'Q'), ("CAG", 'Q'),
    ("CGT", 'R'), ("CGC", 'R'), ("CGA", 'R'), ("CGG", 'R'),
    ("ATT", 'I'), ("ATC", 'I'), ("ATA", 'I'), ("ATG", 'M'),
    ("ACT", 'T'), ("ACC", 'T'), ("ACA", 'T'), ("ACG", 'T'),
    ("AAT", 'N'), ("AAC", 'N'), ("AAA", 'K'), ("AAG", 'K'),
    ("AGT", 'S'), ("AGC", 'S'), ("AGA", 'R'), ("AGG", 'R'),
    ("GTT", 'V'), ("GTC", 'V'), ("GTA", 'V'), ("GTG", 'V'),
    ("GCT", 'A'), ("GCC", 'A'), ("GCA", 'A'), ("GCG", 'A'),
    ("GAT", 'D'), ("GAC", 'D'), ("GAA", 'E'), ("GAG", 'E'),
    ("GGT", 'G'), ("GGC", 'G'), ("GGA", 'G'), ("GGG", 'G'),
];

/// NCBI ID of the standard genetic code.
pub const STANDARD_CODE_ID: u8 = 1;

/// Alternative NCBI genetic codes as (id, name, ncbieaa).
///
/// The ncbieaa strings list amino acids in NCBI order: TTT, TTC, TTA, TTG,
/// TCT, ... (bases T, C, A, G at each position).
static NCBI_ALTERNATIVE_CODES: [(u8, &str, &str); 26] = [
    (2, "Vertebrate Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG"),
    (3, "Yeast Mitochondrial",
        "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (4, "Mold/Protozoan/Coelenterate Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (5, "Invertebrate Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG"),
    (6, "Ciliate/Dasycladacean/Hexamita Nuclear",
        "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (9, "Echinoderm/Flatworm Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    (10, "Euplotid Nuclear",
        "FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (11, "Bacterial/Archaeal/Plant Plastid",
        "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (12, "Alternative Yeast Nuclear",
        "FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (13, "Ascidian Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG"),
    (14, "Alternative Flatworm Mitochondrial",
        "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    (15, "Blepharisma Macronuclear",
        "FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (16, "Chlorophycean Mitochondrial",
        "FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (21, "Trematode Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    (22, "Scenedesmus obliquus Mitochondrial",
        "FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (23, "Thraustochytrium Mitochondrial",
        "FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (24, "Rhabdopleuridae Mitochondrial",
        "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
    (25, "Candidate Division SR1/Gracilibacteria",
        "FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (26, "Pachysolen tannophilus Nuclear",
        "FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (27, "Karyorelict Nuclear",
        "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (28, "Condylostoma Nuclear",
        "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (29, "Mesodinium Nuclear",
        "FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (30, "Peritrich Nuclear",
        "FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (31, "Blastocrithidia Nuclear",
        "FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (32, "Balanophoraceae Plastid",
        "FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (33, "Cephalodiscidae Mitochondrial",
        "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
];

/// A three-nucleotide codon, upper-case ASCII.
pub type Codon = [u8; 3];

/// What a codon translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residue {
    /// An amino acid, by its single-letter symbol.
    AminoAcid(char),
    /// A stop codon.
    Stop,
}

impl Residue {
    fn from_symbol(symbol: char) -> Self {
        if symbol == STOP_SYMBOL {
            Residue::Stop
        } else {
            Residue::AminoAcid(symbol)
        }
    }

    /// Single-letter symbol, `*` for stop.
    pub fn symbol(&self) -> char {
        match self {
            Residue::AminoAcid(aa) => *aa,
            Residue::Stop => STOP_SYMBOL,
        }
    }
}

/// A codon with no entry in the table it was looked up in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Codon '{codon}' has no associated amino acid in genetic code {table_id}")]
pub struct UnknownCodonError {
    pub codon: String,
    pub table_id: u8,
}

/// Errors raised while building a codon table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Codon '{0}' in the conversion table is not three nucleotides long")]
    MalformedCodon(String),

    #[error("Codon '{codon}' in the conversion table contains illegal nucleotide '{nucleotide}'")]
    IllegalNucleotide { codon: String, nucleotide: char },

    #[error("Codon '{0}' is defined more than once in the conversion table")]
    DuplicateCodon(String),

    #[error("Conversion table defines {0} codons, expected 64")]
    Incomplete(usize),

    #[error("Unknown genetic code: {0}")]
    UnknownGeneticCode(u8),
}

/// Returns true if `nucleotide` (already upper-cased) is accepted in input.
pub fn is_legal_nucleotide(nucleotide: u8) -> bool {
    LEGAL_NUCLEOTIDES.contains(&nucleotide)
}

/// A genetic code table for translating codons to amino acids.
///
/// Tables are immutable once built.
#[derive(Debug, Clone)]
pub struct CodonTable {
    /// NCBI genetic code ID
    pub id: u8,
    /// Name of the genetic code
    pub name: String,
    codons: HashMap<Codon, Residue>,
}

impl CodonTable {
    /// Builds the standard genetic code from [`STANDARD_CODE`].
    pub fn standard() -> Result<Self, TableError> {
        Self::from_pairs(STANDARD_CODE_ID, "Standard", STANDARD_CODE)
    }

    /// Builds a table from a flat codon to symbol mapping.
    ///
    /// The mapping must cover every combination of [`LEGAL_NUCLEOTIDES`]
    /// exactly once. Codons are upper-cased before they are stored.
    pub fn from_pairs<'a, I>(id: u8, name: &str, pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (&'a str, char)>,
    {
        let mut codons = HashMap::new();
        for (codon, symbol) in pairs {
            let key = parse_codon(codon)?;
            if codons.insert(key, Residue::from_symbol(symbol)).is_some() {
                return Err(TableError::DuplicateCodon(codon.to_ascii_uppercase()));
            }
        }

        let expected = LEGAL_NUCLEOTIDES.len().pow(3);
        if codons.len() != expected {
            return Err(TableError::Incomplete(codons.len()));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            codons,
        })
    }

    /// Builds a table from a 64-character NCBI amino acid string.
    pub fn from_ncbieaa(id: u8, name: &str, ncbieaa: &str) -> Result<Self, TableError> {
        let symbols: Vec<char> = ncbieaa.chars().collect();
        if symbols.len() != 64 {
            return Err(TableError::Incomplete(symbols.len()));
        }

        // NCBI order: TTT, TTC, TTA, TTG, TCT, TCC, ... (Base1, Base2, Base3)
        let bases = ['T', 'C', 'A', 'G'];
        let mut codons = Vec::with_capacity(64);
        for &b1 in &bases {
            for &b2 in &bases {
                for &b3 in &bases {
                    codons.push(format!("{}{}{}", b1, b2, b3));
                }
            }
        }

        Self::from_pairs(
            id,
            name,
            codons.iter().map(String::as_str).zip(symbols),
        )
    }

    /// Looks up a single codon.
    ///
    /// Only fails when the codon contains something other than the legal
    /// nucleotides, which validated input never does.
    pub fn lookup(&self, codon: &Codon) -> Result<Residue, UnknownCodonError> {
        self.codons
            .get(codon)
            .copied()
            .ok_or_else(|| UnknownCodonError {
                codon: String::from_utf8_lossy(codon).into_owned(),
                table_id: self.id,
            })
    }

    /// Codons encoding methionine, in lexicographic order.
    pub fn start_codons(&self) -> Vec<Codon> {
        let mut starts: Vec<Codon> = self
            .codons
            .iter()
            .filter(|(_, residue)| **residue == Residue::AminoAcid(START_SYMBOL))
            .map(|(codon, _)| *codon)
            .collect();
        starts.sort_unstable();
        starts
    }

    /// Drops one codon, leaving the table incomplete.
    #[cfg(test)]
    pub(crate) fn without(mut self, codon: &Codon) -> Self {
        self.codons.remove(codon);
        self
    }
}

fn parse_codon(codon: &str) -> Result<Codon, TableError> {
    let upper = codon.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    if bytes.len() != 3 {
        return Err(TableError::MalformedCodon(codon.to_string()));
    }
    if let Some(&bad) = bytes.iter().find(|&&b| !is_legal_nucleotide(b)) {
        return Err(TableError::IllegalNucleotide {
            codon: upper.clone(),
            nucleotide: bad as char,
        });
    }
    Ok([bytes[0], bytes[1], bytes[2]])
}

/// Builds the genetic code with the given NCBI ID.
///
/// ID 1 is built from [`STANDARD_CODE`], so edits there are picked up.
pub fn genetic_code(id: u8) -> Result<CodonTable, TableError> {
    if id == STANDARD_CODE_ID {
        return CodonTable::standard();
    }
    let (id, name, ncbieaa) = NCBI_ALTERNATIVE_CODES
        .iter()
        .find(|(code_id, _, _)| *code_id == id)
        .ok_or(TableError::UnknownGeneticCode(id))?;
    CodonTable::from_ncbieaa(*id, name, ncbieaa)
}

/// IDs and names of all available genetic codes.
pub fn available_codes() -> impl Iterator<Item = (u8, &'static str)> {
    std::iter::once((STANDARD_CODE_ID, "Standard")).chain(
        NCBI_ALTERNATIVE_CODES
            .iter()
            .map(|(id, name, _)| (*id, *name)),
    )
}

/// Returns true if `id` names an available genetic code.
pub fn is_known_genetic_code(id: u8) -> bool {
    available_codes().any(|(code_id, _)| code_id == id)
}
