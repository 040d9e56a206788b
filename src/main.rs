//! codons2peptide - A DNA to peptide sequence converter.
//!
//! ## Usage
//!
//! ```bash
//! codons2peptide ATGGCCTAA              # translate a literal sequence
//! codons2peptide -f sequences.txt       # one sequence per line
//! codons2peptide -f sequences.txt -o peptides.txt
//! ```
//!
//! ## Exit codes
//!
//! - 0: success (incomplete trailing codons only produce warnings)
//! - 1: a sequence could not be translated
//! - 2: invalid command-line usage
//! - 3: the input could not be read or the output could not be written

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn, LevelFilter};

use codons2peptide::batch::{translate_batch, translate_sequence};
use codons2peptide::genetic_code::{genetic_code, is_known_genetic_code};
use codons2peptide::input::{read_sequences, InputError, SequenceSource};
use codons2peptide::output::{OutputError, OutputSink, OutputTarget};
use codons2peptide::translate::{TranslationOptions, Translator};

const EXIT_TRANSLATION_FAILED: u8 = 1;
const EXIT_IO_ERROR: u8 = 3;

/// Codons2Peptide - A DNA to peptide sequence converter
///
/// Translates a DNA sequence, or a file of sequences (one per line), into
/// polypeptides. Translation stops at the first stop codon.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Exit codes: 0 success, 1 a sequence could not be translated, \
                  2 invalid usage, 3 input or output error."
)]
struct Args {
    /// The codon sequence, as a STRING. Unless '-f' is specified
    #[arg(value_name = "INPUT")]
    input: String,

    /// Indicates input is a FILE containing codon sequence(s); one sequence per line
    #[arg(short = 'f', long = "file")]
    file: bool,

    /// Output file; will overwrite any existing one. Defaults to stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// NCBI genetic code for translation (1-33, default: 1 = Standard)
    #[arg(short = 'g', long = "genetic-code", default_value = "1", value_parser = parse_genetic_code)]
    genetic_code: u8,

    /// Begin translating at the first start codon (ATG) found in any frame
    #[arg(short = 's', long = "from-start")]
    from_start: bool,

    /// Append '*' to the polypeptide when a stop codon ends translation
    #[arg(short = 'k', long = "keep-stop")]
    keep_stop: bool,

    /// Print extra debug logging information
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Unless there is an error, do not print logging information
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn source(&self) -> SequenceSource {
        if self.file {
            SequenceSource::File(PathBuf::from(&self.input))
        } else {
            SequenceSource::Literal(self.input.clone())
        }
    }

    fn options(&self) -> TranslationOptions {
        TranslationOptions {
            include_stop: self.keep_stop,
            from_start_codon: self.from_start,
        }
    }
}

fn parse_genetic_code(value: &str) -> Result<u8, String> {
    let id: u8 = value
        .parse()
        .map_err(|_| format!("'{}' is not a genetic code number", value))?;
    if is_known_genetic_code(id) {
        Ok(id)
    } else {
        Err(format!("unknown genetic code {} (valid: 1-6, 9-16, 21-33)", id))
    }
}

fn set_log_level(verbose: bool, quiet: bool) {
    let mut log_level = LevelFilter::Info;
    if verbose {
        log_level = LevelFilter::Debug;
    }
    if quiet {
        log_level = LevelFilter::Error;
    }
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Reads, translates and writes all sequences.
fn run(args: &Args) -> Result<()> {
    let table = genetic_code(args.genetic_code)
        .with_context(|| format!("Could not build genetic code {}", args.genetic_code))?;
    let translator = Translator::with_options(&table, args.options());
    debug!(
        "Using genetic code {} ({}) with {:?}",
        translator.table().id,
        translator.table().name,
        translator.options()
    );

    let source = args.source();
    let sequences = read_sequences(&source)?;
    debug!("Read {} sequence(s)", sequences.len());

    let target = OutputTarget::from(args.output.clone());

    if let (SequenceSource::Literal(_), [sequence]) = (&source, sequences.as_slice()) {
        // A single sequence fails the run directly, without writing output
        let translation = translate_sequence(&translator, sequence)?;
        if let Some(trailing) = &translation.trailing {
            warn!("{}", trailing);
        }
        let mut sink = OutputSink::open(target)?;
        sink.write_line(&translation.polypeptide)?;
        sink.finish()?;
        return Ok(());
    }

    if sequences.is_empty() {
        warn!("No sequences found in the input file");
    }
    let report = translate_batch(&translator, &sequences)?;

    let mut sink = OutputSink::open(target)?;
    report.write_to(&mut sink)?;
    let written = sink.finish()?;
    if let Some(path) = &args.output {
        info!("Wrote {} polypeptide(s) to {}", written, path.display());
    }
    let warnings = report.warnings();
    if warnings > 0 {
        info!(
            "{} of {} sequence(s) had an incomplete trailing codon",
            warnings,
            report.total()
        );
    }

    report.check()?;
    Ok(())
}

/// Maps an error to the documented exit code.
fn exit_code(err: &anyhow::Error) -> u8 {
    let io_failure = err
        .chain()
        .any(|cause| cause.is::<InputError>() || cause.is::<OutputError>());
    if io_failure {
        EXIT_IO_ERROR
    } else {
        EXIT_TRANSLATION_FAILED
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    set_log_level(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
